use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::sql::{ColumnMap, FieldValues};

/// API field -> `users` column
pub const USER_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
]);

/// Public view of a user; the password hash never leaves the accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct UserCredentials {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<UserCredentials> for User {
    fn from(row: UserCredentials) -> Self {
        Self {
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_admin: row.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserNew {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

impl UserUpdate {
    /// Fields to write. `password_hash` replaces the plain password.
    pub fn to_fields(&self, password_hash: Option<String>) -> FieldValues {
        let mut fields = FieldValues::new();
        if let Some(first) = &self.first_name {
            fields.insert("firstName".to_string(), first.clone().into());
        }
        if let Some(last) = &self.last_name {
            fields.insert("lastName".to_string(), last.clone().into());
        }
        if let Some(hash) = password_hash {
            fields.insert("password".to_string(), hash.into());
        }
        if let Some(email) = &self.email {
            fields.insert("email".to_string(), email.clone().into());
        }
        fields
    }
}
