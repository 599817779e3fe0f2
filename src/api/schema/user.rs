use serde_json::Value;

use crate::api::validate::Validator;
use crate::database::models::{UserNew, UserUpdate};
use crate::error::ApiError;

/// `POST /auth/token` body
#[derive(Debug, Clone, PartialEq)]
pub struct UserAuth {
    pub username: String,
    pub password: String,
}

impl UserAuth {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut v = Validator::new(body);
        v.allow_only(&["username", "password"]);

        let username = v.string("username", true, 1, Some(25));
        let password = v.string("password", true, 1, None);

        let auth = match (username, password) {
            (Some(username), Some(password)) => Some(UserAuth { username, password }),
            _ => None,
        };
        v.finish(auth)
    }
}

impl UserNew {
    /// Admin-created user; may set `isAdmin`.
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        Self::parse(body, true)
    }

    /// Self-registration; `isAdmin` is not accepted.
    pub fn from_register_json(body: &Value) -> Result<Self, ApiError> {
        Self::parse(body, false)
    }

    fn parse(body: &Value, allow_admin: bool) -> Result<Self, ApiError> {
        let mut v = Validator::new(body);
        if allow_admin {
            v.allow_only(&["username", "password", "firstName", "lastName", "email", "isAdmin"]);
        } else {
            v.allow_only(&["username", "password", "firstName", "lastName", "email"]);
        }

        let username = v.string("username", true, 1, Some(25));
        let password = v.string("password", true, 5, Some(20));
        let first_name = v.string("firstName", true, 1, Some(30));
        let last_name = v.string("lastName", true, 1, Some(30));
        let email = v.email("email", true, 6, 60);
        let is_admin = if allow_admin { v.boolean("isAdmin", false) } else { None };

        let user = match (username, password, first_name, last_name, email) {
            (Some(username), Some(password), Some(first_name), Some(last_name), Some(email)) => Some(UserNew {
                username,
                password,
                first_name,
                last_name,
                email,
                is_admin: is_admin.unwrap_or(false),
            }),
            _ => None,
        };
        v.finish(user)
    }
}

impl UserUpdate {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut v = Validator::new(body);
        v.allow_only(&["firstName", "lastName", "password", "email"]);

        let update = UserUpdate {
            first_name: v.string("firstName", false, 1, Some(30)),
            last_name: v.string("lastName", false, 1, Some(30)),
            password: v.string("password", false, 5, Some(20)),
            email: v.email("email", false, 6, 60),
        };
        v.finish(Some(update))
    }
}
