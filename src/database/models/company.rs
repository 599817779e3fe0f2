use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::job::JobSummary;
use crate::sql::{ColumnMap, FieldValues, FilterOp, FilterRules};

/// API field -> `companies` column
pub const COMPANY_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

pub const COMPANY_FILTER_RULES: FilterRules = FilterRules::new(&[
    ("name", FilterOp::Contains),
    ("minEmployees", FilterOp::AtLeast),
    ("maxEmployees", FilterOp::AtMost),
]);

pub const COMPANY_FILTER_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("minEmployees", "num_employees"),
    ("maxEmployees", "num_employees"),
]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyNew {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    pub fn to_fields(&self) -> FieldValues {
        let mut fields = FieldValues::new();
        if let Some(name) = &self.name {
            fields.insert("name".to_string(), name.clone().into());
        }
        if let Some(description) = &self.description {
            fields.insert("description".to_string(), description.clone().into());
        }
        if let Some(n) = self.num_employees {
            fields.insert("numEmployees".to_string(), n.into());
        }
        if let Some(url) = &self.logo_url {
            fields.insert("logoUrl".to_string(), url.clone().into());
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn to_criteria(&self) -> FieldValues {
        let mut criteria = FieldValues::new();
        if let Some(name) = &self.name {
            criteria.insert("name".to_string(), name.clone().into());
        }
        if let Some(min) = self.min_employees {
            criteria.insert("minEmployees".to_string(), min.into());
        }
        if let Some(max) = self.max_employees {
            criteria.insert("maxEmployees".to_string(), max.into());
        }
        criteria
    }
}
