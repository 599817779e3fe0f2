use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::sql::{ColumnMap, FieldValues, FilterOp, FilterRules};

/// API field -> `jobs` column
pub const JOB_COLUMNS: ColumnMap = ColumnMap::new(&[("companyHandle", "company_handle")]);

pub const JOB_FILTER_RULES: FilterRules = FilterRules::new(&[
    ("title", FilterOp::Contains),
    ("minSalary", FilterOp::AtLeast),
    ("maxSalary", FilterOp::AtMost),
    ("companyHandle", FilterOp::Equals),
]);

pub const JOB_FILTER_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("minSalary", "salary"),
    ("maxSalary", "salary"),
    ("companyHandle", "company_handle"),
]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobNew {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Partial update; `None` leaves the column untouched. The owning company is fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl JobUpdate {
    pub fn to_fields(&self) -> FieldValues {
        let mut fields = FieldValues::new();
        if let Some(title) = &self.title {
            fields.insert("title".to_string(), title.clone().into());
        }
        if let Some(salary) = self.salary {
            fields.insert("salary".to_string(), salary.into());
        }
        if let Some(equity) = self.equity {
            fields.insert("equity".to_string(), equity.into());
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub max_salary: Option<i32>,
    pub company_handle: Option<String>,
}

impl JobFilter {
    pub fn to_criteria(&self) -> FieldValues {
        let mut criteria = FieldValues::new();
        if let Some(title) = &self.title {
            criteria.insert("title".to_string(), title.clone().into());
        }
        if let Some(min) = self.min_salary {
            criteria.insert("minSalary".to_string(), min.into());
        }
        if let Some(max) = self.max_salary {
            criteria.insert("maxSalary".to_string(), max.into());
        }
        if let Some(handle) = &self.company_handle {
            criteria.insert("companyHandle".to_string(), handle.clone().into());
        }
        criteria
    }
}
