use std::collections::HashMap;

use serde_json::Value;

use crate::api::validate::{QueryValidator, Validator};
use crate::database::models::{CompanyFilter, CompanyNew, CompanyUpdate};
use crate::error::ApiError;

impl CompanyNew {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut v = Validator::new(body);
        v.allow_only(&["handle", "name", "description", "numEmployees", "logoUrl"]);

        let handle = v.string("handle", true, 1, Some(25));
        let name = v.string("name", true, 1, None);
        let description = v.string("description", true, 0, None);
        let num_employees = v.integer("numEmployees", false, 0);
        let logo_url = v.uri("logoUrl", false);

        let company = match (handle, name, description) {
            (Some(handle), Some(name), Some(description)) => Some(CompanyNew {
                handle,
                name,
                description,
                num_employees,
                logo_url,
            }),
            _ => None,
        };
        v.finish(company)
    }
}

impl CompanyUpdate {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut v = Validator::new(body);
        v.allow_only(&["name", "description", "numEmployees", "logoUrl"]);

        let update = CompanyUpdate {
            name: v.string("name", false, 1, None),
            description: v.string("description", false, 0, None),
            num_employees: v.integer("numEmployees", false, 0),
            logo_url: v.uri("logoUrl", false),
        };
        v.finish(Some(update))
    }
}

impl CompanyFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        let mut q = QueryValidator::new(params);
        q.allow_only(&["name", "minEmployees", "maxEmployees"]);

        let filter = CompanyFilter {
            name: q.text("name"),
            min_employees: q.integer("minEmployees", 0),
            max_employees: q.integer("maxEmployees", 0),
        };
        q.ordered("minEmployees", filter.min_employees, "maxEmployees", filter.max_employees);
        q.finish(filter)
    }
}
