use std::collections::HashMap;

use serde_json::Value;

use crate::api::validate::{QueryValidator, Validator};
use crate::database::models::{JobFilter, JobNew, JobUpdate};
use crate::error::ApiError;

impl JobNew {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut v = Validator::new(body);
        v.allow_only(&["title", "salary", "equity", "companyHandle"]);

        let title = v.string("title", true, 1, None);
        let salary = v.integer("salary", false, 0);
        let equity = v.fraction("equity", false);
        let company_handle = v.string("companyHandle", true, 1, Some(25));

        let job = match (title, company_handle) {
            (Some(title), Some(company_handle)) => Some(JobNew { title, salary, equity, company_handle }),
            _ => None,
        };
        v.finish(job)
    }
}

impl JobUpdate {
    /// `companyHandle` and `id` are not updatable and are rejected like any other unknown property.
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let mut v = Validator::new(body);
        v.allow_only(&["title", "salary", "equity"]);

        let update = JobUpdate {
            title: v.string("title", false, 1, None),
            salary: v.integer("salary", false, 0),
            equity: v.fraction("equity", false),
        };
        v.finish(Some(update))
    }
}

impl JobFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        let mut q = QueryValidator::new(params);
        q.allow_only(&["title", "minSalary", "maxSalary", "companyHandle"]);

        let filter = JobFilter {
            title: q.text("title"),
            min_salary: q.integer("minSalary", 0),
            max_salary: q.integer("maxSalary", 0),
            company_handle: q.text("companyHandle"),
        };
        q.ordered("minSalary", filter.min_salary, "maxSalary", filter.max_salary);
        q.finish(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn errors(err: ApiError) -> Vec<String> {
        match err {
            ApiError::ValidationError { errors, .. } => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn new_job_parses() {
        let job = JobNew::from_json(&json!({
            "title": "new",
            "salary": 100000,
            "equity": "0.081",
            "companyHandle": "c1"
        }))
        .unwrap();
        assert_eq!(job.title, "new");
        assert_eq!(job.salary, Some(100000));
        assert_eq!(job.equity, Some(Decimal::from_str("0.081").unwrap()));
        assert_eq!(job.company_handle, "c1");
    }

    #[test]
    fn new_job_missing_data() {
        let err = JobNew::from_json(&json!({ "title": "new" })).unwrap_err();
        assert_eq!(errors(err), vec!["instance requires property \"companyHandle\"".to_string()]);
    }

    #[test]
    fn new_job_invalid_data_reports_every_field() {
        let err = JobNew::from_json(&json!({
            "title": "new",
            "salary": "not-a-number",
            "equity": "2",
            "companyHandle": "c1"
        }))
        .unwrap_err();
        assert_eq!(errors(err).len(), 2);
    }

    #[test]
    fn update_forbids_company_handle() {
        let err = JobUpdate::from_json(&json!({ "salary": 5, "companyHandle": "c2" })).unwrap_err();
        assert_eq!(
            errors(err),
            vec!["instance is not allowed to have the additional property \"companyHandle\"".to_string()]
        );
    }

    #[test]
    fn empty_update_passes_validation() {
        // Emptiness is rejected later by the partial-update builder.
        let update = JobUpdate::from_json(&json!({})).unwrap();
        assert_eq!(update, JobUpdate::default());
    }

    #[test]
    fn filter_from_query() {
        let params: HashMap<String, String> =
            [("title".to_string(), "j".to_string()), ("minSalary".to_string(), "10".to_string())]
                .into_iter()
                .collect();
        let filter = JobFilter::from_query(&params).unwrap();
        assert_eq!(filter.title.as_deref(), Some("j"));
        assert_eq!(filter.min_salary, Some(10));
        assert_eq!(filter.max_salary, None);
    }

    #[test]
    fn filter_rejects_unknown_params() {
        let params: HashMap<String, String> = [("location".to_string(), "CA".to_string())].into_iter().collect();
        assert!(JobFilter::from_query(&params).is_err());
    }
}
