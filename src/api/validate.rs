use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Collects every violation in a JSON body instead of stopping at the first.
///
/// Messages follow the `instance.<field> ...` wording clients already parse.
pub struct Validator<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: Vec<String>,
}

impl<'a> Validator<'a> {
    pub fn new(value: &'a Value) -> Self {
        match value.as_object() {
            Some(object) => Self { object: Some(object), errors: Vec::new() },
            None => Self {
                object: None,
                errors: vec!["instance is not of a type(s) object".to_string()],
            },
        }
    }

    /// Rejects properties outside `allowed`.
    pub fn allow_only(&mut self, allowed: &[&str]) -> &mut Self {
        if let Some(object) = self.object {
            for key in object.keys() {
                if !allowed.contains(&key.as_str()) {
                    self.errors
                        .push(format!("instance is not allowed to have the additional property \"{}\"", key));
                }
            }
        }
        self
    }

    fn field(&mut self, field: &str, required: bool) -> Option<&'a Value> {
        let value = self.object.and_then(|o| o.get(field));
        if value.is_none() && required && self.object.is_some() {
            self.errors.push(format!("instance requires property \"{}\"", field));
        }
        value
    }

    pub fn string(&mut self, field: &str, required: bool, min_len: usize, max_len: Option<usize>) -> Option<String> {
        let value = self.field(field, required)?;
        let Some(s) = value.as_str() else {
            self.errors.push(format!("instance.{} is not of a type(s) string", field));
            return None;
        };

        let len = s.chars().count();
        if len < min_len {
            self.errors.push(format!(
                "instance.{} does not meet minimum length of {}",
                field, min_len
            ));
            return None;
        }
        if let Some(max) = max_len {
            if len > max {
                self.errors.push(format!(
                    "instance.{} does not meet maximum length of {}",
                    field, max
                ));
                return None;
            }
        }
        Some(s.to_string())
    }

    pub fn integer(&mut self, field: &str, required: bool, minimum: i32) -> Option<i32> {
        let value = self.field(field, required)?;
        let Some(n) = value.as_i64() else {
            self.errors.push(format!("instance.{} is not of a type(s) integer", field));
            return None;
        };
        match i32::try_from(n) {
            Ok(n) if n >= minimum => Some(n),
            Ok(_) => {
                self.errors.push(format!("instance.{} must be greater than or equal to {}", field, minimum));
                None
            }
            Err(_) => {
                self.errors.push(format!("instance.{} is out of range", field));
                None
            }
        }
    }

    pub fn boolean(&mut self, field: &str, required: bool) -> Option<bool> {
        let value = self.field(field, required)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.errors.push(format!("instance.{} is not of a type(s) boolean", field));
                None
            }
        }
    }

    /// Decimal given as a string, e.g. `"0.081"`, within `0..=1`.
    pub fn fraction(&mut self, field: &str, required: bool) -> Option<Decimal> {
        let s = self.string(field, required, 1, None)?;
        match Decimal::from_str(&s) {
            Ok(d) if d >= Decimal::ZERO && d <= Decimal::ONE => Some(d),
            _ => {
                self.errors
                    .push(format!("instance.{} must be a decimal string between 0 and 1", field));
                None
            }
        }
    }

    pub fn email(&mut self, field: &str, required: bool, min_len: usize, max_len: usize) -> Option<String> {
        let s = self.string(field, required, min_len, Some(max_len))?;
        match s.find('@') {
            Some(at) if at > 0 && at < s.len() - 1 => Some(s),
            _ => {
                self.errors.push(format!("instance.{} does not conform to the \"email\" format", field));
                None
            }
        }
    }

    pub fn uri(&mut self, field: &str, required: bool) -> Option<String> {
        let s = self.string(field, required, 1, None)?;
        match url::Url::parse(&s) {
            Ok(_) => Some(s),
            Err(_) => {
                self.errors.push(format!("instance.{} does not conform to the \"uri\" format", field));
                None
            }
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns `value` when no violation was recorded.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ApiError> {
        if !self.errors.is_empty() {
            return Err(ApiError::validation_error("Invalid request", self.errors));
        }
        value.ok_or_else(|| ApiError::bad_request("Invalid request"))
    }
}

/// Same idea for query strings, where every value arrives as text.
pub struct QueryValidator<'a> {
    params: &'a HashMap<String, String>,
    errors: Vec<String>,
}

impl<'a> QueryValidator<'a> {
    pub fn new(params: &'a HashMap<String, String>) -> Self {
        Self { params, errors: Vec::new() }
    }

    pub fn allow_only(&mut self, allowed: &[&str]) -> &mut Self {
        let mut unknown: Vec<&String> = self.params.keys().filter(|k| !allowed.contains(&k.as_str())).collect();
        unknown.sort();
        for key in unknown {
            self.errors
                .push(format!("instance is not allowed to have the additional property \"{}\"", key));
        }
        self
    }

    pub fn text(&mut self, field: &str) -> Option<String> {
        let value = self.params.get(field)?;
        if value.is_empty() {
            self.errors.push(format!("instance.{} does not meet minimum length of 1", field));
            return None;
        }
        Some(value.clone())
    }

    pub fn integer(&mut self, field: &str, minimum: i32) -> Option<i32> {
        let value = self.params.get(field)?;
        match value.trim().parse::<i32>() {
            Ok(n) if n >= minimum => Some(n),
            Ok(_) => {
                self.errors.push(format!("instance.{} must be greater than or equal to {}", field, minimum));
                None
            }
            Err(_) => {
                self.errors.push(format!("instance.{} is not of a type(s) integer", field));
                None
            }
        }
    }

    /// Records an error when both bounds are present and `min > max`.
    pub fn ordered(&mut self, min_field: &str, min: Option<i32>, max_field: &str, max: Option<i32>) {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                self.errors.push(format!("{} cannot be greater than {}", min_field, max_field));
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, ApiError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::validation_error("Invalid filter", self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_all_errors() {
        let body = json!({ "salary": "lots", "extra": 1 });
        let mut v = Validator::new(&body);
        v.allow_only(&["title", "salary"]);
        let title = v.string("title", true, 1, None);
        let salary = v.integer("salary", false, 0);
        assert!(title.is_none() && salary.is_none());
        assert_eq!(
            v.errors(),
            &[
                "instance is not allowed to have the additional property \"extra\"".to_string(),
                "instance requires property \"title\"".to_string(),
                "instance.salary is not of a type(s) integer".to_string(),
            ]
        );
        assert!(matches!(v.finish(Some(())), Err(ApiError::ValidationError { .. })));
    }

    #[test]
    fn non_object_body_is_rejected_once() {
        let body = json!([1, 2]);
        let mut v = Validator::new(&body);
        v.string("title", true, 1, None);
        assert_eq!(v.errors().len(), 1);
    }

    #[test]
    fn checks_lengths_and_minimums() {
        let body = json!({ "handle": "", "n": -1, "name": "abcdef" });
        let mut v = Validator::new(&body);
        assert!(v.string("handle", true, 1, Some(25)).is_none());
        assert!(v.integer("n", false, 0).is_none());
        assert!(v.string("name", true, 1, Some(3)).is_none());
        assert_eq!(v.errors().len(), 3);
    }

    #[test]
    fn fraction_accepts_zero_to_one() {
        let body = json!({ "a": "0.081", "b": "1.5", "c": 0.5, "d": "0" });
        let mut v = Validator::new(&body);
        assert_eq!(v.fraction("a", false), Some(Decimal::from_str("0.081").unwrap()));
        assert_eq!(v.fraction("b", false), None);
        assert_eq!(v.fraction("c", false), None);
        assert_eq!(v.fraction("d", false), Some(Decimal::ZERO));
        assert_eq!(v.errors().len(), 2);
    }

    #[test]
    fn email_and_uri_formats() {
        let body = json!({ "email": "nope", "ok": "user1@user.com", "logo": "not a uri", "url": "http://c1.img" });
        let mut v = Validator::new(&body);
        assert!(v.email("email", true, 3, 60).is_none());
        assert!(v.email("ok", true, 6, 60).is_some());
        assert!(v.uri("logo", false).is_none());
        assert!(v.uri("url", false).is_some());
        assert_eq!(v.errors().len(), 2);
    }

    #[test]
    fn query_validator_parses_integers_and_bounds() {
        let params: HashMap<String, String> = [
            ("minSalary".to_string(), "200".to_string()),
            ("maxSalary".to_string(), "100".to_string()),
            ("location".to_string(), "CA".to_string()),
        ]
        .into_iter()
        .collect();
        let mut q = QueryValidator::new(&params);
        q.allow_only(&["minSalary", "maxSalary"]);
        let min = q.integer("minSalary", 0);
        let max = q.integer("maxSalary", 0);
        q.ordered("minSalary", min, "maxSalary", max);
        assert_eq!((min, max), (Some(200), Some(100)));
        assert!(q.finish(()).is_err());
    }
}
