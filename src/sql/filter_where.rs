use super::error::SqlError;
use super::types::{ColumnMap, FieldValues, FilterOp, FilterRules, ParamList, SqlFragment, SqlValue};

/// Builds a `WHERE` clause (without the keyword) from filter criteria.
///
/// Each field must appear in `rules`. `Contains` fields match the literal field
/// name with `ILIKE '%value%'`; the other operators compare against the column
/// given by `columns`. Predicates are joined with `AND` in input order.
pub fn sql_for_filtering(
    criteria: &FieldValues,
    rules: &FilterRules,
    columns: &ColumnMap,
) -> Result<SqlFragment, SqlError> {
    if criteria.is_empty() {
        return Err(SqlError::NoFilters);
    }

    let mut params = ParamList::with_capacity(criteria.len());
    let mut conditions = Vec::with_capacity(criteria.len());

    for (field, value) in criteria {
        let op = rules
            .op(field)
            .ok_or_else(|| SqlError::UnknownFilterField(field.clone()))?;

        let condition = match op {
            FilterOp::Contains => {
                let SqlValue::Text(text) = value else {
                    return Err(SqlError::InvalidFilterValue(field.clone()));
                };
                let pattern = SqlValue::Text(format!("%{}%", text));
                format!("\"{}\" {} {}", field, op.to_sql(), params.param(pattern))
            }
            FilterOp::AtLeast | FilterOp::AtMost | FilterOp::Equals => {
                format!("\"{}\" {} {}", columns.column(field), op.to_sql(), params.param(value.clone()))
            }
        };
        conditions.push(condition);
    }

    Ok(params.into_fragment(conditions.join(" AND ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: FilterRules = FilterRules::new(&[
        ("name", FilterOp::Contains),
        ("minEmployees", FilterOp::AtLeast),
        ("maxEmployees", FilterOp::AtMost),
        ("companyHandle", FilterOp::Equals),
    ]);

    const COLUMNS: ColumnMap = ColumnMap::new(&[
        ("name", "company_name"),
        ("minEmployees", "num_employees"),
        ("maxEmployees", "num_employees"),
        ("companyHandle", "company_handle"),
    ]);

    fn criteria(pairs: &[(&str, SqlValue)]) -> FieldValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn contains_uses_literal_field_and_wraps_value() {
        let result = sql_for_filtering(&criteria(&[("name", "net".into())]), &RULES, &COLUMNS).unwrap();
        assert_eq!(result.sql, r#""name" ILIKE $1"#);
        assert_eq!(result.params, vec![SqlValue::from("%net%")]);
    }

    #[test]
    fn bounds_use_mapped_column_and_raw_value() {
        let result = sql_for_filtering(
            &criteria(&[("minEmployees", 2.into()), ("maxEmployees", 300.into())]),
            &RULES,
            &COLUMNS,
        )
        .unwrap();
        assert_eq!(result.sql, r#""num_employees" >= $1 AND "num_employees" <= $2"#);
        assert_eq!(result.params, vec![SqlValue::Int(2), SqlValue::Int(300)]);
    }

    #[test]
    fn all_filters_keep_input_order() {
        let result = sql_for_filtering(
            &criteria(&[
                ("maxEmployees", 3.into()),
                ("name", "c".into()),
                ("companyHandle", "c1".into()),
            ]),
            &RULES,
            &COLUMNS,
        )
        .unwrap();
        assert_eq!(
            result.sql,
            r#""num_employees" <= $1 AND "name" ILIKE $2 AND "company_handle" = $3"#
        );
        assert_eq!(
            result.params,
            vec![SqlValue::Int(3), SqlValue::from("%c%"), SqlValue::from("c1")]
        );
        assert_eq!(result.next_placeholder(), 4);
    }

    #[test]
    fn rejects_unknown_field() {
        let err = sql_for_filtering(&criteria(&[("location", "CA".into())]), &RULES, &COLUMNS).unwrap_err();
        assert_eq!(err, SqlError::UnknownFilterField("location".to_string()));
    }

    #[test]
    fn rejects_non_text_pattern() {
        let err = sql_for_filtering(&criteria(&[("name", 5.into())]), &RULES, &COLUMNS).unwrap_err();
        assert_eq!(err, SqlError::InvalidFilterValue("name".to_string()));
    }

    #[test]
    fn fails_with_no_filters() {
        let err = sql_for_filtering(&FieldValues::new(), &RULES, &COLUMNS).unwrap_err();
        assert_eq!(err, SqlError::NoFilters);
    }
}
