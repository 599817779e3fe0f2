use super::error::SqlError;
use super::types::{ColumnMap, FieldValues, ParamList, SqlFragment};

/// Builds the `SET` clause of a partial update.
///
/// `{firstName: "Aliya", age: 32}` with `firstName -> first_name` becomes
/// `"first_name"=$1, "age"=$2` with params `["Aliya", 32]`. The caller appends
/// its key predicate at [`SqlFragment::next_placeholder`].
pub fn sql_for_partial_update(data: &FieldValues, columns: &ColumnMap) -> Result<SqlFragment, SqlError> {
    if data.is_empty() {
        return Err(SqlError::NoData);
    }

    let mut params = ParamList::with_capacity(data.len());
    let set_cols: Vec<String> = data
        .iter()
        .map(|(field, value)| format!("\"{}\"={}", columns.column(field), params.param(value.clone())))
        .collect();

    Ok(params.into_fragment(set_cols.join(", ")))
}
