use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqlError {
    #[error("No data")]
    NoData,

    #[error("No filters supplied")]
    NoFilters,

    #[error("Unknown filter field: {0}")]
    UnknownFilterField(String),

    #[error("Invalid value for filter field {0}")]
    InvalidFilterValue(String),
}
