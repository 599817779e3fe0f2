use indexmap::IndexMap;
use rust_decimal::Decimal;

/// A typed value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Bool(bool),
    Int(i32),
    Decimal(Decimal),
    Text(String),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

/// Ordered field -> value mapping. Iteration order decides placeholder numbering.
pub type FieldValues = IndexMap<String, SqlValue>;

/// Static translation table from API field names to storage column names.
///
/// Fields without an entry are rendered verbatim.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap(&'static [(&'static str, &'static str)]);

impl ColumnMap {
    pub const EMPTY: ColumnMap = ColumnMap(&[]);

    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self(entries)
    }

    pub fn column<'a>(&self, field: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(api, _)| *api == field)
            .map(|(_, column)| *column)
            .unwrap_or(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Case-insensitive substring match on the literal field name
    Contains,
    /// `>=` against the mapped column
    AtLeast,
    /// `<=` against the mapped column
    AtMost,
    /// `=` against the mapped column
    Equals,
}

impl FilterOp {
    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Contains => "ILIKE",
            FilterOp::AtLeast => ">=",
            FilterOp::AtMost => "<=",
            FilterOp::Equals => "=",
        }
    }
}

/// Per-entity table of accepted filter fields and their operators.
#[derive(Debug, Clone, Copy)]
pub struct FilterRules(&'static [(&'static str, FilterOp)]);

impl FilterRules {
    pub const fn new(rules: &'static [(&'static str, FilterOp)]) -> Self {
        Self(rules)
    }

    pub fn op(&self, field: &str) -> Option<FilterOp> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, op)| *op)
    }
}

/// SQL text plus the values for its `$1..$n` placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl SqlFragment {
    /// Placeholder index the next appended parameter must use.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }
}

/// Hands out contiguous 1-based placeholders while collecting their values.
#[derive(Debug, Default)]
pub(crate) struct ParamList {
    params: Vec<SqlValue>,
}

impl ParamList {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self { params: Vec::with_capacity(n) }
    }

    pub(crate) fn param(&mut self, value: SqlValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    pub(crate) fn into_fragment(self, sql: String) -> SqlFragment {
        SqlFragment { sql, params: self.params }
    }
}
