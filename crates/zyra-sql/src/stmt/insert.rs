use super::Statement;

use zyra_core::schema::Value;

/// An `INSERT` with literal values.
///
/// Values are escaped but not parameterized; the statement is meant for
/// offline export and debugging, not for executing untrusted input.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl Statement {
    pub fn insert<K>(table: &str, record: impl IntoIterator<Item = (K, Value)>) -> Self
    where
        K: Into<String>,
    {
        let (columns, values) = record
            .into_iter()
            .map(|(column, value)| (column.into(), value))
            .unzip();

        Insert {
            table: table.to_string(),
            columns,
            values,
        }
        .into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
