use super::Statement;

use std_util::str::sanitize_identifier;

/// A trigger function that stamps `column` with the current time on every
/// update.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunction {
    pub name: String,
    pub column: String,
}

impl Statement {
    pub fn create_updated_at_function(table: &str, column: &str) -> Self {
        CreateFunction {
            name: CreateFunction::updated_at_name(table),
            column: column.to_string(),
        }
        .into()
    }
}

impl CreateFunction {
    pub(crate) fn updated_at_name(table: &str) -> String {
        format!("{}_update_updated_at", sanitize_identifier(table))
    }
}

impl From<CreateFunction> for Statement {
    fn from(value: CreateFunction) -> Self {
        Self::CreateFunction(value)
    }
}
