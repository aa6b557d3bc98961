use super::{CreateFunction, Statement};

use std_util::str::sanitize_identifier;

/// A `BEFORE UPDATE` row trigger keeping `column` current.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTrigger {
    pub name: String,

    /// Table the trigger fires on
    pub on: String,

    pub column: String,

    /// Function executed by the trigger. When `None`, the trigger assigns
    /// the column itself.
    pub function: Option<String>,
}

impl Statement {
    /// A trigger refreshing `column` on every update of `table`. With
    /// `trigger_functions`, it calls the function created by
    /// [`Statement::create_updated_at_function`].
    pub fn create_updated_at_trigger(table: &str, column: &str, trigger_functions: bool) -> Self {
        CreateTrigger {
            name: format!("{}_updated_at_trigger", sanitize_identifier(table)),
            on: table.to_string(),
            column: column.to_string(),
            function: trigger_functions.then(|| CreateFunction::updated_at_name(table)),
        }
        .into()
    }
}

impl From<CreateTrigger> for Statement {
    fn from(value: CreateTrigger) -> Self {
        Self::CreateTrigger(value)
    }
}
