//! Validation of values against column descriptors.
//!
//! This pass is opt-in: building or emitting a schema never validates data.

use crate::schema::{ColumnDescriptor, Type, Value};

use std::collections::HashMap;
use std::fmt;

/// A value failed one of its column's checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub column: String,
    pub message: String,
}

/// A caller-provided validation rule.
pub type Rule = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Rules referenced by name from [`Constraint::Custom`](crate::schema::Constraint::Custom).
#[derive(Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Rule>,
}

impl Violation {
    pub fn new(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Violation {}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, rule: F) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Box::new(rule));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}

impl ColumnDescriptor {
    /// Checks `value` against the column: non-nullable columns require a
    /// non-empty value, then each constraint is checked in declaration
    /// order. Returns the first violation.
    pub fn validate(&self, value: &Value, rules: &RuleRegistry) -> Result<(), Violation> {
        let missing = match value {
            Value::Null => true,
            Value::String(text) => text.is_empty(),
            _ => false,
        };

        if missing {
            if self.nullable {
                return Ok(());
            }
            return Err(Violation::new(&self.name, format!("{} is required", self.name)));
        }

        if let (true, Value::String(text)) = (self.ty.is_integer(), value) {
            if text.trim().parse::<i64>().is_err() {
                return Err(Violation::new(
                    &self.name,
                    format!("{} must be a valid number", self.name),
                ));
            }
        }

        if let Type::Enum(descriptor) = &self.ty {
            if let Some(text) = value.as_str() {
                if !descriptor.contains(text) {
                    return Err(Violation::new(
                        &self.name,
                        format!(
                            "{} must be one of: {}",
                            self.name,
                            descriptor.values.join(", ")
                        ),
                    ));
                }
            }
        }

        for constraint in &self.constraints {
            constraint.check(self, value, rules)?;
        }

        Ok(())
    }
}
