use super::Constraint;
use crate::schema::{ColumnDescriptor, Value};
use crate::validate::Violation;

/// Bounds on a floating point value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Bounds on an integer value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintIntRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl ConstraintRange {
    pub(crate) fn check(&self, column: &ColumnDescriptor, value: &Value) -> Result<(), Violation> {
        let Some(number) = value.as_f64() else {
            return Ok(());
        };

        let name = &column.name;

        if let Some(min) = self.min {
            if number < min {
                return Err(Violation::new(name, format!("{name} must be at least {min}")));
            }
        }

        if let Some(max) = self.max {
            if number > max {
                return Err(Violation::new(name, format!("{name} must be {max} or less")));
            }
        }

        Ok(())
    }
}

impl ConstraintIntRange {
    pub(crate) fn check(&self, column: &ColumnDescriptor, value: &Value) -> Result<(), Violation> {
        let name = &column.name;

        let number = match value {
            Value::String(text) if text.is_empty() => return Ok(()),
            Value::String(text) => match text.trim().parse::<i64>() {
                Ok(number) => number,
                Err(_) => {
                    return Err(Violation::new(name, format!("{name} must be a valid number")))
                }
            },
            other => match other.as_i64() {
                Some(number) => number,
                None => return Ok(()),
            },
        };

        if let Some(min) = self.min {
            if number < min {
                return Err(Violation::new(name, format!("{name} must be at least {min}")));
            }
        }

        if let Some(max) = self.max {
            if number > max {
                return Err(Violation::new(name, format!("{name} must be {max} or less")));
            }
        }

        Ok(())
    }
}

impl From<ConstraintRange> for Constraint {
    fn from(range: ConstraintRange) -> Self {
        Constraint::Range(range)
    }
}

impl From<ConstraintIntRange> for Constraint {
    fn from(range: ConstraintIntRange) -> Self {
        Constraint::IntRange(range)
    }
}
