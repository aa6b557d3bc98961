use super::Constraint;
use crate::schema::{ColumnDescriptor, Value};
use crate::validate::Violation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintLength {
    /// The minimum length of the field.
    pub min: Option<u64>,

    /// The maximum length of the field.
    pub max: Option<u64>,

    /// The exact length of the field.
    pub exact: Option<u64>,
}

impl ConstraintLength {
    /// The largest length a value may have, if bounded.
    pub fn upper_bound(&self) -> Option<u64> {
        match (self.exact, self.max) {
            (Some(exact), Some(max)) => Some(exact.min(max)),
            (exact, max) => exact.or(max),
        }
    }

    pub(crate) fn check(&self, column: &ColumnDescriptor, value: &Value) -> Result<(), Violation> {
        let Some(text) = value.as_str() else {
            return Ok(());
        };

        let name = &column.name;
        let len = text.chars().count() as u64;

        if let Some(exact) = self.exact {
            if len != exact {
                return Err(Violation::new(
                    name,
                    format!("{name} must be exactly {exact} characters"),
                ));
            }
        }

        // Check minimum length
        if let Some(min) = self.min {
            if len < min {
                return Err(Violation::new(
                    name,
                    format!("{name} must be at least {min} characters"),
                ));
            }
        }

        // Check maximum length
        if let Some(max) = self.max {
            if len > max {
                return Err(Violation::new(
                    name,
                    format!("{name} must be {max} characters or less"),
                ));
            }
        }

        Ok(())
    }
}

impl From<ConstraintLength> for Constraint {
    fn from(length: ConstraintLength) -> Self {
        Constraint::Length(length)
    }
}
