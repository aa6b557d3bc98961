mod format;
pub use format::Format;

mod length;
pub use length::ConstraintLength;

mod range;
pub use range::{ConstraintIntRange, ConstraintRange};

use super::{ColumnDescriptor, Value};
use crate::validate::{RuleRegistry, Violation};

/// A validation rule attached to a column.
///
/// Constraints are carried by descriptors so every emitter can mirror them
/// (the Zod emitter turns them into refinements, the MySQL emitter sizes
/// `VARCHAR` columns from the length bound). They are only checked against
/// data by [`ColumnDescriptor::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Length(ConstraintLength),
    Range(ConstraintRange),
    IntRange(ConstraintIntRange),
    Sign(Sign),
    Parity(Parity),
    Pattern(ConstraintPattern),
    StartsWith(String),
    EndsWith(String),
    Includes(String),
    Case(LetterCase),
    Format(Format),
    Custom(CustomRule),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    Upper,
    Lower,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintPattern {
    pub regex: String,

    /// Message reported when the value does not match.
    pub message: Option<String>,
}

/// A rule implemented by the caller and looked up by name in a
/// [`RuleRegistry`] at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRule {
    pub rule: String,
    pub message: String,
}

impl Constraint {
    pub fn length_less_than(max: u64) -> Self {
        ConstraintLength {
            min: None,
            max: Some(max),
            exact: None,
        }
        .into()
    }

    pub fn pattern(regex: impl Into<String>) -> Self {
        Constraint::Pattern(ConstraintPattern {
            regex: regex.into(),
            message: None,
        })
    }

    pub fn custom(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Constraint::Custom(CustomRule {
            rule: rule.into(),
            message: message.into(),
        })
    }

    pub fn as_length(&self) -> Option<&ConstraintLength> {
        match self {
            Constraint::Length(length) => Some(length),
            _ => None,
        }
    }

    pub fn as_format(&self) -> Option<Format> {
        match self {
            Constraint::Format(format) => Some(*format),
            _ => None,
        }
    }

    pub(crate) fn check(
        &self,
        column: &ColumnDescriptor,
        value: &Value,
        rules: &RuleRegistry,
    ) -> Result<(), Violation> {
        let name = &column.name;

        match self {
            Constraint::Length(length) => length.check(column, value),
            Constraint::Range(range) => range.check(column, value),
            Constraint::IntRange(range) => range.check(column, value),
            Constraint::Sign(sign) => {
                let Some(number) = value.as_f64() else {
                    return Ok(());
                };

                match sign {
                    Sign::Positive if number <= 0.0 => {
                        Err(Violation::new(name, format!("{name} must be positive")))
                    }
                    Sign::Negative if number >= 0.0 => {
                        Err(Violation::new(name, format!("{name} must be negative")))
                    }
                    _ => Ok(()),
                }
            }
            Constraint::Parity(parity) => {
                let Some(number) = value.as_i64() else {
                    return Ok(());
                };

                match parity {
                    Parity::Even if number % 2 != 0 => {
                        Err(Violation::new(name, format!("{name} must be even")))
                    }
                    Parity::Odd if number % 2 == 0 => {
                        Err(Violation::new(name, format!("{name} must be odd")))
                    }
                    _ => Ok(()),
                }
            }
            Constraint::Pattern(pattern) => {
                let Some(text) = value.as_str() else {
                    return Ok(());
                };

                let matched = match regex::Regex::new(&pattern.regex) {
                    Ok(regex) => regex.is_match(text),
                    Err(err) => {
                        tracing::debug!(pattern = %pattern.regex, %err, "invalid validation pattern");
                        false
                    }
                };

                if matched {
                    Ok(())
                } else {
                    let message = pattern
                        .message
                        .clone()
                        .unwrap_or_else(|| format!("{name} has an invalid format"));
                    Err(Violation::new(name, message))
                }
            }
            Constraint::StartsWith(prefix) => match value.as_str() {
                Some(text) if !text.starts_with(prefix.as_str()) => Err(Violation::new(
                    name,
                    format!("{name} must start with \"{prefix}\""),
                )),
                _ => Ok(()),
            },
            Constraint::EndsWith(suffix) => match value.as_str() {
                Some(text) if !text.ends_with(suffix.as_str()) => Err(Violation::new(
                    name,
                    format!("{name} must end with \"{suffix}\""),
                )),
                _ => Ok(()),
            },
            Constraint::Includes(needle) => match value.as_str() {
                Some(text) if !text.contains(needle.as_str()) => Err(Violation::new(
                    name,
                    format!("{name} must contain \"{needle}\""),
                )),
                _ => Ok(()),
            },
            Constraint::Case(case) => {
                let Some(text) = value.as_str() else {
                    return Ok(());
                };

                match case {
                    LetterCase::Upper if text != text.to_uppercase() => {
                        Err(Violation::new(name, format!("{name} must be uppercase")))
                    }
                    LetterCase::Lower if text != text.to_lowercase() => {
                        Err(Violation::new(name, format!("{name} must be lowercase")))
                    }
                    _ => Ok(()),
                }
            }
            Constraint::Format(format) => format.check(column, value),
            Constraint::Custom(custom) => match rules.get(&custom.rule) {
                Some(rule) if !rule(value) => Err(Violation::new(name, custom.message.clone())),
                Some(_) => Ok(()),
                None => {
                    tracing::debug!(rule = %custom.rule, column = %name, "no rule registered; skipping");
                    Ok(())
                }
            },
        }
    }
}
