use std::fmt;

/// A literal value, used for column defaults, runtime validation input and
/// literal INSERT export.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),

    /// An instant in time, kept in its textual (ISO 8601) form.
    Timestamp(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the textual payload of string-like values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) | Value::Timestamp(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value as a number when it is numeric or a string that
    /// parses as one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::I64(value) => Some(*value as f64),
            Value::F64(value) => Some(*value),
            Value::String(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns the value as an integer when it is one, or a string that
    /// parses as one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(value) => Some(*value),
            Value::F64(value) if value.fract() == 0.0 => Some(*value as i64),
            Value::String(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::I64(value) => write!(f, "{value}"),
            Value::F64(value) => write!(f, "{value}"),
            Value::String(value) | Value::Timestamp(value) => f.write_str(value),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
