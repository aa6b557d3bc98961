use super::{Formatter, ToSql};

use zyra_core::schema::{DefaultValue, Value};

/// A string literal. Quotes are doubled; MySQL also treats backslashes as
/// escapes.
pub(super) struct Quoted<'a>(pub(super) &'a str);

impl ToSql for Quoted<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let mysql = f.serializer.is_mysql();

        f.dst.push('\'');
        for c in self.0.chars() {
            match c {
                '\'' => f.dst.push_str("''"),
                '\\' if mysql => f.dst.push_str("\\\\"),
                c => f.dst.push(c),
            }
        }
        f.dst.push('\'');
    }
}

impl ToSql for &Value {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Value::Null => fmt!(f, "NULL"),
            Value::Bool(true) => fmt!(f, "TRUE"),
            Value::Bool(false) => fmt!(f, "FALSE"),
            Value::I64(value) => fmt!(f, value.to_string().as_str()),
            // SQL has no literal for NaN or infinity
            Value::F64(value) if !value.is_finite() => fmt!(f, "NULL"),
            Value::F64(value) => fmt!(f, value.to_string().as_str()),
            Value::String(value) | Value::Timestamp(value) => fmt!(f, Quoted(value)),
        }
    }
}

impl ToSql for &DefaultValue {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            DefaultValue::Now if f.serializer.is_mysql() => fmt!(f, "CURRENT_TIMESTAMP"),
            DefaultValue::Now => fmt!(f, "NOW()"),
            DefaultValue::Value(value) => fmt!(f, value),
            DefaultValue::Sql(sql) => fmt!(f, sql),
        }
    }
}
