use super::{value::Quoted, Comma, Ident, ToSql};

use crate::stmt;

impl ToSql for &stmt::Type {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let mysql = f.serializer.is_mysql();

        match self {
            stmt::Type::Boolean => fmt!(f, "BOOLEAN"),
            stmt::Type::Integer(8) => fmt!(f, "BIGINT"),
            stmt::Type::Integer(_) if mysql => fmt!(f, "INT"),
            stmt::Type::Integer(_) => fmt!(f, "INTEGER"),
            stmt::Type::Double if mysql => fmt!(f, "DOUBLE"),
            stmt::Type::Double => fmt!(f, "DOUBLE PRECISION"),
            stmt::Type::Decimal { precision, scale } => {
                fmt!(f, format!("DECIMAL({precision}, {scale})").as_str())
            }
            stmt::Type::Text => fmt!(f, "TEXT"),
            stmt::Type::VarChar(size) => fmt!(f, format!("VARCHAR({size})").as_str()),
            stmt::Type::Char(size) => fmt!(f, format!("CHAR({size})").as_str()),
            stmt::Type::Uuid => fmt!(f, "UUID"),
            stmt::Type::Timestamp if mysql => fmt!(f, "DATETIME"),
            stmt::Type::Timestamp => fmt!(f, "TIMESTAMPTZ"),
            stmt::Type::Json if mysql => fmt!(f, "JSON"),
            stmt::Type::Json => fmt!(f, "JSONB"),
            stmt::Type::Enum(name) => fmt!(f, Ident(name)),
            stmt::Type::InlineEnum(values) => {
                let values = Comma(values.iter().map(|value| Quoted(value)));
                fmt!(f, "ENUM(" values ")")
            }
        }
    }
}
