use zyra_core::schema::Name;
use zyra_core::SchemaDescriptor;

/// First line of every generated file.
pub(crate) const HEADER: &str = "Generated by zyra. Do not edit by hand.";

/// `UpperCamelCase` type name for a table, without the database prefix.
pub(crate) fn type_name(schema: &SchemaDescriptor, table: &str) -> String {
    Name::from_table(table, schema.db_prefix()).upper_camel_case()
}

/// `lowerCamelCase` name for a table, without the database prefix.
pub(crate) fn value_name(schema: &SchemaDescriptor, table: &str) -> String {
    Name::from_table(table, schema.db_prefix()).camel_case()
}

pub(crate) fn field_name(column: &str) -> String {
    Name::new(column).camel_case()
}

/// A double quoted JavaScript string literal.
pub(crate) fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

pub(crate) fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Double quoted SQL identifier.
pub(crate) fn sql_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
