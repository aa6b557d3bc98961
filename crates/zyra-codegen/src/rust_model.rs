use crate::util::{self, HEADER};

use std_util::str::enum_case_name;
use zyra_core::schema::{EnumDescriptor, FlatColumn, Name, TableDescriptor, Type};
use zyra_core::SchemaDescriptor;

use std::fmt;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop",
    "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return", "static",
    "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual",
    "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "super", "Self"];

/// Generates serde-annotated Rust declarations: one enum per schema enum and
/// one struct per table, with a field per physical column.
pub fn generate(schema: &SchemaDescriptor) -> String {
    RustModel { schema }.to_string()
}

struct RustModel<'a> {
    schema: &'a SchemaDescriptor,
}

impl fmt::Display for RustModel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {HEADER}")?;
        writeln!(f)?;
        writeln!(f, "use serde::{{Deserialize, Serialize}};")?;

        for descriptor in self.schema.enums() {
            writeln!(f)?;
            fmt_enum(f, descriptor)?;
        }

        for table in self.schema.ordered_tables() {
            writeln!(f)?;
            self.fmt_struct(f, table)?;
        }

        Ok(())
    }
}

impl RustModel<'_> {
    fn fmt_struct(&self, f: &mut fmt::Formatter<'_>, table: &TableDescriptor) -> fmt::Result {
        writeln!(f, "/// A row of `{}`.", table.name)?;
        writeln!(f, "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]")?;
        writeln!(f, "pub struct {} {{", util::type_name(self.schema, &table.name))?;

        for column in self.schema.flat_columns(&table.name) {
            let name = field_ident(column.name());

            if name.trim_start_matches("r#") != column.name() {
                writeln!(f, "    #[serde(rename = {:?})]", column.name())?;
            }

            writeln!(f, "    pub {name}: {},", field_type(column))?;
        }

        writeln!(f, "}}")
    }
}

fn fmt_enum(f: &mut fmt::Formatter<'_>, descriptor: &EnumDescriptor) -> fmt::Result {
    writeln!(f, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]")?;
    writeln!(f, "pub enum {} {{", enum_type_name(descriptor))?;

    for value in &descriptor.values {
        let variant = enum_case_name(value);

        if variant != *value {
            writeln!(f, "    #[serde(rename = {value:?})]")?;
        }

        writeln!(f, "    {variant},")?;
    }

    writeln!(f, "}}")
}

fn enum_type_name(descriptor: &EnumDescriptor) -> String {
    Name::new(&descriptor.name).upper_camel_case()
}

fn field_type(flat: &FlatColumn) -> String {
    let column = &flat.column;

    let ty = if flat.is_json() {
        "serde_json::Value".to_string()
    } else if column.encrypted {
        "String".to_string()
    } else {
        match &column.ty {
            Type::String | Type::Decimal { .. } | Type::Uuid | Type::Timestamp => "String".to_string(),
            Type::Integer => "i32".to_string(),
            Type::BigInt => "i64".to_string(),
            Type::Boolean => "bool".to_string(),
            Type::Double => "f64".to_string(),
            Type::Enum(descriptor) => enum_type_name(descriptor),
            Type::Object | Type::Array => "serde_json::Value".to_string(),
        }
    };

    if column.nullable {
        format!("Option<{ty}>")
    } else {
        ty
    }
}

/// A snake case field identifier for `column`, escaped when it collides
/// with a keyword.
fn field_ident(column: &str) -> String {
    let name = Name::new(column).snake_case();

    if name.is_empty() {
        return "field".to_string();
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{name}");
    }

    if RESERVED.contains(&name.as_str()) {
        return format!("{name}_");
    }

    if KEYWORDS.contains(&name.as_str()) {
        return format!("r#{name}");
    }

    name
}
