use crate::util::{self, HEADER};

use zyra_core::schema::constraint::{ConstraintLength, ConstraintPattern};
use zyra_core::schema::{
    ColumnDescriptor, Constraint, EnumDescriptor, Format, LetterCase, Name, NestedFieldSchema, Parity,
    Sign, TableDescriptor, Type,
};
use zyra_core::SchemaDescriptor;

use std::fmt;

/// Generates a Zod module: one `z.enum` per enum and one `z.object` per
/// table, each followed by its inferred TypeScript type.
///
/// Objects mirror the logical columns, so nested structures become nested
/// Zod schemas whatever their storage strategy.
pub fn generate(schema: &SchemaDescriptor) -> String {
    Zod { schema }.to_string()
}

struct Zod<'a> {
    schema: &'a SchemaDescriptor,
}

impl fmt::Display for Zod<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {HEADER}")?;
        writeln!(f, "import {{ z }} from \"zod\";")?;

        for descriptor in self.schema.enums() {
            let name = Name::new(&descriptor.name);
            let values: Vec<String> = descriptor.values.iter().map(|v| util::js_string(v)).collect();

            writeln!(f)?;
            writeln!(
                f,
                "export const {} = z.enum([{}]);",
                enum_schema(descriptor),
                values.join(", ")
            )?;
            writeln!(
                f,
                "export type {} = z.infer<typeof {}>;",
                name.upper_camel_case(),
                enum_schema(descriptor)
            )?;
        }

        for table in self.schema.ordered_tables() {
            writeln!(f)?;
            self.fmt_table(f, table)?;
        }

        Ok(())
    }
}

impl Zod<'_> {
    fn fmt_table(&self, f: &mut fmt::Formatter<'_>, table: &TableDescriptor) -> fmt::Result {
        let schema = format!("{}Schema", util::value_name(self.schema, &table.name));

        writeln!(f, "export const {schema} = {};", object(&table.columns, &table.primary_key, 0))?;
        writeln!(
            f,
            "export type {} = z.infer<typeof {schema}>;",
            util::type_name(self.schema, &table.name)
        )
    }
}

fn enum_schema(descriptor: &EnumDescriptor) -> String {
    format!("{}Schema", Name::new(&descriptor.name).camel_case())
}

fn object<'a>(
    columns: impl IntoIterator<Item = &'a ColumnDescriptor>,
    primary_key: &str,
    depth: usize,
) -> String {
    let indent = "  ".repeat(depth + 1);
    let mut out = String::from("z.object({\n");

    for column in columns {
        let key = if util::is_js_identifier(&column.name) {
            column.name.clone()
        } else {
            util::js_string(&column.name)
        };

        let is_pk = column.name.eq_ignore_ascii_case(primary_key);

        out.push_str(&indent);
        out.push_str(&key);
        out.push_str(": ");
        out.push_str(&field(column, is_pk, depth + 1));
        out.push_str(",\n");
    }

    out.push_str(&"  ".repeat(depth));
    out.push_str("})");
    out
}

/// The Zod expression validating one column.
fn field(column: &ColumnDescriptor, is_pk: bool, depth: usize) -> String {
    let (mut expr, implied) = base(column, depth);

    for constraint in &column.constraints {
        if let Constraint::Format(format) = constraint {
            if implied == Some(*format) {
                continue;
            }
        }

        refine(&mut expr, column, constraint);
    }

    if column.nullable && !is_pk {
        if column.default.is_some() {
            expr.push_str(".optional()");
        } else {
            expr.push_str(".nullable()");
        }
    }

    expr
}

/// The base expression for the column type, and the format it already
/// enforces.
fn base(column: &ColumnDescriptor, depth: usize) -> (String, Option<Format>) {
    if column.encrypted {
        return ("z.string()".to_string(), None);
    }

    match &column.ty {
        Type::String => ("z.string()".to_string(), None),
        Type::Integer | Type::BigInt => ("z.number().int()".to_string(), None),
        Type::Boolean => ("z.boolean()".to_string(), None),
        Type::Double | Type::Decimal { .. } => ("z.number()".to_string(), None),
        Type::Uuid => ("z.string().uuid()".to_string(), Some(Format::Uuid)),
        Type::Timestamp => ("z.string().datetime()".to_string(), Some(Format::IsoDateTime)),
        Type::Enum(descriptor) => (enum_schema(descriptor), None),
        Type::Object | Type::Array => (nested(column.nested.as_deref(), &column.ty, depth), None),
    }
}

fn nested(nested: Option<&NestedFieldSchema>, ty: &Type, depth: usize) -> String {
    match nested {
        Some(NestedFieldSchema::Object { fields, .. }) => object(fields.values(), "", depth),
        Some(NestedFieldSchema::Array { element, .. }) => {
            format!("z.array({})", field(element, false, depth))
        }
        None if *ty == Type::Array => "z.array(z.unknown())".to_string(),
        None => "z.record(z.string(), z.unknown())".to_string(),
    }
}

fn refine(expr: &mut String, column: &ColumnDescriptor, constraint: &Constraint) {
    let name = &column.name;

    match constraint {
        Constraint::Length(ConstraintLength { min, max, exact }) => {
            if let Some(exact) = exact {
                expr.push_str(&format!(".length({exact})"));
            }
            if let Some(min) = min {
                expr.push_str(&format!(".min({min})"));
            }
            if let Some(max) = max {
                expr.push_str(&format!(".max({max})"));
            }
        }
        Constraint::Range(range) => {
            if let Some(min) = range.min.filter(|min| min.is_finite()) {
                expr.push_str(&format!(".min({min})"));
            }
            if let Some(max) = range.max.filter(|max| max.is_finite()) {
                expr.push_str(&format!(".max({max})"));
            }
        }
        Constraint::IntRange(range) => {
            if let Some(min) = range.min {
                expr.push_str(&format!(".min({min})"));
            }
            if let Some(max) = range.max {
                expr.push_str(&format!(".max({max})"));
            }
        }
        Constraint::Sign(Sign::Positive) => expr.push_str(".positive()"),
        Constraint::Sign(Sign::Negative) => expr.push_str(".negative()"),
        Constraint::Parity(Parity::Even) => expr.push_str(".multipleOf(2)"),
        Constraint::Parity(Parity::Odd) => expr.push_str(&format!(
            ".refine((n) => n % 2 !== 0, {{ message: {} }})",
            util::js_string(&format!("{name} must be odd"))
        )),
        Constraint::Pattern(ConstraintPattern { regex, message }) => {
            expr.push_str(&format!(".regex(new RegExp({})", util::js_string(regex)));
            if let Some(message) = message {
                expr.push_str(&format!(", {{ message: {} }}", util::js_string(message)));
            }
            expr.push(')');
        }
        Constraint::StartsWith(prefix) => {
            expr.push_str(&format!(".startsWith({})", util::js_string(prefix)))
        }
        Constraint::EndsWith(suffix) => {
            expr.push_str(&format!(".endsWith({})", util::js_string(suffix)))
        }
        Constraint::Includes(needle) => {
            expr.push_str(&format!(".includes({})", util::js_string(needle)))
        }
        Constraint::Case(case) => {
            let (method, label) = match case {
                LetterCase::Upper => ("toUpperCase", "uppercase"),
                LetterCase::Lower => ("toLowerCase", "lowercase"),
            };
            expr.push_str(&format!(
                ".refine((s) => s === s.{method}(), {{ message: {} }})",
                util::js_string(&format!("{name} must be {label}"))
            ));
        }
        Constraint::Format(format) => expr.push_str(&format_check(*format)),
        Constraint::Custom(custom) => {
            expr.push_str(&format!(".describe({})", util::js_string(&custom.rule)))
        }
    }
}

fn format_check(format: Format) -> String {
    match format {
        Format::Email => ".email()".to_string(),
        Format::Url => ".url()".to_string(),
        Format::HttpUrl => format!(".url().regex(new RegExp({}))", util::js_string("^https?://")),
        Format::Uuid => ".uuid()".to_string(),
        Format::Cuid => ".cuid()".to_string(),
        Format::Cuid2 => ".cuid2()".to_string(),
        Format::Nanoid => ".nanoid()".to_string(),
        Format::Emoji => ".emoji()".to_string(),
        Format::Hex => format!(".regex(new RegExp({}))", util::js_string("^[0-9a-fA-F]+$")),
        Format::Jwt => ".jwt()".to_string(),
        Format::Date | Format::IsoDate => ".date()".to_string(),
        Format::Time | Format::IsoTime => ".time()".to_string(),
        Format::IsoDateTime => ".datetime()".to_string(),
        Format::Ipv4 => ".ip({ version: \"v4\" })".to_string(),
        Format::Ipv6 => ".ip({ version: \"v6\" })".to_string(),
    }
}
