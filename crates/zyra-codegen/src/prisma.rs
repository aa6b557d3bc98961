use crate::util::{self, HEADER};

use std_util::str::{enum_case_name, upper_camel_case};
use zyra_core::schema::{
    ColumnDescriptor, DefaultValue, EnumDescriptor, FlatColumn, ForeignKeyAction, IndexDescriptor,
    Name, TableDescriptor, Type, Value,
};
use zyra_core::SchemaDescriptor;

use std::collections::HashSet;
use std::fmt;

/// Settings for the `generator` and `datasource` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrismaOptions {
    /// Datasource provider, `postgresql` or `mysql`.
    pub provider: String,

    /// Datasource url, emitted verbatim.
    pub url: String,

    /// Client generator provider.
    pub generator: String,
}

impl Default for PrismaOptions {
    fn default() -> Self {
        Self {
            provider: "postgresql".to_string(),
            url: "env(\"DATABASE_URL\")".to_string(),
            generator: "prisma-client-js".to_string(),
        }
    }
}

impl PrismaOptions {
    pub fn mysql() -> Self {
        Self {
            provider: "mysql".to_string(),
            ..Self::default()
        }
    }

    fn is_postgresql(&self) -> bool {
        self.provider == "postgresql"
    }
}

/// Generates a Prisma schema with one model per table, in dependency order.
///
/// Scalar fields mirror the physical columns, so flattened objects show up
/// as one field per column. Every foreign key becomes a relation field on
/// the owning model plus a back-relation on the referenced one.
pub fn generate(schema: &SchemaDescriptor, options: &PrismaOptions) -> String {
    let relations = relations(schema);

    Prisma {
        schema,
        options,
        relations,
    }
    .to_string()
}

struct Prisma<'a> {
    schema: &'a SchemaDescriptor,
    options: &'a PrismaOptions,
    relations: Vec<Relation<'a>>,
}

/// A foreign key, seen from both of its ends.
struct Relation<'a> {
    name: String,
    owner: &'a TableDescriptor,
    target: &'a TableDescriptor,

    /// The physical column holding the key.
    column: &'a ColumnDescriptor,

    /// Relation field on the owning model.
    field: String,

    /// Relation field on the referenced model.
    back_field: String,
}

fn relations(schema: &SchemaDescriptor) -> Vec<Relation<'_>> {
    let mut relations = vec![];

    for owner in schema.ordered_tables() {
        let columns = schema.flat_columns(&owner.name);
        let scalars: HashSet<String> = columns
            .iter()
            .map(|column| util::field_name(column.name()))
            .collect();

        for flat in columns {
            if flat.is_json() {
                continue;
            }

            let Some(fk) = &flat.column.foreign_key else {
                continue;
            };

            let Some(target) = schema.table(&fk.table) else {
                tracing::debug!(
                    table = %owner.name,
                    column = %flat.name(),
                    references = %fk.table,
                    "foreign key target is not a model; skipping relation"
                );
                continue;
            };

            let base = flat
                .name()
                .strip_suffix("_id")
                .filter(|base| !base.is_empty())
                .unwrap_or(flat.name());

            let mut field = util::field_name(base);
            if scalars.contains(&field) {
                field.push_str("Ref");
            }

            let name = format!(
                "{}{}{}",
                util::type_name(schema, &owner.name),
                util::type_name(schema, &target.name),
                upper_camel_case(&field)
            );

            relations.push(Relation {
                name,
                owner,
                target,
                column: &flat.column,
                field,
                back_field: String::new(),
            });
        }
    }

    let back_fields: Vec<String> = relations
        .iter()
        .map(|relation| {
            let base = util::value_name(schema, &relation.owner.name);

            let ambiguous = relations
                .iter()
                .filter(|other| {
                    other.owner.name == relation.owner.name && other.target.name == relation.target.name
                })
                .count()
                > 1;

            let taken = schema
                .flat_columns(&relation.target.name)
                .iter()
                .any(|column| util::field_name(column.name()) == base)
                || relations
                    .iter()
                    .any(|other| other.owner.name == relation.target.name && other.field == base);

            if ambiguous || taken {
                format!("{base}{}", upper_camel_case(&relation.field))
            } else {
                base
            }
        })
        .collect();

    for (relation, back_field) in relations.iter_mut().zip(back_fields) {
        relation.back_field = back_field;
    }

    relations
}

impl fmt::Display for Prisma<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {HEADER}")?;
        writeln!(f, "// Run `npx prisma format` to align the fields.")?;
        writeln!(f)?;
        writeln!(f, "generator client {{")?;
        writeln!(f, "  provider = {}", util::js_string(&self.options.generator))?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "datasource db {{")?;
        writeln!(f, "  provider = {}", util::js_string(&self.options.provider))?;
        writeln!(f, "  url      = {}", self.options.url)?;
        writeln!(f, "}}")?;

        for descriptor in self.schema.enums() {
            writeln!(f)?;
            self.fmt_enum(f, descriptor)?;
        }

        for table in self.schema.ordered_tables() {
            writeln!(f)?;
            self.fmt_model(f, table)?;
        }

        Ok(())
    }
}

impl Prisma<'_> {
    fn fmt_enum(&self, f: &mut fmt::Formatter<'_>, descriptor: &EnumDescriptor) -> fmt::Result {
        let name = enum_type_name(descriptor);

        writeln!(f, "enum {name} {{")?;

        for value in &descriptor.values {
            let case = enum_case_name(value);

            if case == *value {
                writeln!(f, "  {case}")?;
            } else {
                writeln!(f, "  {case} @map({})", util::js_string(value))?;
            }
        }

        if name != descriptor.name {
            writeln!(f)?;
            writeln!(f, "  @@map({})", util::js_string(&descriptor.name))?;
        }

        writeln!(f, "}}")
    }

    fn fmt_model(&self, f: &mut fmt::Formatter<'_>, table: &TableDescriptor) -> fmt::Result {
        let name = util::type_name(self.schema, &table.name);

        writeln!(f, "model {name} {{")?;

        for column in self.schema.flat_columns(&table.name) {
            writeln!(f, "  {}", self.scalar_field(table, column))?;
        }

        for relation in self.relations.iter().filter(|r| r.owner.name == table.name) {
            let ty = util::type_name(self.schema, &relation.target.name);
            let optional = if relation.column.nullable { "?" } else { "" };

            writeln!(
                f,
                "  {} {ty}{optional} @relation({}, fields: [{}], references: [{}], onDelete: {}, onUpdate: {})",
                relation.field,
                util::js_string(&relation.name),
                util::field_name(&relation.column.name),
                util::field_name(&relation.target.primary_key),
                referential_action(relation.on_delete()),
                referential_action(relation.on_update()),
            )?;
        }

        for relation in self.relations.iter().filter(|r| r.target.name == table.name) {
            let ty = util::type_name(self.schema, &relation.owner.name);
            let arity = if relation.column.unique { "?" } else { "[]" };

            writeln!(
                f,
                "  {} {ty}{arity} @relation({})",
                relation.back_field,
                util::js_string(&relation.name),
            )?;
        }

        let mut attributes: Vec<String> = table.indexes.iter().map(block_index).collect();

        if name != table.name {
            attributes.push(format!("@@map({})", util::js_string(&table.name)));
        }

        if !attributes.is_empty() {
            writeln!(f)?;

            for attribute in attributes {
                writeln!(f, "  {attribute}")?;
            }
        }

        writeln!(f, "}}")
    }

    fn scalar_field(&self, table: &TableDescriptor, flat: &FlatColumn) -> String {
        let column = &flat.column;
        let name = util::field_name(flat.name());
        let is_pk = flat.name().eq_ignore_ascii_case(&table.primary_key);

        let mut field = format!("{name} {}", scalar_type(flat));
        if column.nullable && !is_pk {
            field.push('?');
        }

        let mut attributes = vec![];

        if is_pk {
            attributes.push("@id".to_string());

            if column.ty == Type::Uuid && column.default.is_none() {
                attributes.push("@default(uuid())".to_string());
            }
        }

        if flat.name().eq_ignore_ascii_case("updated_at") {
            attributes.push("@updatedAt".to_string());
        } else if let Some(default) = default_value(column) {
            attributes.push(format!("@default({default})"));
        }

        if column.unique && !is_pk {
            attributes.push("@unique".to_string());
        }

        if name != flat.name() {
            attributes.push(format!("@map({})", util::js_string(flat.name())));
        }

        if self.options.is_postgresql() && !flat.is_json() && !column.encrypted && column.ty == Type::Uuid {
            attributes.push("@db.Uuid".to_string());
        }

        for attribute in attributes {
            field.push(' ');
            field.push_str(&attribute);
        }

        field
    }
}

impl Relation<'_> {
    fn on_delete(&self) -> ForeignKeyAction {
        self.column
            .foreign_key
            .as_ref()
            .map_or(ForeignKeyAction::NoAction, |fk| fk.on_delete)
    }

    fn on_update(&self) -> ForeignKeyAction {
        self.column
            .foreign_key
            .as_ref()
            .map_or(ForeignKeyAction::NoAction, |fk| fk.on_update)
    }
}

fn enum_type_name(descriptor: &EnumDescriptor) -> String {
    Name::new(&descriptor.name).upper_camel_case()
}

fn scalar_type(flat: &FlatColumn) -> String {
    if flat.is_json() {
        return "Json".to_string();
    }

    let column = &flat.column;
    if column.encrypted {
        return "String".to_string();
    }

    match &column.ty {
        Type::String | Type::Uuid => "String".to_string(),
        Type::Integer => "Int".to_string(),
        Type::BigInt => "BigInt".to_string(),
        Type::Boolean => "Boolean".to_string(),
        Type::Double => "Float".to_string(),
        Type::Decimal { .. } => "Decimal".to_string(),
        Type::Timestamp => "DateTime".to_string(),
        Type::Enum(descriptor) => enum_type_name(descriptor),
        Type::Object | Type::Array => "Json".to_string(),
    }
}

fn default_value(column: &ColumnDescriptor) -> Option<String> {
    match column.default.as_ref()? {
        DefaultValue::Now => Some("now()".to_string()),
        DefaultValue::Sql(sql) => Some(format!("dbgenerated({})", util::js_string(sql))),
        DefaultValue::Value(value) => match value {
            Value::Null => None,
            Value::Bool(value) => Some(value.to_string()),
            Value::I64(value) => Some(value.to_string()),
            Value::F64(value) if value.is_finite() => Some(value.to_string()),
            Value::F64(_) => None,
            Value::String(value) if column.enum_ref().is_some() => Some(enum_case_name(value)),
            Value::String(value) | Value::Timestamp(value) => Some(util::js_string(value)),
        },
    }
}

fn block_index(index: &IndexDescriptor) -> String {
    let fields: Vec<String> = index
        .columns
        .iter()
        .map(|column| {
            let name = util::field_name(&column.name);
            if column.order.is_desc() {
                format!("{name}(sort: Desc)")
            } else {
                name
            }
        })
        .collect();

    let kind = if index.unique { "@@unique" } else { "@@index" };

    format!(
        "{kind}([{}], map: {})",
        fields.join(", "),
        util::js_string(&index.name)
    )
}

fn referential_action(action: ForeignKeyAction) -> &'static str {
    match action {
        ForeignKeyAction::Cascade => "Cascade",
        ForeignKeyAction::Restrict => "Restrict",
        ForeignKeyAction::SetNull => "SetNull",
        ForeignKeyAction::SetDefault => "SetDefault",
        ForeignKeyAction::NoAction => "NoAction",
    }
}
