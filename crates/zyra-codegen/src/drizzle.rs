use crate::util::{self, HEADER};

use zyra_core::schema::{
    DefaultValue, EnumDescriptor, FlatColumn, ForeignKeyAction, IndexDescriptor, Name,
    TableDescriptor, Type, Value,
};
use zyra_core::SchemaDescriptor;

use std::collections::BTreeSet;
use std::fmt;

/// Longest string MySQL stores as `varchar`.
const MYSQL_VARCHAR_LIMIT: u64 = 65_535;

/// SQL dialect a Drizzle schema is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    Postgresql,
    Mysql,
}

impl Dialect {
    pub fn parse(src: &str) -> Option<Self> {
        match src.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Some(Dialect::Postgresql),
            "mysql" => Some(Dialect::Mysql),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
        }
    }

    fn module(self) -> &'static str {
        match self {
            Dialect::Postgresql => "drizzle-orm/pg-core",
            Dialect::Mysql => "drizzle-orm/mysql-core",
        }
    }

    fn table_fn(self) -> &'static str {
        match self {
            Dialect::Postgresql => "pgTable",
            Dialect::Mysql => "mysqlTable",
        }
    }

    fn any_column(self) -> &'static str {
        match self {
            Dialect::Postgresql => "AnyPgColumn",
            Dialect::Mysql => "AnyMySqlColumn",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrizzleOptions {
    pub dialect: Dialect,
}

impl DrizzleOptions {
    pub fn mysql() -> Self {
        Self {
            dialect: Dialect::Mysql,
        }
    }
}

/// Generates a Drizzle ORM schema module.
///
/// PostgreSQL enums become `pgEnum` declarations; MySQL enums are inlined
/// on their columns. Tables follow in dependency order, one property per
/// physical column, with foreign keys as `.references()` and declared
/// indexes and checks in the table's extra config. A `schema` object
/// collecting every table closes the module.
pub fn generate(schema: &SchemaDescriptor, options: &DrizzleOptions) -> String {
    let mut render = Render {
        schema,
        dialect: options.dialect,
        imports: Imports::default(),
    };

    let enums: Vec<String> = match options.dialect {
        Dialect::Postgresql => schema.enums().iter().map(|e| render.pg_enum(e)).collect(),
        Dialect::Mysql => vec![],
    };

    let mut tables = vec![];
    let mut names = vec![];

    for table in schema.ordered_tables() {
        tables.push(render.table(table));
        names.push(util::value_name(schema, &table.name));
    }

    tracing::debug!(
        dialect = options.dialect.as_str(),
        tables = tables.len(),
        enums = enums.len(),
        "generated drizzle schema"
    );

    Drizzle {
        dialect: options.dialect,
        imports: render.imports,
        enums,
        tables,
        names,
    }
    .to_string()
}

#[derive(Default)]
struct Imports {
    /// Builders imported from the dialect module.
    core: BTreeSet<&'static str>,

    /// `sql` from `drizzle-orm`.
    sql: bool,

    /// The column type needed by self references.
    any_column: bool,
}

struct Render<'a> {
    schema: &'a SchemaDescriptor,
    dialect: Dialect,
    imports: Imports,
}

impl Render<'_> {
    fn pg_enum(&mut self, descriptor: &EnumDescriptor) -> String {
        self.imports.core.insert("pgEnum");

        let values: Vec<String> = descriptor.values.iter().map(|v| util::js_string(v)).collect();

        format!(
            "export const {} = pgEnum({}, [{}]);",
            enum_var(descriptor),
            util::js_string(&descriptor.name),
            values.join(", ")
        )
    }

    fn table(&mut self, table: &TableDescriptor) -> String {
        let table_fn = self.dialect.table_fn();
        self.imports.core.insert(table_fn);

        let mut out = format!(
            "export const {} = {table_fn}({}, {{\n",
            util::value_name(self.schema, &table.name),
            util::js_string(&table.name)
        );

        let schema = self.schema;

        for flat in schema.flat_columns(&table.name) {
            out.push_str("  ");
            out.push_str(&key(flat.name()));
            out.push_str(": ");
            out.push_str(&self.column(table, flat));
            out.push_str(",\n");
        }

        out.push('}');

        let extras = self.extras(table);
        if !extras.is_empty() {
            out.push_str(", (table) => [\n");
            for extra in extras {
                out.push_str("  ");
                out.push_str(&extra);
                out.push_str(",\n");
            }
            out.push(']');
        }

        out.push_str(");");
        out
    }

    fn column(&mut self, table: &TableDescriptor, flat: &FlatColumn) -> String {
        let column = &flat.column;
        let is_pk = flat.name().eq_ignore_ascii_case(&table.primary_key);
        let mut expr = self.base(flat, is_pk);

        if is_pk {
            expr.push_str(".primaryKey()");
        } else if !column.nullable {
            expr.push_str(".notNull()");
        }

        if column.unique && !is_pk {
            expr.push_str(".unique()");
        }

        if is_pk && column.ty == Type::Uuid && column.default.is_none() && !flat.is_json() {
            expr.push_str(match self.dialect {
                Dialect::Postgresql => ".defaultRandom()",
                Dialect::Mysql => ".$defaultFn(() => crypto.randomUUID())",
            });
        }

        if let Some(default) = self.default(flat) {
            expr.push_str(&default);
        }

        if flat.name().eq_ignore_ascii_case("updated_at") {
            expr.push_str(".$onUpdate(() => new Date())");
        }

        if let Some(reference) = self.reference(table, flat) {
            expr.push_str(&reference);
        }

        expr
    }

    fn base(&mut self, flat: &FlatColumn, is_pk: bool) -> String {
        let column = &flat.column;
        let name = util::js_string(flat.name());
        let pg = self.dialect == Dialect::Postgresql;
        let keyed = is_pk || column.is_keyed();

        if flat.is_json() {
            return self.builder(if pg { "jsonb" } else { "json" }, &name, None);
        }

        if column.encrypted {
            return self.string(flat, &name, keyed);
        }

        match &column.ty {
            Type::String => self.string(flat, &name, keyed),
            Type::Integer => self.builder(if pg { "integer" } else { "int" }, &name, None),
            Type::BigInt => self.builder("bigint", &name, Some("{ mode: \"number\" }")),
            Type::Boolean => self.builder("boolean", &name, None),
            Type::Double => self.builder(if pg { "doublePrecision" } else { "double" }, &name, None),
            Type::Decimal { precision, scale } => {
                let config = format!("{{ precision: {precision}, scale: {scale} }}");
                self.builder(if pg { "numeric" } else { "decimal" }, &name, Some(&config))
            }
            Type::Uuid if pg => self.builder("uuid", &name, None),
            Type::Uuid => self.builder("varchar", &name, Some("{ length: 36 }")),
            Type::Timestamp if pg => self.builder("timestamp", &name, Some("{ withTimezone: true }")),
            Type::Timestamp => self.builder("datetime", &name, None),
            Type::Enum(descriptor) if pg => format!("{}({name})", enum_var(descriptor)),
            Type::Enum(descriptor) => {
                let values: Vec<String> =
                    descriptor.values.iter().map(|v| util::js_string(v)).collect();
                self.builder("mysqlEnum", &name, Some(&format!("[{}]", values.join(", "))))
            }
            Type::Object | Type::Array => self.builder(if pg { "jsonb" } else { "json" }, &name, None),
        }
    }

    /// Strings follow the DDL storage rules: `text` on PostgreSQL, `varchar`
    /// on MySQL when bounded or keyed.
    fn string(&mut self, flat: &FlatColumn, name: &str, keyed: bool) -> String {
        let column = &flat.column;

        if self.dialect == Dialect::Postgresql {
            return self.builder("text", name, None);
        }

        let bounded = column
            .max_len()
            .filter(|len| *len <= MYSQL_VARCHAR_LIMIT)
            .filter(|_| !column.encrypted);

        match bounded {
            Some(len) => self.builder("varchar", name, Some(&format!("{{ length: {len} }}"))),
            None if keyed || (!column.encrypted && column.default.is_some()) => {
                self.builder("varchar", name, Some("{ length: 255 }"))
            }
            None => self.builder("text", name, None),
        }
    }

    fn builder(&mut self, function: &'static str, name: &str, config: Option<&str>) -> String {
        self.imports.core.insert(function);

        match config {
            Some(config) => format!("{function}({name}, {config})"),
            None => format!("{function}({name})"),
        }
    }

    fn default(&mut self, flat: &FlatColumn) -> Option<String> {
        let column = &flat.column;

        if flat.name().eq_ignore_ascii_case("updated_at") && column.default.is_some() {
            return Some(self.default_now());
        }

        match column.default.as_ref()? {
            DefaultValue::Now => Some(self.default_now()),
            DefaultValue::Sql(sql) => {
                self.imports.sql = true;
                Some(format!(".default(sql`{}`)", template_literal(sql)))
            }
            DefaultValue::Value(value) => match value {
                Value::Null => None,
                Value::Bool(value) => Some(format!(".default({value})")),
                Value::I64(value) => Some(format!(".default({value})")),
                Value::F64(value) if value.is_finite() => Some(format!(".default({value})")),
                Value::F64(_) => None,
                Value::String(value) => Some(format!(".default({})", util::js_string(value))),
                Value::Timestamp(value) => {
                    Some(format!(".default(new Date({}))", util::js_string(value)))
                }
            },
        }
    }

    fn default_now(&mut self) -> String {
        match self.dialect {
            Dialect::Postgresql => ".defaultNow()".to_string(),
            Dialect::Mysql => {
                self.imports.sql = true;
                ".default(sql`CURRENT_TIMESTAMP`)".to_string()
            }
        }
    }

    fn reference(&mut self, table: &TableDescriptor, flat: &FlatColumn) -> Option<String> {
        if flat.is_json() {
            return None;
        }

        let fk = flat.column.foreign_key.as_ref()?;
        let target = self.schema.table(&fk.table)?;

        let target_var = util::value_name(self.schema, &target.name);
        let target_column = member(&target_var, &fk.column);

        let thunk = if target.name == table.name {
            self.imports.any_column = true;
            format!("(): {} => {target_column}", self.dialect.any_column())
        } else {
            format!("() => {target_column}")
        };

        Some(format!(
            ".references({thunk}, {{ onDelete: {}, onUpdate: {} }})",
            util::js_string(action(fk.on_delete)),
            util::js_string(action(fk.on_update)),
        ))
    }

    fn extras(&mut self, table: &TableDescriptor) -> Vec<String> {
        let mut extras: Vec<String> = table.indexes.iter().map(|index| self.index(index)).collect();

        let schema = self.schema;

        for flat in schema.flat_columns(&table.name) {
            let Some(check) = &flat.column.check else {
                continue;
            };

            self.imports.core.insert("check");
            self.imports.sql = true;

            extras.push(format!(
                "check({}, sql`{}`)",
                util::js_string(&format!("{}_{}_check", table.name, flat.name())),
                template_literal(check)
            ));
        }

        extras
    }

    fn index(&mut self, index: &IndexDescriptor) -> String {
        let function = if index.unique { "uniqueIndex" } else { "index" };
        self.imports.core.insert(function);

        let columns: Vec<String> = index
            .columns
            .iter()
            .map(|column| {
                let column_ref = member("table", &column.name);
                if column.order.is_desc() && self.dialect == Dialect::Postgresql {
                    format!("{column_ref}.desc()")
                } else {
                    column_ref
                }
            })
            .collect();

        format!(
            "{function}({}).on({})",
            util::js_string(&index.name),
            columns.join(", ")
        )
    }
}

struct Drizzle {
    dialect: Dialect,
    imports: Imports,
    enums: Vec<String>,
    tables: Vec<String>,
    names: Vec<String>,
}

impl fmt::Display for Drizzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {HEADER}")?;

        if self.imports.sql {
            writeln!(f, "import {{ sql }} from \"drizzle-orm\";")?;
        }

        let mut core: Vec<String> = vec![];
        if self.imports.any_column {
            core.push(format!("type {}", self.dialect.any_column()));
        }
        core.extend(self.imports.core.iter().map(|name| name.to_string()));

        writeln!(
            f,
            "import {{ {} }} from {};",
            core.join(", "),
            util::js_string(self.dialect.module())
        )?;

        if !self.enums.is_empty() {
            writeln!(f)?;
            for declaration in &self.enums {
                writeln!(f, "{declaration}")?;
            }
        }

        for table in &self.tables {
            writeln!(f)?;
            writeln!(f, "{table}")?;
        }

        writeln!(f)?;
        writeln!(f, "export const schema = {{ {} }};", self.names.join(", "))
    }
}

fn enum_var(descriptor: &EnumDescriptor) -> String {
    format!("{}Enum", Name::new(&descriptor.name).camel_case())
}

/// The property name for a column: its camelCase name, quoted when it is
/// not an identifier.
fn key(column: &str) -> String {
    let name = util::field_name(column);

    if util::is_js_identifier(&name) {
        name
    } else {
        util::js_string(&name)
    }
}

/// Property access on `object` for `column`.
fn member(object: &str, column: &str) -> String {
    let name = util::field_name(column);

    if util::is_js_identifier(&name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{}]", util::js_string(&name))
    }
}

/// Escapes `src` for use inside a JavaScript template literal.
fn template_literal(src: &str) -> String {
    src.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn action(action: ForeignKeyAction) -> &'static str {
    match action {
        ForeignKeyAction::Cascade => "cascade",
        ForeignKeyAction::Restrict => "restrict",
        ForeignKeyAction::SetNull => "set null",
        ForeignKeyAction::SetDefault => "set default",
        ForeignKeyAction::NoAction => "no action",
    }
}
