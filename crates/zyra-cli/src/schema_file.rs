use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use zyra_core::rls::{Match, Operation, OwnershipPolicy, PolicyBuilder, RlsConfig, RlsPolicyRule};
use zyra_core::schema::{
    ColumnDescriptor, EnumDescriptor, ForeignKeyAction, ForeignKeyReference, Format, IndexDescriptor,
    ManyToManyMarker, Relationship, StorageStrategy, TableDescriptor, Type, Value,
};
use zyra_core::{Error, SchemaDescriptor};

/// A schema definition file.
///
/// ```toml
/// db_prefix = "app_"
///
/// [[enums]]
/// name = "book_status"
/// values = ["draft", "published"]
///
/// [[tables]]
/// name = "books"
///
/// [[tables.columns]]
/// name = "author_id"
/// type = "uuid"
/// references = "authors"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub db_prefix: String,

    #[serde(default)]
    pub enums: Vec<EnumDef>,

    #[serde(default)]
    pub tables: Vec<TableDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDef {
    pub name: String,
    pub primary_key: Option<String>,
    pub default_order_by: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnDef>,

    #[serde(default)]
    pub indexes: Vec<IndexDef>,

    pub rls: Option<RlsDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnDef {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    pub nullable: bool,
    pub unique: bool,
    pub encrypted: bool,

    pub default: Option<toml::Value>,
    pub default_now: bool,
    pub default_sql: Option<String>,
    pub check: Option<String>,

    /// Decimal precision and scale.
    pub precision: Option<u32>,
    pub scale: Option<u32>,

    /// Name of an enum declared in `[[enums]]`.
    #[serde(rename = "enum")]
    pub enum_name: Option<String>,

    /// Values of an enum declared inline, named after `enum_name` or the
    /// column.
    pub values: Option<Vec<String>>,

    pub references: Option<String>,
    pub references_column: Option<String>,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,

    /// Object fields.
    pub fields: Vec<ColumnDef>,

    /// Array element.
    pub element: Option<Box<ColumnDef>>,

    /// `flattened`, `inline_json` or `separate_table`.
    pub storage: Option<String>,
    pub prefix: Option<String>,
    pub table: Option<String>,
    pub relationship: Option<String>,

    pub many_to_many: Option<ManyToManyDef>,

    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub length: Option<u64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub int_min: Option<i64>,
    pub int_max: Option<i64>,
    pub positive: bool,
    pub negative: bool,
    pub even: bool,
    pub odd: bool,
    pub pattern: Option<String>,
    pub pattern_message: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub includes: Option<String>,

    /// `upper` or `lower`.
    pub case: Option<String>,
    pub format: Option<String>,
    pub custom: Option<CustomDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManyToManyDef {
    pub target: String,
    pub join_table: Option<String>,
    pub source_column: Option<String>,
    pub target_column: Option<String>,
    pub source_on_delete: Option<String>,
    pub source_on_update: Option<String>,
    pub target_on_delete: Option<String>,
    pub target_on_update: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomDef {
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexDef {
    pub name: String,

    /// Column names, each optionally followed by `ASC` or `DESC`.
    pub columns: Vec<String>,

    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RlsDef {
    pub owner_column: Option<String>,

    /// Ownership rules: `access_own`, `read_own`, `insert_own`,
    /// `update_own`, `delete_own`, `own_or_roles` and `public_read`.
    pub rules: Vec<String>,

    /// Roles used by `own_or_roles`.
    pub roles: Vec<String>,

    pub policies: Vec<PolicyDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyDef {
    pub who: Vec<String>,
    pub access: Vec<String>,

    /// `own_row` (default) or `always`.
    #[serde(rename = "match")]
    pub matching: Option<String>,

    /// Raw SQL row match, taking precedence over `match`.
    pub sql: Option<String>,

    pub restrictive: bool,
}

impl SchemaFile {
    /// Load a schema file from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        contents.parse()
    }

    /// Lowers the file into descriptors and builds the schema.
    pub fn into_schema(&self, rls: &RlsConfig) -> zyra_core::Result<SchemaDescriptor> {
        let enums: HashMap<&str, &EnumDef> = self
            .enums
            .iter()
            .map(|descriptor| (descriptor.name.as_str(), descriptor))
            .collect();

        let lower = Lower { enums, rls };

        let tables = self
            .tables
            .iter()
            .map(|table| lower.table(table))
            .collect::<zyra_core::Result<Vec<_>>>()?;

        SchemaDescriptor::builder()
            .db_prefix(&self.db_prefix)
            .enums(
                self.enums
                    .iter()
                    .map(|descriptor| EnumDescriptor::new(&descriptor.name, &descriptor.values)),
            )
            .rls_config(rls.clone())
            .build(tables)
    }
}

impl FromStr for SchemaFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

struct Lower<'a> {
    enums: HashMap<&'a str, &'a EnumDef>,
    rls: &'a RlsConfig,
}

impl Lower<'_> {
    fn table(&self, def: &TableDef) -> zyra_core::Result<TableDescriptor> {
        let mut builder = TableDescriptor::builder(&def.name);

        if let Some(primary_key) = &def.primary_key {
            builder = builder.primary_key(primary_key);
        }

        if let Some(order_by) = &def.default_order_by {
            builder = builder.default_order_by(order_by);
        }

        for column in &def.columns {
            let column = self
                .column(column)
                .map_err(|err| err.context(Error::invalid_schema(format!("table `{}`", def.name))))?;
            builder = builder.column(column);
        }

        for index in &def.indexes {
            builder = builder.index(index_descriptor(index));
        }

        if let Some(rls) = &def.rls {
            builder = builder.rls_policies(self.policies(&def.name, rls)?);
        }

        Ok(builder.build())
    }

    fn column(&self, def: &ColumnDef) -> zyra_core::Result<ColumnDescriptor> {
        let invalid = |message: String| Error::invalid_schema(format!("column `{}`: {message}", def.name));

        if def.name.is_empty() {
            return Err(Error::invalid_schema("column without a name"));
        }

        let mut column = match def.ty.to_ascii_lowercase().as_str() {
            "string" | "text" => ColumnDescriptor::string(&def.name),
            "integer" | "int" => ColumnDescriptor::integer(&def.name),
            "bigint" => ColumnDescriptor::bigint(&def.name),
            "boolean" | "bool" => ColumnDescriptor::boolean(&def.name),
            "double" | "float" => ColumnDescriptor::double(&def.name),
            "decimal" => ColumnDescriptor::decimal(
                &def.name,
                def.precision.unwrap_or(10),
                def.scale.unwrap_or(2),
            ),
            "uuid" => ColumnDescriptor::uuid(&def.name),
            "timestamp" | "date" => ColumnDescriptor::timestamp(&def.name),
            "enum" => ColumnDescriptor::enumeration(&def.name, self.enum_descriptor(def)?),
            "object" => {
                let fields = def
                    .fields
                    .iter()
                    .map(|field| self.column(field))
                    .collect::<zyra_core::Result<Vec<_>>>()?;
                ColumnDescriptor::object(&def.name, fields)
            }
            "array" => match &def.element {
                Some(element) => ColumnDescriptor::array(&def.name, self.column(element)?),
                None => ColumnDescriptor::new(&def.name, Type::Array),
            },
            other => return Err(invalid(format!("unknown type `{other}`"))),
        };

        if def.nullable {
            column = column.nullable();
        }
        if def.unique {
            column = column.unique();
        }
        if def.encrypted {
            column = column.encrypted();
        }

        if def.default_now {
            column = column.default_now();
        } else if let Some(sql) = &def.default_sql {
            column = column.default_sql(sql);
        } else if let Some(default) = &def.default {
            column = column.default(value(default).ok_or_else(|| invalid("unsupported default value".into()))?);
        }

        if let Some(check) = &def.check {
            column = column.check(check);
        }

        if let Some(table) = &def.references {
            let mut fk = match &def.references_column {
                Some(referenced) => ForeignKeyReference::to_column(table, referenced),
                None => ForeignKeyReference::new(table),
            };
            if let Some(action) = &def.on_delete {
                fk = fk.on_delete(action_or(action, &invalid)?);
            }
            if let Some(action) = &def.on_update {
                fk = fk.on_update(action_or(action, &invalid)?);
            }
            column = column.foreign_key(fk);
        }

        if let Some(storage) = &def.storage {
            column = column.strategy(match storage.as_str() {
                "flattened" => StorageStrategy::Flattened {
                    prefix: def.prefix.clone(),
                },
                "inline_json" | "json" => StorageStrategy::InlineJson,
                "separate_table" => StorageStrategy::SeparateTable {
                    name: def.table.clone(),
                    relationship: match def.relationship.as_deref() {
                        None | Some("one_to_many") => Relationship::OneToMany,
                        Some("one_to_one") => Relationship::OneToOne,
                        Some(other) => return Err(invalid(format!("unknown relationship `{other}`"))),
                    },
                },
                other => return Err(invalid(format!("unknown storage strategy `{other}`"))),
            });
        }

        if let Some(def) = &def.many_to_many {
            column = column.many_to_many(self.many_to_many(def, &invalid)?);
        }

        self.constraints(def, column, &invalid)
    }

    fn constraints(
        &self,
        def: &ColumnDef,
        mut column: ColumnDescriptor,
        invalid: &dyn Fn(String) -> Error,
    ) -> zyra_core::Result<ColumnDescriptor> {
        if let Some(min) = def.min_length {
            column = column.min_length(min);
        }
        if let Some(max) = def.max_length {
            column = column.max_length(max);
        }
        if let Some(exact) = def.length {
            column = column.length(exact);
        }
        if let Some(min) = def.min {
            column = column.min(min);
        }
        if let Some(max) = def.max {
            column = column.max(max);
        }
        if let Some(min) = def.int_min {
            column = column.int_min(min);
        }
        if let Some(max) = def.int_max {
            column = column.int_max(max);
        }
        if def.positive {
            column = column.positive();
        }
        if def.negative {
            column = column.negative();
        }
        if def.even {
            column = column.even();
        }
        if def.odd {
            column = column.odd();
        }
        if let Some(pattern) = &def.pattern {
            column = match &def.pattern_message {
                Some(message) => column.pattern_with_message(pattern, message),
                None => column.pattern(pattern),
            };
        }
        if let Some(prefix) = &def.starts_with {
            column = column.starts_with(prefix);
        }
        if let Some(suffix) = &def.ends_with {
            column = column.ends_with(suffix);
        }
        if let Some(needle) = &def.includes {
            column = column.includes(needle);
        }
        match def.case.as_deref() {
            None => {}
            Some("upper") => column = column.uppercase(),
            Some("lower") => column = column.lowercase(),
            Some(other) => return Err(invalid(format!("unknown case `{other}`"))),
        }
        if let Some(format) = &def.format {
            let parsed = parse_format(format).ok_or_else(|| invalid(format!("unknown format `{format}`")))?;
            column = column.format(parsed);
        }
        if let Some(custom) = &def.custom {
            column = column.custom(&custom.rule, &custom.message);
        }

        Ok(column)
    }

    fn enum_descriptor(&self, def: &ColumnDef) -> zyra_core::Result<EnumDescriptor> {
        if let Some(values) = &def.values {
            let name = def.enum_name.as_deref().unwrap_or(&def.name);
            return Ok(EnumDescriptor::new(name, values));
        }

        let Some(name) = &def.enum_name else {
            return Err(Error::invalid_schema(format!(
                "column `{}`: enum columns need `enum` or `values`",
                def.name
            )));
        };

        match self.enums.get(name.as_str()) {
            Some(descriptor) => Ok(EnumDescriptor::new(&descriptor.name, &descriptor.values)),
            None => Err(Error::invalid_schema(format!(
                "column `{}`: unknown enum `{name}`",
                def.name
            ))),
        }
    }

    fn many_to_many(
        &self,
        def: &ManyToManyDef,
        invalid: &dyn Fn(String) -> Error,
    ) -> zyra_core::Result<ManyToManyMarker> {
        let mut marker = ManyToManyMarker::new(&def.target);

        if let Some(name) = &def.join_table {
            marker = marker.join_table_name(name);
        }
        if let Some(name) = &def.source_column {
            marker = marker.source_column_name(name);
        }
        if let Some(name) = &def.target_column {
            marker = marker.target_column_name(name);
        }
        if let Some(action) = &def.source_on_delete {
            marker = marker.source_on_delete(action_or(action, invalid)?);
        }
        if let Some(action) = &def.source_on_update {
            marker = marker.source_on_update(action_or(action, invalid)?);
        }
        if let Some(action) = &def.target_on_delete {
            marker = marker.target_on_delete(action_or(action, invalid)?);
        }
        if let Some(action) = &def.target_on_update {
            marker = marker.target_on_update(action_or(action, invalid)?);
        }

        let columns = def
            .columns
            .iter()
            .map(|column| self.column(column))
            .collect::<zyra_core::Result<Vec<_>>>()?;

        Ok(marker.additional_columns(columns))
    }

    fn policies(&self, table: &str, def: &RlsDef) -> zyra_core::Result<Vec<RlsPolicyRule>> {
        let invalid = |message: String| Error::invalid_schema(format!("table `{table}`: {message}"));

        let mut ownership = OwnershipPolicy::new(table, self.rls);
        if let Some(column) = &def.owner_column {
            ownership = ownership.owner_column(column);
        }

        for rule in &def.rules {
            ownership = match rule.as_str() {
                "access_own" => ownership.can_access_own(),
                "read_own" => ownership.can_read_own(),
                "insert_own" => ownership.can_insert_own(),
                "update_own" => ownership.can_update_own(),
                "delete_own" => ownership.can_delete_own(),
                "own_or_roles" => ownership.can_access_own_or_roles(&def.roles),
                "public_read" => ownership.public_read(),
                other => return Err(invalid(format!("unknown policy rule `{other}`"))),
            };
        }

        let mut policies = ownership.build();

        for policy in &def.policies {
            let operations = policy
                .access
                .iter()
                .map(|op| Operation::parse(op).ok_or_else(|| invalid(format!("unknown operation `{op}`"))))
                .collect::<zyra_core::Result<Vec<_>>>()?;

            let matching = match (&policy.sql, policy.matching.as_deref()) {
                (Some(sql), _) => Match::Sql(sql.clone()),
                (None, None | Some("own_row")) => Match::OwnRow,
                (None, Some("always")) => Match::Always,
                (None, Some(other)) => return Err(invalid(format!("unknown match `{other}`"))),
            };

            let mut builder = PolicyBuilder::new(table, self.rls)
                .who(policy.who.iter().cloned())
                .access(operations)
                .matching(matching);

            if policy.restrictive {
                builder = builder.restrictive();
            }

            policies.extend(builder.build());
        }

        Ok(policies)
    }
}

fn index_descriptor(def: &IndexDef) -> IndexDescriptor {
    let mut index = IndexDescriptor::new(&def.name);

    for column in &def.columns {
        let mut parts = column.split_whitespace();
        let name = parts.next().unwrap_or_default();

        index = match parts.next() {
            Some(order) if order.eq_ignore_ascii_case("desc") => index.column_desc(name),
            _ => index.column(name),
        };
    }

    if def.unique {
        index = index.unique();
    }

    index
}

fn value(src: &toml::Value) -> Option<Value> {
    match src {
        toml::Value::String(value) => Some(Value::from(value.as_str())),
        toml::Value::Integer(value) => Some(Value::from(*value)),
        toml::Value::Float(value) => Some(Value::from(*value)),
        toml::Value::Boolean(value) => Some(Value::from(*value)),
        toml::Value::Datetime(value) => Some(Value::Timestamp(value.to_string())),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

fn action_or(src: &str, invalid: &dyn Fn(String) -> Error) -> zyra_core::Result<ForeignKeyAction> {
    ForeignKeyAction::parse(src).ok_or_else(|| invalid(format!("unknown referential action `{src}`")))
}

fn parse_format(src: &str) -> Option<Format> {
    let normalized: String = src
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    Some(match normalized.as_str() {
        "email" => Format::Email,
        "url" => Format::Url,
        "httpurl" => Format::HttpUrl,
        "uuid" => Format::Uuid,
        "cuid" => Format::Cuid,
        "cuid2" => Format::Cuid2,
        "nanoid" => Format::Nanoid,
        "emoji" => Format::Emoji,
        "hex" => Format::Hex,
        "jwt" => Format::Jwt,
        "date" => Format::Date,
        "time" => Format::Time,
        "isodatetime" | "datetime" => Format::IsoDateTime,
        "isodate" => Format::IsoDate,
        "isotime" => Format::IsoTime,
        "ipv4" => Format::Ipv4,
        "ipv6" => Format::Ipv6,
        _ => return None,
    })
}
