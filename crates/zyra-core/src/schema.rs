mod builder;
pub use builder::Builder;

mod column;
pub use column::{ColumnDescriptor, DefaultValue};

pub mod constraint;
pub use constraint::{Constraint, Format, LetterCase, Parity, Sign};

mod enum_ty;
pub use enum_ty::EnumDescriptor;

mod fk;
pub use fk::{ForeignKeyAction, ForeignKeyReference};

mod flatten;
pub use flatten::{FlatColumn, Storage, MAX_NESTING_DEPTH};

mod index;
pub use index::{IndexColumn, IndexDescriptor, IndexOrder};

mod many_to_many;
pub use many_to_many::ManyToManyMarker;

mod name;
pub use name::Name;

mod nested;
pub use nested::{NestedFieldSchema, Relationship, StorageStrategy};

mod order;

mod table;
pub use table::{TableBuilder, TableDescriptor};

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod verify;

use crate::{rls::RlsConfig, Diagnostics, Result, Warning};

/// A complete, validated schema.
///
/// Building a schema resolves relationships into join and child tables,
/// computes the physical column layout of every table, checks foreign keys
/// and orders tables so that referenced tables come first. All of it happens
/// once, in [`Builder::build`]; the descriptor is read-only afterwards.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    /// Declared tables, then join tables, then separate tables.
    tables: Vec<TableDescriptor>,

    /// Number of declared tables at the front of `tables`.
    declared: usize,

    /// Number of join tables following the declared ones.
    joins: usize,

    enums: Vec<EnumDescriptor>,
    db_prefix: String,
    rls: RlsConfig,

    /// Physical column layout of each table, parallel to `tables`.
    layouts: Vec<Vec<FlatColumn>>,

    /// Indices into `tables`, referenced tables first.
    order: Vec<usize>,

    diagnostics: Diagnostics,
}

/// Where a table of the schema comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Declared by the caller.
    Declared,

    /// Synthesized for a many-to-many relationship.
    Join,

    /// Synthesized to store a nested structure.
    Separate,
}

impl SchemaDescriptor {
    pub fn new(
        tables: impl IntoIterator<Item = TableDescriptor>,
        enums: impl IntoIterator<Item = EnumDescriptor>,
        db_prefix: impl Into<String>,
    ) -> Result<Self> {
        Builder::new().db_prefix(db_prefix).enums(enums).build(tables)
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    /// The declared tables, in declaration order.
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables[..self.declared]
    }

    pub fn join_tables(&self) -> &[TableDescriptor] {
        &self.tables[self.declared..self.declared + self.joins]
    }

    pub fn separate_tables(&self) -> &[TableDescriptor] {
        &self.tables[self.declared + self.joins..]
    }

    /// Declared, join and separate tables.
    pub fn all_tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Every table in dependency order: a table comes after the tables its
    /// foreign keys reference, unless the references form a cycle.
    pub fn ordered_tables(&self) -> impl Iterator<Item = &TableDescriptor> + '_ {
        self.order.iter().map(|&index| &self.tables[index])
    }

    /// Enums used anywhere in the schema, sorted by name.
    pub fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    pub fn db_prefix(&self) -> &str {
        &self.db_prefix
    }

    pub fn rls_config(&self) -> &RlsConfig {
        &self.rls
    }

    /// Finds a table by its full name, or by its name without the database
    /// prefix.
    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.table_index(name).map(|index| &self.tables[index])
    }

    pub fn table_kind(&self, name: &str) -> Option<TableKind> {
        self.table_index(name).map(|index| {
            if index < self.declared {
                TableKind::Declared
            } else if index < self.declared + self.joins {
                TableKind::Join
            } else {
                TableKind::Separate
            }
        })
    }

    /// The physical columns of `table` after nested structures have been
    /// expanded. Empty for unknown tables.
    pub fn flat_columns(&self, table: &str) -> &[FlatColumn] {
        self.table_index(table)
            .map(|index| self.layouts[index].as_slice())
            .unwrap_or_default()
    }

    /// The table name with the database prefix removed.
    pub fn stripped_name<'a>(&self, table: &'a str) -> &'a str {
        std_util::str::strip_prefix(table, &self.db_prefix)
    }

    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn table_index(&self, name: &str) -> Option<usize> {
        self.tables
            .iter()
            .position(|table| table.name == name)
            .or_else(|| {
                if self.db_prefix.is_empty() {
                    return None;
                }
                let prefixed = format!("{}{name}", self.db_prefix);
                self.tables.iter().position(|table| table.name == prefixed)
            })
    }
}
