use super::{ColumnDescriptor, EnumDescriptor, ForeignKeyReference, IndexDescriptor, MAX_NESTING_DEPTH};
use crate::{rls::RlsPolicyRule, Diagnostics, Warning};

use std::collections::{BTreeSet, HashSet};

/// A table: its columns plus the standard columns every table carries.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    /// The table name, including any database prefix.
    pub name: String,

    /// Name of the primary key column.
    pub primary_key: String,

    /// SQL ordering used when listing rows.
    pub default_order_by: String,

    /// Columns in declaration order, standard columns included.
    pub columns: Vec<ColumnDescriptor>,

    pub indexes: Vec<IndexDescriptor>,

    /// Row level security policies, used unless the table is a users table.
    pub rls_policies: Vec<RlsPolicyRule>,

    diagnostics: Diagnostics,
}

/// Assembles a [`TableDescriptor`].
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    primary_key: String,
    default_order_by: String,
    columns: Vec<ColumnDescriptor>,
    indexes: Vec<IndexDescriptor>,
    rls_policies: Vec<RlsPolicyRule>,
}

pub(crate) const CREATED_AT: &str = "created_at";
pub(crate) const UPDATED_AT: &str = "updated_at";

impl TableDescriptor {
    pub fn new(name: impl Into<String>, columns: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        Self::builder(name).columns(columns).build()
    }

    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder {
            name: name.into(),
            primary_key: "id".to_string(),
            default_order_by: format!("{CREATED_AT} DESC"),
            columns: vec![],
            indexes: vec![],
            rls_policies: vec![],
        }
    }

    /// Finds a column by name, ignoring case.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key_column(&self) -> Option<&ColumnDescriptor> {
        self.column(&self.primary_key)
    }

    pub fn has_updated_at(&self) -> bool {
        self.column(UPDATED_AT).is_some()
    }

    /// Enums used by the table's columns, nested fields included, in first
    /// use order.
    pub fn enums(&self) -> Vec<&EnumDescriptor> {
        let mut enums = vec![];
        for column in &self.columns {
            collect_enums(column, 0, &mut enums);
        }
        enums
    }

    /// Top-level foreign keys, with the column holding each one.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&ColumnDescriptor, &ForeignKeyReference)> {
        self.columns
            .iter()
            .filter_map(|column| column.foreign_key.as_ref().map(|fk| (column, fk)))
    }

    /// Names of the tables referenced by the table's top-level foreign keys.
    pub fn referenced_tables(&self) -> BTreeSet<&str> {
        self.foreign_keys().map(|(_, fk)| fk.table.as_str()).collect()
    }

    /// Warnings raised while assembling this table.
    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    pub(crate) fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl TableBuilder {
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    pub fn default_order_by(mut self, expr: impl Into<String>) -> Self {
        self.default_order_by = expr.into();
        self
    }

    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn index(mut self, index: IndexDescriptor) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn rls_policies(mut self, policies: impl IntoIterator<Item = RlsPolicyRule>) -> Self {
        self.rls_policies.extend(policies);
        self
    }

    /// Builds the table, dropping duplicate columns and adding the primary
    /// key, `created_at` and `updated_at` columns when they are missing.
    pub fn build(self) -> TableDescriptor {
        let mut diagnostics = Diagnostics::new();
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(self.columns.len() + 3);

        for column in self.columns {
            if !seen.insert(column.name.to_ascii_lowercase()) {
                diagnostics.warn(Warning::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name,
                });
                continue;
            }

            columns.push(column);
        }

        // The key takes the spelling of the column it matched.
        let matched = columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(&self.primary_key))
            .map(|column| column.name.clone());

        let primary_key = match matched {
            Some(name) => name,
            None => {
                columns.insert(0, ColumnDescriptor::uuid(&self.primary_key).not_null());
                self.primary_key
            }
        };

        if !seen.contains(CREATED_AT) {
            columns.push(ColumnDescriptor::timestamp(CREATED_AT).not_null().default_now());
        }

        if !seen.contains(UPDATED_AT) {
            columns.push(ColumnDescriptor::timestamp(UPDATED_AT).nullable().default_now());
        }

        TableDescriptor {
            name: self.name,
            primary_key,
            default_order_by: self.default_order_by,
            columns,
            indexes: self.indexes,
            rls_policies: self.rls_policies,
            diagnostics,
        }
    }
}

fn collect_enums<'a>(column: &'a ColumnDescriptor, depth: usize, out: &mut Vec<&'a EnumDescriptor>) {
    if let Some(descriptor) = column.enum_ref() {
        if !out.iter().any(|seen| seen.name == descriptor.name) {
            out.push(descriptor);
        }
    }

    if depth >= MAX_NESTING_DEPTH {
        return;
    }

    if let Some(nested) = &column.nested {
        match nested.fields() {
            Some(fields) => {
                for field in fields.values() {
                    collect_enums(field, depth + 1, out);
                }
            }
            None => {
                if let Some(element) = nested.element() {
                    collect_enums(element, depth + 1, out);
                }
            }
        }
    }
}
