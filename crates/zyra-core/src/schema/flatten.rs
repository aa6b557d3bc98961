use super::{ColumnDescriptor, NestedFieldSchema, StorageStrategy, TableDescriptor};
use crate::{Diagnostics, Warning};

use std::collections::HashSet;

/// Nested structures deeper than this are stored as JSON.
pub const MAX_NESTING_DEPTH: usize = 10;

/// A physical column of a table, after nested structures have been
/// expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatColumn {
    /// The column, renamed to its physical name. Flattened fields keep their
    /// own type, nullability and foreign key.
    pub column: ColumnDescriptor,

    pub storage: Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Stored using the column type's own SQL type.
    Native,

    /// Stored as a JSON document.
    Json,
}

impl FlatColumn {
    pub fn name(&self) -> &str {
        &self.column.name
    }

    pub fn is_json(&self) -> bool {
        self.storage == Storage::Json
    }
}

struct Flatten<'a> {
    table: &'a str,
    diagnostics: &'a mut Diagnostics,

    /// Signatures of the flattened objects on the current path.
    path: HashSet<String>,

    columns: Vec<FlatColumn>,
}

pub(crate) fn flatten_table(table: &TableDescriptor, diagnostics: &mut Diagnostics) -> Vec<FlatColumn> {
    let mut flatten = Flatten {
        table: &table.name,
        diagnostics,
        path: HashSet::new(),
        columns: Vec::with_capacity(table.columns.len()),
    };

    for column in &table.columns {
        flatten.column(column, column.name.clone(), 0);
    }

    flatten.columns
}

impl Flatten<'_> {
    fn column(&mut self, column: &ColumnDescriptor, name: String, depth: usize) {
        let Some(nested) = column.nested.as_deref() else {
            let storage = if column.ty.is_nested() {
                Storage::Json
            } else {
                Storage::Native
            };
            self.push(column, name, storage);
            return;
        };

        match (nested, nested.strategy()) {
            (NestedFieldSchema::Object { fields, .. }, StorageStrategy::Flattened { prefix }) => {
                if depth >= MAX_NESTING_DEPTH {
                    self.diagnostics.warn(Warning::NestingTooDeep {
                        table: self.table.to_string(),
                        column: name.clone(),
                        depth,
                    });
                    self.push(column, name, Storage::Json);
                    return;
                }

                let signature = nested.signature(&column.name);
                if !self.path.insert(signature.clone()) {
                    self.diagnostics.warn(Warning::CircularNesting {
                        table: self.table.to_string(),
                        column: name.clone(),
                    });
                    self.push(column, name, Storage::Json);
                    return;
                }

                // An explicit prefix only applies to the outermost object.
                let base = match prefix {
                    Some(prefix) if depth == 0 => prefix.clone(),
                    _ => name,
                };

                for field in fields.values() {
                    self.column(field, format!("{base}-{}", field.name), depth + 1);
                }

                self.path.remove(&signature);
            }
            (_, StorageStrategy::SeparateTable { .. }) => {
                self.diagnostics.warn(Warning::SeparateTableInFlattened {
                    table: self.table.to_string(),
                    column: name.clone(),
                });
                self.push(column, name, Storage::Json);
            }
            _ => self.push(column, name, Storage::Json),
        }
    }

    fn push(&mut self, column: &ColumnDescriptor, name: String, storage: Storage) {
        self.columns.push(FlatColumn {
            column: column.clone().renamed(name),
            storage,
        });
    }
}
