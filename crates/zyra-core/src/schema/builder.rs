mod resolve;

use super::{flatten, EnumDescriptor, SchemaDescriptor, TableDescriptor};
use crate::{rls::RlsConfig, Diagnostics, Result, Warning};

use std::collections::HashSet;

/// Builds a [`SchemaDescriptor`] from table descriptors.
#[derive(Debug, Default)]
pub struct Builder {
    db_prefix: String,
    enums: Vec<EnumDescriptor>,
    rls: RlsConfig,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix shared by every table name. Relationship lookups accept names
    /// with or without it, and derived names are built from names without
    /// it.
    pub fn db_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.db_prefix = prefix.into();
        self
    }

    /// Declares enums in addition to the ones found on columns.
    pub fn enums(&mut self, enums: impl IntoIterator<Item = EnumDescriptor>) -> &mut Self {
        self.enums.extend(enums);
        self
    }

    pub fn rls_config(&mut self, config: RlsConfig) -> &mut Self {
        self.rls = config;
        self
    }

    pub fn build(&self, tables: impl IntoIterator<Item = TableDescriptor>) -> Result<SchemaDescriptor> {
        let mut diagnostics = Diagnostics::new();
        let mut names = HashSet::new();
        let mut declared = vec![];

        for table in tables {
            if !names.insert(table.name.clone()) {
                diagnostics.warn(Warning::DuplicateTable { table: table.name });
                continue;
            }
            declared.push(table);
        }

        let resolved = resolve::resolve(&self.db_prefix, declared, &mut diagnostics);

        let num_declared = resolved.tables.len();
        let num_joins = resolved.join_tables.len();

        let mut tables = resolved.tables;
        tables.extend(resolved.join_tables);
        tables.extend(resolved.separate_tables);

        for table in &tables {
            diagnostics.extend(table.diagnostics().clone());
        }

        let mut enums: Vec<EnumDescriptor> = vec![];
        let used = tables.iter().flat_map(|table| table.enums());
        for descriptor in self.enums.iter().chain(used) {
            if !enums.iter().any(|e| e.name == descriptor.name) {
                enums.push(descriptor.clone());
            }
        }
        enums.sort_by(|a, b| a.name.cmp(&b.name));

        let layouts = tables
            .iter()
            .map(|table| flatten::flatten_table(table, &mut diagnostics))
            .collect();

        let mut schema = SchemaDescriptor {
            tables,
            declared: num_declared,
            joins: num_joins,
            enums,
            db_prefix: self.db_prefix.clone(),
            rls: self.rls.clone(),
            layouts,
            order: vec![],
            diagnostics: Diagnostics::new(),
        };

        schema.verify(&mut diagnostics)?;
        schema.order = schema.topological_order(&mut diagnostics);
        schema.diagnostics = diagnostics;

        Ok(schema)
    }
}
