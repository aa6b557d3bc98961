use super::{ColumnDef, Statement};
use crate::Capability;

use zyra_core::schema::{SchemaDescriptor, TableDescriptor};

/// `CREATE TABLE` without foreign key constraints. Those are added once
/// every table exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Primary key clause
    pub primary_key: Vec<String>,

    /// Trailing table options, such as the storage engine.
    pub options: Option<String>,
}

impl Statement {
    pub fn create_table(
        schema: &SchemaDescriptor,
        table: &TableDescriptor,
        capability: &Capability,
    ) -> Self {
        let columns = schema
            .flat_columns(&table.name)
            .iter()
            .map(|flat| {
                let primary_key = flat.name().eq_ignore_ascii_case(&table.primary_key);
                ColumnDef::from_schema(flat, primary_key, capability)
            })
            .collect();

        CreateTable {
            name: table.name.clone(),
            columns,
            primary_key: vec![table.primary_key.clone()],
            options: capability.table_options.map(str::to_string),
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
