use super::Statement;

use zyra_core::schema::{IndexDescriptor, IndexOrder};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    /// Name of the index
    pub name: String,

    /// Which table to index
    pub on: String,

    /// The columns to index
    pub columns: Vec<(String, IndexOrder)>,

    /// When true, the index is unique
    pub unique: bool,
}

impl Statement {
    pub fn create_index(table: &str, index: &IndexDescriptor) -> Self {
        CreateIndex {
            name: index.name.clone(),
            on: table.to_string(),
            columns: index
                .columns
                .iter()
                .map(|column| (column.name.clone(), column.order))
                .collect(),
            unique: index.unique,
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
