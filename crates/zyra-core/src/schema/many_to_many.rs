use super::{ColumnDescriptor, ForeignKeyAction};

/// Declares a many-to-many relationship from the owning table to
/// `target_table`.
///
/// Markers only live on input descriptors. Building the schema replaces the
/// marked column with a join table holding one foreign key per side.
#[derive(Debug, Clone, PartialEq)]
pub struct ManyToManyMarker {
    pub target_table: String,

    /// Join table name, before the database prefix is applied. Defaults to
    /// both table names sorted and joined with `_`.
    pub join_table_name: Option<String>,

    /// Join column referencing the owning table.
    pub source_column_name: Option<String>,

    /// Join column referencing the target table.
    pub target_column_name: Option<String>,

    pub source_on_delete: ForeignKeyAction,
    pub source_on_update: ForeignKeyAction,
    pub target_on_delete: ForeignKeyAction,
    pub target_on_update: ForeignKeyAction,

    /// Extra columns carried by each join row.
    pub additional_columns: Vec<ColumnDescriptor>,
}

impl ManyToManyMarker {
    pub fn new(target_table: impl Into<String>) -> Self {
        Self {
            target_table: target_table.into(),
            join_table_name: None,
            source_column_name: None,
            target_column_name: None,
            source_on_delete: ForeignKeyAction::Cascade,
            source_on_update: ForeignKeyAction::Cascade,
            target_on_delete: ForeignKeyAction::Cascade,
            target_on_update: ForeignKeyAction::Cascade,
            additional_columns: vec![],
        }
    }

    pub fn join_table_name(mut self, name: impl Into<String>) -> Self {
        self.join_table_name = Some(name.into());
        self
    }

    pub fn source_column_name(mut self, name: impl Into<String>) -> Self {
        self.source_column_name = Some(name.into());
        self
    }

    pub fn target_column_name(mut self, name: impl Into<String>) -> Self {
        self.target_column_name = Some(name.into());
        self
    }

    pub fn source_on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.source_on_delete = action;
        self
    }

    pub fn source_on_update(mut self, action: ForeignKeyAction) -> Self {
        self.source_on_update = action;
        self
    }

    pub fn target_on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.target_on_delete = action;
        self
    }

    pub fn target_on_update(mut self, action: ForeignKeyAction) -> Self {
        self.target_on_update = action;
        self
    }

    pub fn additional_columns(mut self, columns: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        self.additional_columns.extend(columns);
        self
    }
}
