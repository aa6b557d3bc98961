use super::Statement;

use zyra_core::schema::ForeignKeyAction;

/// `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY`
#[derive(Debug, Clone, PartialEq)]
pub struct AddForeignKey {
    pub table: String,

    /// Constraint name
    pub name: String,

    pub column: String,
    pub references: String,
    pub referenced_column: String,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
}

impl Statement {
    /// Adds a foreign key from `table.column`. The constraint is named
    /// `{table}_{column}_fkey`.
    pub fn add_foreign_key(
        table: &str,
        column: &str,
        references: &str,
        referenced_column: &str,
    ) -> AddForeignKey {
        AddForeignKey {
            table: table.to_string(),
            name: format!("{table}_{column}_fkey"),
            column: column.to_string(),
            references: references.to_string(),
            referenced_column: referenced_column.to_string(),
            on_delete: ForeignKeyAction::NoAction,
            on_update: ForeignKeyAction::NoAction,
        }
    }
}

impl AddForeignKey {
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }
}

impl From<AddForeignKey> for Statement {
    fn from(value: AddForeignKey) -> Self {
        Self::AddForeignKey(value)
    }
}
