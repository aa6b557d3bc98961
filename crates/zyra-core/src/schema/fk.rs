/// A foreign key from a column to another table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyReference {
    /// Name of the referenced table.
    pub table: String,

    /// Name of the referenced column. Must be the referenced table's primary
    /// key; this is checked when the schema is built.
    pub column: String,

    pub on_update: ForeignKeyAction,
    pub on_delete: ForeignKeyAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKeyAction {
    Cascade,
    Restrict,
    SetNull,
    SetDefault,
    NoAction,
}

impl ForeignKeyReference {
    /// References the `id` column of `table`, setting the column to null
    /// when the referenced row is deleted.
    pub fn new(table: impl Into<String>) -> Self {
        Self::to_column(table, "id")
    }

    pub fn to_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            on_update: ForeignKeyAction::Cascade,
            on_delete: ForeignKeyAction::SetNull,
        }
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }
}

impl ForeignKeyAction {
    pub fn as_sql(self) -> &'static str {
        match self {
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::Restrict => "RESTRICT",
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
            ForeignKeyAction::NoAction => "NO ACTION",
        }
    }

    /// Parses the spellings accepted in schema files: `cascade`,
    /// `restrict`, `set_null`, `set_default` and `no_action`, ignoring case
    /// and accepting spaces, dashes or camel case between words.
    pub fn parse(src: &str) -> Option<Self> {
        let normalized: String = src
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "cascade" => Some(ForeignKeyAction::Cascade),
            "restrict" => Some(ForeignKeyAction::Restrict),
            "setnull" => Some(ForeignKeyAction::SetNull),
            "setdefault" => Some(ForeignKeyAction::SetDefault),
            "noaction" => Some(ForeignKeyAction::NoAction),
            _ => None,
        }
    }
}
