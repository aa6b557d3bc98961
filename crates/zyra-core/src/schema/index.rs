#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    /// Index name, unique within the schema
    pub name: String,

    /// Columns included in the index, in order.
    pub columns: Vec<IndexColumn>,

    /// When `true`, indexed entries are unique
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumn {
    pub name: String,
    pub order: IndexOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndexOrder {
    #[default]
    Asc,
    Desc,
}

impl IndexDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            unique: false,
        }
    }

    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push(IndexColumn {
            name: name.into(),
            order: IndexOrder::Asc,
        });
        self
    }

    pub fn column_desc(mut self, name: impl Into<String>) -> Self {
        self.columns.push(IndexColumn {
            name: name.into(),
            order: IndexOrder::Desc,
        });
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

impl IndexOrder {
    pub fn is_desc(self) -> bool {
        matches!(self, IndexOrder::Desc)
    }
}
