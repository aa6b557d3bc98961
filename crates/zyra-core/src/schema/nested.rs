use super::ColumnDescriptor;

use indexmap::IndexMap;

/// The shape of a structured column.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedFieldSchema {
    /// A record whose fields keep their declaration order.
    Object {
        fields: IndexMap<String, ColumnDescriptor>,
        strategy: StorageStrategy,
    },

    /// A list of `element`.
    Array {
        element: ColumnDescriptor,
        strategy: StorageStrategy,
    },
}

/// How a nested structure is stored in the database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StorageStrategy {
    /// Each object field becomes its own column named
    /// `"{prefix}-{field}"`. The prefix defaults to the column name.
    Flattened { prefix: Option<String> },

    /// The whole value is stored in one JSON column.
    #[default]
    InlineJson,

    /// The value is stored in a child table that references the parent row.
    SeparateTable {
        /// Child table name, before the schema's database prefix is applied.
        name: Option<String>,
        relationship: Relationship,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relationship {
    OneToOne,
    #[default]
    OneToMany,
}

impl NestedFieldSchema {
    pub fn object(fields: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        NestedFieldSchema::Object {
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
            strategy: StorageStrategy::default(),
        }
    }

    pub fn array(element: ColumnDescriptor) -> Self {
        NestedFieldSchema::Array {
            element,
            strategy: StorageStrategy::default(),
        }
    }

    pub fn strategy(&self) -> &StorageStrategy {
        match self {
            NestedFieldSchema::Object { strategy, .. } | NestedFieldSchema::Array { strategy, .. } => {
                strategy
            }
        }
    }

    pub fn with_strategy(mut self, new: StorageStrategy) -> Self {
        match &mut self {
            NestedFieldSchema::Object { strategy, .. } | NestedFieldSchema::Array { strategy, .. } => {
                *strategy = new
            }
        }
        self
    }

    pub fn is_object(&self) -> bool {
        matches!(self, NestedFieldSchema::Object { .. })
    }

    pub fn fields(&self) -> Option<&IndexMap<String, ColumnDescriptor>> {
        match self {
            NestedFieldSchema::Object { fields, .. } => Some(fields),
            NestedFieldSchema::Array { .. } => None,
        }
    }

    pub fn element(&self) -> Option<&ColumnDescriptor> {
        match self {
            NestedFieldSchema::Array { element, .. } => Some(element),
            NestedFieldSchema::Object { .. } => None,
        }
    }

    /// Identifies the structure declared at `column` one level deep: the
    /// column name plus the names of its direct fields. A schema that
    /// re-declares itself produces the same signature again further down
    /// its own path.
    pub(crate) fn signature(&self, column: &str) -> String {
        match self {
            NestedFieldSchema::Object { fields, .. } => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                format!("{column}{{{}}}", names.join(","))
            }
            NestedFieldSchema::Array { element, .. } => format!("{column}[{}]", element.name),
        }
    }
}

impl StorageStrategy {
    pub fn flattened() -> Self {
        StorageStrategy::Flattened { prefix: None }
    }

    pub fn separate_table(relationship: Relationship) -> Self {
        StorageStrategy::SeparateTable {
            name: None,
            relationship,
        }
    }

    pub fn is_separate_table(&self) -> bool {
        matches!(self, StorageStrategy::SeparateTable { .. })
    }
}
