use std::fmt;

/// A recoverable problem found while assembling a schema.
///
/// Each warning has a well-defined fallback, so it never interrupts
/// construction. Warnings are logged through `tracing` as they are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A column was declared twice in the same table; the later one was
    /// dropped.
    DuplicateColumn { table: String, column: String },

    /// Two tables share a name; the later one was dropped.
    DuplicateTable { table: String },

    /// A many-to-many marker names a table that is not part of the schema.
    /// The column is kept as a plain field.
    ManyToManyTargetMissing {
        table: String,
        column: String,
        target: String,
    },

    /// A foreign key references a table that is not part of the schema.
    ForeignKeyTargetMissing {
        table: String,
        column: String,
        target: String,
    },

    /// A nested schema declares itself again along its own path. The field
    /// is stored as a JSON column.
    CircularNesting { table: String, column: String },

    /// A nested schema exceeds the maximum nesting depth. The field is
    /// stored as a JSON column.
    NestingTooDeep {
        table: String,
        column: String,
        depth: usize,
    },

    /// A separate-table field appears below a flattened object, where it
    /// cannot get its own table. The field is stored as a JSON column.
    SeparateTableInFlattened { table: String, column: String },

    /// Foreign keys form a cycle; tables keep their declaration order.
    DependencyCycle { tables: Vec<String> },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateColumn { table, column } => {
                write!(f, "table `{table}` declares column `{column}` more than once; keeping the first declaration")
            }
            Warning::DuplicateTable { table } => {
                write!(f, "table `{table}` is declared more than once; keeping the first declaration")
            }
            Warning::ManyToManyTargetMissing {
                table,
                column,
                target,
            } => write!(
                f,
                "`{table}.{column}` declares a many-to-many relationship with unknown table `{target}`; keeping it as a plain column"
            ),
            Warning::ForeignKeyTargetMissing {
                table,
                column,
                target,
            } => write!(
                f,
                "`{table}.{column}` references unknown table `{target}`"
            ),
            Warning::CircularNesting { table, column } => write!(
                f,
                "`{table}.{column}` has a circular nested schema; storing it as JSON"
            ),
            Warning::NestingTooDeep {
                table,
                column,
                depth,
            } => write!(
                f,
                "`{table}.{column}` is nested {depth} levels deep; storing it as JSON"
            ),
            Warning::SeparateTableInFlattened { table, column } => write!(
                f,
                "`{table}.{column}` uses separate-table storage inside a flattened object; storing it as JSON"
            ),
            Warning::DependencyCycle { tables } => write!(
                f,
                "circular foreign key dependency between [{}]; using declaration order",
                tables.join(", ")
            ),
        }
    }
}

/// Collects the warnings produced while building a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and records a warning.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }
}
