use crate::util::{self, HEADER};

use zyra_core::schema::{TableDescriptor, TableKind};
use zyra_core::SchemaDescriptor;

use std::fmt;

/// Names used in the generated bucket definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRulesOptions {
    /// Column holding the owning user's id. Tables with this column are
    /// synced to their owner only.
    pub user_id_column: String,

    /// Bucket for tables every user receives.
    pub global_bucket: String,

    /// Bucket for rows owned by the requesting user.
    pub user_bucket: String,
}

impl Default for SyncRulesOptions {
    fn default() -> Self {
        Self {
            user_id_column: "user_id".to_string(),
            global_bucket: "global".to_string(),
            user_bucket: "user_data".to_string(),
        }
    }
}

/// Generates sync bucket definitions (YAML).
///
/// A table is owned when it has the user id column; the users table is
/// owned through its primary key. Every other table lands in the global
/// bucket. Join and separate tables follow declared tables under a marker
/// comment.
pub fn generate(schema: &SchemaDescriptor, options: &SyncRulesOptions) -> String {
    let mut global = Bucket::default();
    let mut owned = Bucket::default();

    for table in schema.ordered_tables() {
        let derived = !matches!(schema.table_kind(&table.name), Some(TableKind::Declared));

        match owner_column(schema, table, options) {
            Some(column) => owned.push(
                derived,
                format!(
                    "SELECT * FROM {} WHERE {} = bucket.user_id",
                    util::sql_ident(&table.name),
                    util::sql_ident(column)
                ),
            ),
            None => global.push(derived, format!("SELECT * FROM {}", util::sql_ident(&table.name))),
        }
    }

    tracing::debug!(
        global = global.len(),
        owned = owned.len(),
        "generated sync bucket definitions"
    );

    SyncRules {
        options,
        global,
        owned,
    }
    .to_string()
}

fn owner_column<'a>(
    schema: &SchemaDescriptor,
    table: &'a TableDescriptor,
    options: &SyncRulesOptions,
) -> Option<&'a str> {
    if schema.is_users_table(table) {
        return Some(&table.primary_key);
    }

    table
        .column(&options.user_id_column)
        .map(|column| column.name.as_str())
}

#[derive(Default)]
struct Bucket {
    declared: Vec<String>,
    derived: Vec<String>,
}

impl Bucket {
    fn push(&mut self, derived: bool, query: String) {
        if derived {
            self.derived.push(query);
        } else {
            self.declared.push(query);
        }
    }

    fn len(&self) -> usize {
        self.declared.len() + self.derived.len()
    }

    fn fmt_data(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 0 {
            return writeln!(f, "    data: []");
        }

        writeln!(f, "    data:")?;

        for query in &self.declared {
            writeln!(f, "      - {query}")?;
        }

        if !self.derived.is_empty() {
            writeln!(f, "      # join and child tables")?;

            for query in &self.derived {
                writeln!(f, "      - {query}")?;
            }
        }

        Ok(())
    }
}

struct SyncRules<'a> {
    options: &'a SyncRulesOptions,
    global: Bucket,
    owned: Bucket,
}

impl fmt::Display for SyncRules<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {HEADER}")?;
        writeln!(f, "bucket_definitions:")?;

        writeln!(f, "  {}:", self.options.global_bucket)?;
        self.global.fmt_data(f)?;

        writeln!(f, "  {}:", self.options.user_bucket)?;
        writeln!(f, "    parameters: SELECT request.user_id() AS user_id")?;
        self.owned.fmt_data(f)
    }
}
