#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

// Fragment serializers
mod column_def;
mod statement;
mod ty;
mod value;

use crate::{migration::Migration, stmt::Statement};

use zyra_core::SchemaDescriptor;

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serializes a full migration script. Each section starts with a
    /// `-- Title` comment followed by its notes, then its statements
    /// separated by blank lines.
    pub fn serialize_migration(&self, migration: &Migration) -> String {
        let mut sections = vec![];

        for section in migration.sections() {
            let mut lines = vec![format!("-- {}", section.title)];

            lines.extend(section.notes.iter().map(|note| format!("-- {note}")));

            let mut body = lines.join("\n");

            if !section.statements.is_empty() {
                let statements: Vec<_> = section
                    .statements
                    .iter()
                    .map(|stmt| self.serialize(stmt))
                    .collect();

                body.push('\n');
                body.push_str(&statements.join("\n\n"));
            }

            sections.push(body);
        }

        let mut ret = sections.join("\n\n");
        ret.push('\n');
        ret
    }

    /// Builds the migration for `schema` with this flavor's capabilities and
    /// serializes it.
    pub fn migration_script(&self, schema: &SchemaDescriptor) -> String {
        self.serialize_migration(&Migration::new(schema, self.capability()))
    }

    fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }
}
