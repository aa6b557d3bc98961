use super::{SchemaDescriptor, Storage};
use crate::{Diagnostics, Error, Result, Warning};

struct Verify<'a> {
    schema: &'a SchemaDescriptor,
    diagnostics: &'a mut Diagnostics,
}

impl SchemaDescriptor {
    pub(super) fn verify(&self, diagnostics: &mut Diagnostics) -> Result<()> {
        Verify {
            schema: self,
            diagnostics,
        }
        .verify()
    }
}

impl Verify<'_> {
    fn verify(&mut self) -> Result<()> {
        debug_assert!(self.verify_each_table_has_a_primary_key());

        self.verify_foreign_keys_reference_primary_keys()?;
        Ok(())
    }

    fn verify_each_table_has_a_primary_key(&self) -> bool {
        self.schema
            .all_tables()
            .iter()
            .all(|table| table.primary_key_column().is_some())
    }

    /// Checks every physical foreign key, including the ones inside
    /// flattened objects. Referencing anything but the primary key is fatal;
    /// referencing an unknown table is not.
    fn verify_foreign_keys_reference_primary_keys(&mut self) -> Result<()> {
        let schema = self.schema;

        for table in schema.all_tables() {
            for flat in schema.flat_columns(&table.name) {
                if flat.storage != Storage::Native {
                    continue;
                }

                let Some(fk) = &flat.column.foreign_key else {
                    continue;
                };

                let Some(target) = schema.table(&fk.table) else {
                    self.diagnostics.warn(Warning::ForeignKeyTargetMissing {
                        table: table.name.clone(),
                        column: flat.column.name.clone(),
                        target: fk.table.clone(),
                    });
                    continue;
                };

                if !fk.column.eq_ignore_ascii_case(&target.primary_key) {
                    return Err(Error::invalid_foreign_key(
                        &table.name,
                        &flat.column.name,
                        &target.name,
                        &fk.column,
                        &target.primary_key,
                    ));
                }
            }
        }

        Ok(())
    }
}
