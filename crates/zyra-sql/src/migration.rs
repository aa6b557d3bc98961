use crate::{stmt::Statement, Capability};

use zyra_core::SchemaDescriptor;

/// The statements creating a schema from scratch, grouped in the order they
/// must run: enum types, tables, indexes, foreign keys, triggers and row
/// level security.
///
/// Tables are created without foreign keys, which are added once every
/// table exists. Circular references therefore never block creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,

    /// Comment lines printed below the title
    pub notes: Vec<String>,

    pub statements: Vec<Statement>,
}

impl Migration {
    pub fn new(schema: &SchemaDescriptor, capability: &Capability) -> Self {
        let mut migration = Migration { sections: vec![] };

        migration.push(enums(schema, capability));
        migration.push(tables(schema, capability));
        migration.push(indexes(schema));
        migration.push(foreign_keys(schema));
        migration.push(triggers(schema, capability));
        migration.push(row_level_security(schema, capability));

        tracing::debug!(
            sections = migration.sections.len(),
            statements = migration.statements().count(),
            "built migration"
        );

        migration
    }

    /// Non-empty sections, in execution order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.title == title)
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.statements.iter())
    }

    fn push(&mut self, section: Section) {
        if !section.statements.is_empty() || !section.notes.is_empty() {
            self.sections.push(section);
        }
    }
}

impl Section {
    fn new(title: &'static str) -> Self {
        Section {
            title,
            notes: vec![],
            statements: vec![],
        }
    }
}

fn enums(schema: &SchemaDescriptor, capability: &Capability) -> Section {
    let mut section = Section::new("Create Enums");

    if capability.named_enums {
        section.statements = schema.enums().iter().map(Statement::create_type).collect();
    } else if !schema.enums().is_empty() {
        section
            .notes
            .push("Enum values are declared inline on each enum column.".to_string());
    }

    section
}

fn tables(schema: &SchemaDescriptor, capability: &Capability) -> Section {
    let mut section = Section::new("Create Tables");

    section.statements = schema
        .ordered_tables()
        .map(|table| Statement::create_table(schema, table, capability))
        .collect();

    section
}

fn indexes(schema: &SchemaDescriptor) -> Section {
    let mut section = Section::new("Indexes");

    for table in schema.ordered_tables() {
        for index in &table.indexes {
            section
                .statements
                .push(Statement::create_index(&table.name, index));
        }
    }

    section
}

fn foreign_keys(schema: &SchemaDescriptor) -> Section {
    let mut section = Section::new("Foreign Keys");

    for table in schema.ordered_tables() {
        for flat in schema.flat_columns(&table.name) {
            let Some(fk) = flat.column.foreign_key.as_ref().filter(|_| !flat.is_json()) else {
                continue;
            };

            let Some(target) = schema.table(&fk.table) else {
                tracing::debug!(
                    table = %table.name,
                    column = %flat.name(),
                    target = %fk.table,
                    "skipping foreign key to unknown table"
                );
                continue;
            };

            let stmt = Statement::add_foreign_key(
                &table.name,
                flat.name(),
                &target.name,
                &target.primary_key,
            )
            .on_delete(fk.on_delete)
            .on_update(fk.on_update);

            section.statements.push(stmt.into());
        }
    }

    section
}

fn triggers(schema: &SchemaDescriptor, capability: &Capability) -> Section {
    let mut section = Section::new("Triggers");

    for table in schema.ordered_tables() {
        let Some(column) = table.column("updated_at") else {
            continue;
        };

        if capability.trigger_functions {
            section
                .statements
                .push(Statement::create_updated_at_function(&table.name, &column.name));
        }

        section.statements.push(Statement::create_updated_at_trigger(
            &table.name,
            &column.name,
            capability.trigger_functions,
        ));
    }

    section
}

fn row_level_security(schema: &SchemaDescriptor, capability: &Capability) -> Section {
    let mut section = Section::new("Row Level Security");

    if !capability.row_level_security {
        section.notes.push(
            "Row level security is not supported by this database.".to_string(),
        );
        section
            .notes
            .push("Enforce access rules in the application layer.".to_string());
        return section;
    }

    for table in schema.ordered_tables() {
        let policies = schema.rls_policies(table);

        if policies.is_empty() {
            continue;
        }

        section.statements.push(Statement::enable_rls(&table.name));
        section.statements.extend(
            policies
                .iter()
                .map(|rule| Statement::create_policy(&table.name, rule)),
        );
    }

    section
}
