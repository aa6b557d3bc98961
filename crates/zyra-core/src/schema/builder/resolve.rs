use crate::schema::{
    ColumnDescriptor, ForeignKeyAction, ForeignKeyReference, IndexDescriptor, ManyToManyMarker,
    NestedFieldSchema, Relationship, StorageStrategy, TableDescriptor, Type, MAX_NESTING_DEPTH,
};
use crate::{Diagnostics, Warning};

use indexmap::IndexMap;
use std::collections::HashSet;
use std_util::str::{singularize, strip_prefix};

pub(super) struct Resolved {
    pub(super) tables: Vec<TableDescriptor>,
    pub(super) join_tables: Vec<TableDescriptor>,
    pub(super) separate_tables: Vec<TableDescriptor>,
}

/// What a foreign key needs to know about the table it references.
#[derive(Debug, Clone)]
struct Target {
    name: String,
    primary_key: String,
    key_ty: Type,
}

struct Targets<'a> {
    db_prefix: &'a str,
    by_name: IndexMap<String, Target>,
}

struct Resolve<'a> {
    db_prefix: &'a str,
    diagnostics: &'a mut Diagnostics,
    join_tables: Vec<TableDescriptor>,
    separate_tables: Vec<TableDescriptor>,

    /// Signatures of the separate-table structures being synthesized.
    path: HashSet<String>,
}

/// Replaces many-to-many markers with join tables and separate-table nested
/// columns with child tables.
///
/// Tables are visited in name order, so the derived tables only depend on
/// the set of input tables.
pub(super) fn resolve(
    db_prefix: &str,
    mut tables: Vec<TableDescriptor>,
    diagnostics: &mut Diagnostics,
) -> Resolved {
    let targets = Targets::new(db_prefix, &tables);

    let mut cx = Resolve {
        db_prefix,
        diagnostics,
        join_tables: vec![],
        separate_tables: vec![],
        path: HashSet::new(),
    };

    let mut order: Vec<usize> = (0..tables.len()).collect();
    order.sort_by(|&a, &b| tables[a].name.cmp(&tables[b].name));

    for index in order {
        let table = &mut tables[index];
        let owner = targets.target(table);
        let columns = std::mem::take(&mut table.columns);
        table.columns = cx.resolve_columns(&targets, &owner, columns);
    }

    cx.join_tables.sort_by(|a, b| a.name.cmp(&b.name));
    cx.separate_tables.sort_by(|a, b| a.name.cmp(&b.name));

    Resolved {
        tables,
        join_tables: cx.join_tables,
        separate_tables: cx.separate_tables,
    }
}

impl<'a> Targets<'a> {
    fn new(db_prefix: &'a str, tables: &[TableDescriptor]) -> Self {
        let by_name = tables
            .iter()
            .map(|table| (table.name.clone(), Self::describe(table)))
            .collect();

        Self { db_prefix, by_name }
    }

    fn describe(table: &TableDescriptor) -> Target {
        let key_ty = match table.primary_key_column() {
            Some(column) if !column.ty.is_nested() => column.ty.clone(),
            _ => Type::Uuid,
        };

        Target {
            name: table.name.clone(),
            primary_key: table.primary_key.clone(),
            key_ty,
        }
    }

    fn target(&self, table: &TableDescriptor) -> Target {
        self.by_name
            .get(&table.name)
            .cloned()
            .unwrap_or_else(|| Self::describe(table))
    }

    /// Looks a table up by its exact name, then with the database prefix.
    fn find(&self, name: &str) -> Option<&Target> {
        self.by_name
            .get(name)
            .or_else(|| self.by_name.get(&format!("{}{name}", self.db_prefix)))
    }
}

impl Resolve<'_> {
    fn resolve_columns(
        &mut self,
        targets: &Targets<'_>,
        owner: &Target,
        columns: Vec<ColumnDescriptor>,
    ) -> Vec<ColumnDescriptor> {
        let mut kept = Vec::with_capacity(columns.len());

        for mut column in columns {
            if let Some(marker) = column.take_many_to_many() {
                match targets.find(&marker.target_table) {
                    Some(target) => {
                        let join = self.join_table(owner, target, marker);

                        if self.join_tables.iter().any(|table| table.name == join.name) {
                            tracing::debug!(join_table = %join.name, column = %column.name, "join table already declared; skipping");
                        } else {
                            self.join_tables.push(join);
                        }
                        continue;
                    }
                    None => self.diagnostics.warn(Warning::ManyToManyTargetMissing {
                        table: owner.name.clone(),
                        column: column.name.clone(),
                        target: marker.target_table,
                    }),
                }
            }

            if let Some(nested) = column.nested.as_deref() {
                if let StorageStrategy::SeparateTable { name, relationship } = nested.strategy() {
                    if self.separate_table(owner, &column, nested, name.as_deref(), *relationship, 0) {
                        continue;
                    }
                    kept.push(column.inline_json());
                    continue;
                }
            }

            kept.push(column);
        }

        kept
    }

    fn join_table(&self, owner: &Target, target: &Target, marker: ManyToManyMarker) -> TableDescriptor {
        let source = strip_prefix(&owner.name, self.db_prefix);
        let other = strip_prefix(&target.name, self.db_prefix);

        let name = match &marker.join_table_name {
            Some(name) => self.prefixed(name),
            None => {
                let mut pair = [source, other];
                pair.sort();
                self.prefixed(&pair.join("_"))
            }
        };

        let source_column = marker
            .source_column_name
            .unwrap_or_else(|| format!("{}_id", singularize(source)));
        let mut target_column = marker
            .target_column_name
            .unwrap_or_else(|| format!("{}_id", singularize(other)));

        if target_column.eq_ignore_ascii_case(&source_column) {
            target_column = format!("related_{target_column}");
        }

        let mut columns = vec![
            ColumnDescriptor::new(&source_column, owner.key_ty.clone())
                .not_null()
                .foreign_key(
                    ForeignKeyReference::to_column(&owner.name, &owner.primary_key)
                        .on_delete(marker.source_on_delete)
                        .on_update(marker.source_on_update),
                ),
            ColumnDescriptor::new(&target_column, target.key_ty.clone())
                .not_null()
                .foreign_key(
                    ForeignKeyReference::to_column(&target.name, &target.primary_key)
                        .on_delete(marker.target_on_delete)
                        .on_update(marker.target_on_update),
                ),
        ];

        columns.extend(marker.additional_columns.into_iter().map(|mut column| {
            column.many_to_many = None;
            column
        }));

        let pair_key = IndexDescriptor::new(format!("{name}_{source_column}_{target_column}_key"))
            .column(&source_column)
            .column(&target_column)
            .unique();

        TableDescriptor::builder(name)
            .columns(columns)
            .index(pair_key)
            .build()
    }

    /// Synthesizes the child table storing `column` of `parent`. Returns
    /// `false` when the structure is circular or too deep, in which case the
    /// caller keeps the column inline.
    fn separate_table(
        &mut self,
        parent: &Target,
        column: &ColumnDescriptor,
        nested: &NestedFieldSchema,
        name: Option<&str>,
        relationship: Relationship,
        depth: usize,
    ) -> bool {
        if depth >= MAX_NESTING_DEPTH {
            self.diagnostics.warn(Warning::NestingTooDeep {
                table: parent.name.clone(),
                column: column.name.clone(),
                depth,
            });
            return false;
        }

        let signature = nested.signature(&column.name);
        if !self.path.insert(signature.clone()) {
            self.diagnostics.warn(Warning::CircularNesting {
                table: parent.name.clone(),
                column: column.name.clone(),
            });
            return false;
        }

        let child = Target {
            name: match name {
                Some(name) => self.prefixed(name),
                None => format!("{}_{}", parent.name, column.name),
            },
            primary_key: "id".to_string(),
            key_ty: Type::Uuid,
        };

        let parent_key = format!(
            "{}_id",
            singularize(strip_prefix(&parent.name, self.db_prefix))
        );
        let mut parent_key = ColumnDescriptor::new(parent_key, parent.key_ty.clone())
            .not_null()
            .foreign_key(
                ForeignKeyReference::to_column(&parent.name, &parent.primary_key)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade),
            );

        if relationship == Relationship::OneToOne {
            parent_key = parent_key.unique();
        }

        let mut columns = vec![parent_key];

        match nested {
            NestedFieldSchema::Object { fields, .. } => {
                self.child_columns(&child, fields.values(), depth, &mut columns);
            }
            NestedFieldSchema::Array { element, .. } => {
                columns.push(ColumnDescriptor::integer("position").not_null());

                match element.nested.as_deref() {
                    Some(NestedFieldSchema::Object { fields, .. }) => {
                        self.child_columns(&child, fields.values(), depth, &mut columns);
                    }
                    Some(element_nested) if element_nested.strategy().is_separate_table() => {
                        columns.push(element.clone().renamed("value").inline_json());
                    }
                    _ => columns.push(element.clone().renamed("value")),
                }
            }
        }

        self.path.remove(&signature);

        tracing::debug!(table = %child.name, parent = %parent.name, "synthesized separate table");
        self.separate_tables
            .push(TableDescriptor::new(child.name, columns));

        true
    }

    fn child_columns<'b>(
        &mut self,
        child: &Target,
        fields: impl Iterator<Item = &'b ColumnDescriptor>,
        depth: usize,
        columns: &mut Vec<ColumnDescriptor>,
    ) {
        for field in fields {
            let mut field = field.clone();
            field.many_to_many = None;

            if let Some(nested) = field.nested.as_deref() {
                if let StorageStrategy::SeparateTable { name, relationship } = nested.strategy() {
                    if self.separate_table(child, &field, nested, name.as_deref(), *relationship, depth + 1) {
                        continue;
                    }
                    columns.push(field.inline_json());
                    continue;
                }
            }

            columns.push(field);
        }
    }

    fn prefixed(&self, name: &str) -> String {
        if self.db_prefix.is_empty() || name.starts_with(self.db_prefix) {
            name.to_string()
        } else {
            format!("{}{name}", self.db_prefix)
        }
    }
}
