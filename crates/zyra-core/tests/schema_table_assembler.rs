use pretty_assertions::assert_eq;
use zyra_core::schema::*;
use zyra_core::Warning;

fn names(table: &TableDescriptor) -> Vec<&str> {
    table.columns.iter().map(|column| column.name.as_str()).collect()
}

#[test]
fn injects_standard_columns() {
    let table = TableDescriptor::new("posts", [ColumnDescriptor::string("title")]);

    assert_eq!(names(&table), ["id", "title", "created_at", "updated_at"]);
    assert_eq!(table.primary_key, "id");
    assert_eq!(table.default_order_by, "created_at DESC");

    let id = table.primary_key_column().unwrap();
    assert_eq!(id.ty, Type::Uuid);
    assert!(!id.nullable);

    let created_at = table.column("created_at").unwrap();
    assert_eq!(created_at.ty, Type::Timestamp);
    assert!(!created_at.nullable);
    assert_eq!(created_at.default, Some(DefaultValue::Now));

    let updated_at = table.column("updated_at").unwrap();
    assert!(updated_at.nullable);
    assert_eq!(updated_at.default, Some(DefaultValue::Now));
    assert!(table.has_updated_at());
    assert!(table.warnings().is_empty());
}

#[test]
fn user_supplied_standard_columns_win() {
    let table = TableDescriptor::builder("accounts")
        .primary_key("account_id")
        .columns([
            ColumnDescriptor::bigint("account_id"),
            ColumnDescriptor::timestamp("Created_At").nullable(),
        ])
        .build();

    assert_eq!(names(&table), ["account_id", "Created_At", "updated_at"]);
    assert_eq!(table.primary_key_column().unwrap().ty, Type::BigInt);
    assert!(table.column("id").is_none());
    assert!(table.column("created_at").unwrap().nullable);
}

#[test]
fn duplicate_columns_are_dropped() {
    let table = TableDescriptor::new(
        "posts",
        [
            ColumnDescriptor::string("title"),
            ColumnDescriptor::integer("TITLE"),
        ],
    );

    assert_eq!(names(&table), ["id", "title", "created_at", "updated_at"]);
    assert_eq!(table.column("Title").unwrap().ty, Type::String);
    assert_eq!(
        table.warnings(),
        [Warning::DuplicateColumn {
            table: "posts".to_string(),
            column: "TITLE".to_string(),
        }]
    );
}

#[test]
fn builder_options() {
    let table = TableDescriptor::builder("events")
        .default_order_by("starts_at ASC")
        .column(ColumnDescriptor::timestamp("starts_at"))
        .index(IndexDescriptor::new("events_starts_at_idx").column_desc("starts_at"))
        .build();

    assert_eq!(table.default_order_by, "starts_at ASC");
    assert_eq!(table.indexes.len(), 1);
    assert_eq!(table.indexes[0].columns[0].order, IndexOrder::Desc);
    assert!(!table.indexes[0].unique);
}

#[test]
fn enums_include_nested_fields() {
    let mood = EnumDescriptor::new("mood", ["happy", "sad"]);
    let status = EnumDescriptor::new("status", ["draft", "published"]);

    let table = TableDescriptor::new(
        "journals",
        [
            ColumnDescriptor::enumeration("status", status.clone()),
            ColumnDescriptor::object(
                "entry",
                [
                    ColumnDescriptor::string("body"),
                    ColumnDescriptor::enumeration("mood", mood.clone()),
                ],
            ),
            ColumnDescriptor::enumeration("previous_status", status.clone()),
        ],
    );

    assert_eq!(table.enums(), [&status, &mood]);
}

#[test]
fn foreign_keys_and_referenced_tables() {
    let table = TableDescriptor::new(
        "comments",
        [
            ColumnDescriptor::uuid("post_id").references("posts"),
            ColumnDescriptor::uuid("author_id")
                .references("users")
                .on_delete(ForeignKeyAction::Cascade),
            ColumnDescriptor::uuid("editor_id").nullable().references("users"),
        ],
    );

    let fks: Vec<_> = table
        .foreign_keys()
        .map(|(column, fk)| (column.name.as_str(), fk.table.as_str(), fk.on_delete))
        .collect();

    assert_eq!(
        fks,
        [
            ("post_id", "posts", ForeignKeyAction::SetNull),
            ("author_id", "users", ForeignKeyAction::Cascade),
            ("editor_id", "users", ForeignKeyAction::SetNull),
        ]
    );
    assert_eq!(
        table.referenced_tables().into_iter().collect::<Vec<_>>(),
        ["posts", "users"]
    );
}

#[test]
fn references_defaults() {
    let column = ColumnDescriptor::uuid("user_id").references("users");
    let fk = column.foreign_key.unwrap();

    assert_eq!(fk.column, "id");
    assert_eq!(fk.on_delete, ForeignKeyAction::SetNull);
    assert_eq!(fk.on_update, ForeignKeyAction::Cascade);
}

#[test]
fn max_len_uses_tightest_bound() {
    let column = ColumnDescriptor::string("code").max_length(20).length(8);
    assert_eq!(column.max_len(), Some(8));

    let column = ColumnDescriptor::string("code").min_length(2);
    assert_eq!(column.max_len(), None);
}

#[test]
fn primary_key_takes_the_column_spelling() {
    let table = TableDescriptor::builder("legacy")
        .primary_key("id")
        .column(ColumnDescriptor::integer("ID"))
        .build();

    assert_eq!(table.primary_key, "ID");
    assert_eq!(names(&table), ["ID", "created_at", "updated_at"]);
}
