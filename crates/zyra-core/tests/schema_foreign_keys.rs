use pretty_assertions::assert_eq;
use std_util::prelude::*;
use zyra_core::schema::*;
use zyra_core::Warning;

fn users() -> TableDescriptor {
    TableDescriptor::new(
        "users",
        [ColumnDescriptor::string("email").unique()],
    )
}

#[test]
fn foreign_key_to_non_primary_key_is_fatal() {
    let posts = TableDescriptor::new(
        "posts",
        [ColumnDescriptor::string("author_email").references_column("users", "email")],
    );

    let err = assert_err!(
        SchemaDescriptor::new([users(), posts], [], ""),
        "`posts.author_email` references `users.email`, but the primary key of `users` is `id`"
    );
    assert!(err.is_invalid_foreign_key());
    assert!(!err.is_invalid_schema());
}

#[test]
fn primary_key_comparison_ignores_case() {
    let posts = TableDescriptor::new(
        "posts",
        [ColumnDescriptor::uuid("author_id").references_column("users", "ID")],
    );

    let schema = assert_ok!(SchemaDescriptor::new([users(), posts], [], ""));
    assert!(schema.warnings().is_empty());
}

#[test]
fn default_reference_fails_for_custom_primary_key() {
    let accounts = TableDescriptor::builder("accounts")
        .primary_key("account_id")
        .column(ColumnDescriptor::uuid("account_id"))
        .build();
    let invoices = TableDescriptor::new(
        "invoices",
        [ColumnDescriptor::uuid("account_id").references("accounts")],
    );

    assert_err!(
        SchemaDescriptor::new([accounts, invoices], [], ""),
        "reference `account_id` instead"
    );
}

#[test]
fn foreign_key_to_unknown_table_is_a_warning() {
    let posts = TableDescriptor::new(
        "posts",
        [ColumnDescriptor::uuid("category_id").references("categories")],
    );

    let schema = assert_ok!(SchemaDescriptor::new([posts], [], ""));
    assert_eq!(
        schema.warnings(),
        [Warning::ForeignKeyTargetMissing {
            table: "posts".to_string(),
            column: "category_id".to_string(),
            target: "categories".to_string(),
        }]
    );
}

#[test]
fn references_resolve_through_db_prefix() {
    let users = TableDescriptor::new("app_users", [ColumnDescriptor::string("email")]);
    let posts = TableDescriptor::new(
        "app_posts",
        [ColumnDescriptor::uuid("author_id").references("users")],
    );

    let schema = assert_ok!(SchemaDescriptor::new([posts, users], [], "app_"));

    assert!(schema.warnings().is_empty());
    assert_eq!(schema.table("users").unwrap().name, "app_users");
    assert_eq!(schema.stripped_name("app_posts"), "posts");
}

#[test]
fn foreign_keys_inside_flattened_objects_are_checked() {
    let docs = TableDescriptor::new(
        "docs",
        [ColumnDescriptor::object(
            "owner",
            [ColumnDescriptor::string("email").references_column("users", "email")],
        )
        .flattened()],
    );

    assert_err!(
        SchemaDescriptor::new([users(), docs], [], ""),
        "`docs.owner-email` references `users.email`"
    );
}

#[test]
fn foreign_keys_inside_json_columns_are_ignored() {
    let docs = TableDescriptor::new(
        "docs",
        [ColumnDescriptor::object(
            "owner",
            [ColumnDescriptor::string("email").references_column("users", "email")],
        )],
    );

    assert_ok!(SchemaDescriptor::new([users(), docs], [], ""));
}

#[test]
fn error_context_is_displayed_first() {
    let posts = TableDescriptor::new(
        "posts",
        [ColumnDescriptor::string("author_email").references_column("users", "email")],
    );

    let err = assert_err!(SchemaDescriptor::new([users(), posts], [], ""))
        .context(zyra_core::Error::invalid_schema("failed to build `blog`"));

    assert!(err
        .to_string()
        .starts_with("invalid schema: failed to build `blog`: invalid foreign key"));
    assert!(err.is_invalid_schema());
}

#[test]
fn shared_context_keeps_its_message() {
    let context = zyra_core::Error::invalid_schema("failed to build `blog`");
    let kept = context.clone();

    let err = zyra_core::Error::invalid_schema("column `x`: unknown type `blob`").context(context);

    assert_eq!(
        err.to_string(),
        "invalid schema: failed to build `blog`: invalid schema: column `x`: unknown type `blob`"
    );
    assert!(!err.is_invalid_schema());
    assert!(kept.is_invalid_schema());

    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "invalid schema: column `x`: unknown type `blob`");
}
