use pretty_assertions::assert_eq;
use std_util::prelude::*;
use zyra_cli::SchemaFile;
use zyra_core::rls::RlsConfig;
use zyra_core::schema::*;

const LIBRARY: &str = r#"
[[enums]]
name = "book_status"
values = ["draft", "published"]

[[tables]]
name = "authors"

[[tables.columns]]
name = "name"
type = "string"
max_length = 120

[[tables]]
name = "books"

[[tables.columns]]
name = "author_id"
type = "uuid"
references = "authors"
on_delete = "cascade"

[[tables.columns]]
name = "status"
type = "enum"
enum = "book_status"
default = "draft"

[[tables.columns]]
name = "price"
type = "decimal"
precision = 8
scale = 2
check = "price >= 0"

[[tables.indexes]]
name = "books_author_id_idx"
columns = ["author_id", "created_at DESC"]

[tables.rls]
owner_column = "author_id"
rules = ["read_own"]
"#;

fn build(src: &str) -> zyra_core::Result<SchemaDescriptor> {
    let file: SchemaFile = assert_ok!(src.parse());
    file.into_schema(&RlsConfig::default())
}

#[test]
fn lowers_tables_and_columns() {
    let schema = assert_ok!(build(LIBRARY));

    let names: Vec<&str> = schema.tables().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["authors", "books"]);

    let authors = schema.table("authors").unwrap();
    assert_eq!(authors.column("name").unwrap().max_len(), Some(120));

    let books = schema.table("books").unwrap();
    let author_id = books.column("author_id").unwrap();
    let fk = author_id.foreign_key.as_ref().unwrap();
    assert_eq!(fk.table, "authors");
    assert_eq!(fk.column, "id");
    assert_eq!(fk.on_delete, ForeignKeyAction::Cascade);
    assert_eq!(fk.on_update, ForeignKeyAction::Cascade);

    let status = books.column("status").unwrap();
    assert_eq!(status.enum_ref().unwrap().values, ["draft", "published"]);
    assert_eq!(status.default, Some(DefaultValue::Value(Value::from("draft"))));

    let price = books.column("price").unwrap();
    assert_eq!(price.ty, Type::decimal(8, 2));
    assert_eq!(price.check.as_deref(), Some("price >= 0"));
}

#[test]
fn lowers_indexes_and_policies() {
    let schema = assert_ok!(build(LIBRARY));
    let books = schema.table("books").unwrap();

    let index = &books.indexes[0];
    assert_eq!(index.name, "books_author_id_idx");
    assert_eq!(index.columns[0].name, "author_id");
    assert_eq!(index.columns[1].name, "created_at");
    assert!(index.columns[1].order.is_desc());

    assert_eq!(books.rls_policies.len(), 1);
    assert_eq!(books.rls_policies[0].name, "books_own_select");
    assert_eq!(books.rls_policies[0].using, "\"author_id\" = auth.uid()");
}

#[test]
fn relationships_and_nested_storage() {
    let schema = assert_ok!(build(
        r#"
[[tables]]
name = "teams"

[[tables.columns]]
name = "name"
type = "string"

[[tables]]
name = "projects"

[[tables.columns]]
name = "teams"
type = "array"
element = { name = "team_id", type = "uuid" }
many_to_many = { target = "teams", columns = [{ name = "role", type = "string", default = "member" }] }

[[tables.columns]]
name = "address"
type = "object"
storage = "flattened"
fields = [{ name = "city", type = "string", nullable = true }]

[[tables.columns]]
name = "milestones"
type = "array"
storage = "separate_table"
element = { name = "title", type = "string" }
"#
    ));

    let joins: Vec<&str> = schema.join_tables().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(joins, ["projects_teams"]);
    assert!(schema.table("projects_teams").unwrap().column("role").is_some());

    let separate: Vec<&str> = schema.separate_tables().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(separate, ["projects_milestones"]);

    let city = schema
        .flat_columns("projects")
        .iter()
        .find(|flat| flat.name() == "address-city")
        .unwrap();
    assert!(city.column.nullable);
}

#[test]
fn validation_constraints() {
    let schema = assert_ok!(build(
        r#"
[[tables]]
name = "accounts"

[[tables.columns]]
name = "handle"
type = "string"
min_length = 3
pattern = "^[a-z]+$"
pattern_message = "lowercase letters only"
case = "lower"

[[tables.columns]]
name = "email"
type = "string"
format = "email"

[[tables.columns]]
name = "seats"
type = "integer"
int_min = 1
even = true
"#
    ));

    let accounts = schema.table("accounts").unwrap();

    let handle = accounts.column("handle").unwrap();
    assert_eq!(handle.constraints.len(), 3);
    assert!(matches!(handle.constraints[2], Constraint::Case(LetterCase::Lower)));

    assert!(accounts.column("email").unwrap().has_format(Format::Email));

    let seats = accounts.column("seats").unwrap();
    assert_eq!(
        seats.constraints,
        [
            Constraint::IntRange(constraint::ConstraintIntRange {
                min: Some(1),
                max: None
            }),
            Constraint::Parity(Parity::Even),
        ]
    );
}

#[test]
fn unknown_type_is_an_invalid_schema() {
    let err = assert_err!(
        build(
            r#"
[[tables]]
name = "notes"

[[tables.columns]]
name = "body"
type = "varchar"
"#
        ),
        "unknown type `varchar`"
    );

    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("table `notes`"));
}

#[test]
fn unknown_enum_is_an_invalid_schema() {
    assert_err!(
        build(
            r#"
[[tables]]
name = "posts"

[[tables.columns]]
name = "status"
type = "enum"
enum = "post_status"
"#
        ),
        "unknown enum `post_status`"
    );
}

#[test]
fn unknown_referential_action() {
    assert_err!(
        build(
            r#"
[[tables]]
name = "posts"

[[tables.columns]]
name = "author_id"
type = "uuid"
references = "posts"
on_delete = "explode"
"#
        ),
        "unknown referential action `explode`"
    );
}

#[test]
fn foreign_key_to_non_primary_key_fails() {
    assert_err!(
        build(
            r#"
[[tables]]
name = "users"

[[tables.columns]]
name = "email"
type = "string"

[[tables]]
name = "posts"

[[tables.columns]]
name = "author_email"
type = "string"
references = "users"
references_column = "email"
"#
        ),
        "invalid foreign key"
    );
}

#[test]
fn unknown_fields_are_rejected() {
    let parsed: Result<SchemaFile, _> = "[[tables]]\nname = \"a\"\ncolour = \"red\"\n".parse();
    assert!(parsed.is_err());
}
