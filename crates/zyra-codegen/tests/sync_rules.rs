use pretty_assertions::assert_eq;
use std_util::prelude::*;
use zyra_codegen::sync_rules::{self, SyncRulesOptions};
use zyra_core::schema::*;

fn app() -> SchemaDescriptor {
    let users = TableDescriptor::new("users", [ColumnDescriptor::string("email")]);
    let todos = TableDescriptor::new(
        "todos",
        [
            ColumnDescriptor::uuid("user_id").references("users"),
            ColumnDescriptor::string("title"),
        ],
    );
    let tags = TableDescriptor::new("tags", [ColumnDescriptor::string("label")]);
    let orders = TableDescriptor::new(
        "orders",
        [
            ColumnDescriptor::uuid("user_id").references("users"),
            ColumnDescriptor::array(
                "items",
                ColumnDescriptor::object("item", [ColumnDescriptor::string("sku")]),
            )
            .strategy(StorageStrategy::separate_table(Relationship::OneToMany)),
        ],
    );

    assert_ok!(SchemaDescriptor::new([users, todos, tags, orders], [], ""))
}

#[test]
fn buckets_split_by_owner() {
    assert_eq!(
        sync_rules::generate(&app(), &SyncRulesOptions::default()),
        r#"# Generated by zyra. Do not edit by hand.
bucket_definitions:
  global:
    data:
      - SELECT * FROM "tags"
      # join and child tables
      - SELECT * FROM "orders_items"
  user_data:
    parameters: SELECT request.user_id() AS user_id
    data:
      - SELECT * FROM "users" WHERE "id" = bucket.user_id
      - SELECT * FROM "orders" WHERE "user_id" = bucket.user_id
      - SELECT * FROM "todos" WHERE "user_id" = bucket.user_id
"#
    );
}

#[test]
fn custom_owner_column_and_bucket_names() {
    let notes = TableDescriptor::new("notes", [ColumnDescriptor::uuid("owner_id")]);
    let schema = assert_ok!(SchemaDescriptor::new([notes], [], ""));
    let options = SyncRulesOptions {
        user_id_column: "owner_id".to_string(),
        global_bucket: "shared".to_string(),
        user_bucket: "mine".to_string(),
    };

    assert_eq!(
        sync_rules::generate(&schema, &options),
        r#"# Generated by zyra. Do not edit by hand.
bucket_definitions:
  shared:
    data: []
  mine:
    parameters: SELECT request.user_id() AS user_id
    data:
      - SELECT * FROM "notes" WHERE "owner_id" = bucket.user_id
"#
    );
}
