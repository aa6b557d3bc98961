use pretty_assertions::assert_eq;
use std_util::prelude::*;
use zyra_core::schema::*;
use zyra_sql::{stmt, Capability, Migration, Serializer, Statement};

fn library() -> Vec<TableDescriptor> {
    vec![
        TableDescriptor::builder("books")
            .column(ColumnDescriptor::uuid("author_id").references("authors"))
            .column(ColumnDescriptor::enumeration(
                "status",
                EnumDescriptor::new("book_status", ["draft", "published"]),
            ))
            .index(IndexDescriptor::new("books_author_id_idx").column("author_id"))
            .build(),
        TableDescriptor::new("authors", [ColumnDescriptor::string("name")]),
    ]
}

fn foreign_keys(migration: &Migration) -> Vec<&stmt::AddForeignKey> {
    migration
        .statements()
        .filter_map(|stmt| match stmt {
            Statement::AddForeignKey(fk) => Some(fk),
            _ => None,
        })
        .collect()
}

fn created_tables(migration: &Migration) -> Vec<&str> {
    migration
        .statements()
        .filter_map(|stmt| match stmt {
            Statement::CreateTable(table) => Some(table.name.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn full_script_postgresql() {
    let schema = assert_ok!(SchemaDescriptor::new(library(), [], ""));

    assert_eq!(
        Serializer::postgresql().migration_script(&schema),
        r#"-- Create Enums
CREATE TYPE "book_status" AS ENUM ('draft', 'published');

-- Create Tables
CREATE TABLE "authors" (
    "id" UUID NOT NULL,
    "name" TEXT NOT NULL,
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY ("id")
);

CREATE TABLE "books" (
    "id" UUID NOT NULL,
    "author_id" UUID NOT NULL,
    "status" "book_status" NOT NULL,
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY ("id")
);

-- Indexes
CREATE INDEX "books_author_id_idx" ON "books" ("author_id");

-- Foreign Keys
ALTER TABLE "books" ADD CONSTRAINT "books_author_id_fkey" FOREIGN KEY ("author_id") REFERENCES "authors" ("id") ON DELETE SET NULL ON UPDATE CASCADE;

-- Triggers
CREATE OR REPLACE FUNCTION "authors_update_updated_at"()
RETURNS TRIGGER AS $$
BEGIN
    NEW."updated_at" = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER "authors_updated_at_trigger"
BEFORE UPDATE ON "authors"
FOR EACH ROW
EXECUTE FUNCTION "authors_update_updated_at"();

CREATE OR REPLACE FUNCTION "books_update_updated_at"()
RETURNS TRIGGER AS $$
BEGIN
    NEW."updated_at" = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER "books_updated_at_trigger"
BEFORE UPDATE ON "books"
FOR EACH ROW
EXECUTE FUNCTION "books_update_updated_at"();
"#
    );
}

#[test]
fn full_script_mysql() {
    let schema = assert_ok!(SchemaDescriptor::new(library(), [], ""));
    let script = Serializer::mysql().migration_script(&schema);

    assert!(script.starts_with(
        "-- Create Enums\n-- Enum values are declared inline on each enum column.\n\n-- Create Tables\n"
    ));
    assert!(script.contains("`status` ENUM('draft', 'published') NOT NULL,"));
    assert!(script.contains(
        "ALTER TABLE `books` ADD CONSTRAINT `books_author_id_fkey` FOREIGN KEY (`author_id`) REFERENCES `authors` (`id`) ON DELETE SET NULL ON UPDATE CASCADE;"
    ));
    assert!(script.contains(
        "CREATE TRIGGER `books_updated_at_trigger`\nBEFORE UPDATE ON `books`\nFOR EACH ROW\nSET NEW.`updated_at` = CURRENT_TIMESTAMP;"
    ));
    assert!(script.ends_with(
        "-- Row Level Security\n-- Row level security is not supported by this database.\n-- Enforce access rules in the application layer.\n"
    ));
    assert!(!script.contains("CREATE TYPE"));
    assert!(!script.contains("FUNCTION"));
}

#[test]
fn sections_follow_execution_order() {
    let schema = assert_ok!(SchemaDescriptor::new(library(), [], ""));
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);

    let titles: Vec<&str> = migration.sections().iter().map(|s| s.title).collect();
    assert_eq!(
        titles,
        ["Create Enums", "Create Tables", "Indexes", "Foreign Keys", "Triggers"]
    );
    assert_eq!(created_tables(&migration), ["authors", "books"]);
}

#[test]
fn many_to_many_join_table() {
    let projects = TableDescriptor::new(
        "projects",
        [
            ColumnDescriptor::string("title"),
            ColumnDescriptor::array("teams", ColumnDescriptor::uuid("team_id")).many_to_many(
                ManyToManyMarker::new("teams")
                    .additional_columns([ColumnDescriptor::string("role").default("member")]),
            ),
        ],
    );
    let teams = TableDescriptor::new("teams", [ColumnDescriptor::string("name")]);

    let schema = assert_ok!(SchemaDescriptor::new([projects, teams], [], ""));
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);
    let serializer = Serializer::postgresql();

    assert_eq!(created_tables(&migration), ["projects", "teams", "projects_teams"]);

    let join = migration
        .statements()
        .find(|stmt| matches!(stmt, Statement::CreateTable(table) if table.name == "projects_teams"))
        .unwrap();

    assert_eq!(
        serializer.serialize(join),
        r#"CREATE TABLE "projects_teams" (
    "id" UUID NOT NULL,
    "project_id" UUID NOT NULL,
    "team_id" UUID NOT NULL,
    "role" TEXT NOT NULL DEFAULT 'member',
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY ("id")
);"#
    );

    let indexes = migration.section("Indexes").unwrap();
    assert_eq!(
        serializer.serialize(&indexes.statements[0]),
        r#"CREATE UNIQUE INDEX "projects_teams_project_id_team_id_key" ON "projects_teams" ("project_id", "team_id");"#
    );

    let fks: Vec<String> = migration
        .section("Foreign Keys")
        .unwrap()
        .statements
        .iter()
        .map(|stmt| serializer.serialize(stmt))
        .collect();

    assert_eq!(
        fks,
        [
            r#"ALTER TABLE "projects_teams" ADD CONSTRAINT "projects_teams_project_id_fkey" FOREIGN KEY ("project_id") REFERENCES "projects" ("id") ON DELETE CASCADE ON UPDATE CASCADE;"#,
            r#"ALTER TABLE "projects_teams" ADD CONSTRAINT "projects_teams_team_id_fkey" FOREIGN KEY ("team_id") REFERENCES "teams" ("id") ON DELETE CASCADE ON UPDATE CASCADE;"#,
        ]
    );
}

#[test]
fn cycle_still_gets_every_foreign_key() {
    let schema = assert_ok!(SchemaDescriptor::new(
        [
            TableDescriptor::new("b", [ColumnDescriptor::uuid("a_id").references("a")]),
            TableDescriptor::new("a", [ColumnDescriptor::uuid("b_id").references("b")]),
            TableDescriptor::new("c", []),
        ],
        [],
        ""
    ));
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);

    assert_eq!(created_tables(&migration), ["b", "a", "c"]);

    let fks: Vec<(&str, &str, &str)> = foreign_keys(&migration)
        .into_iter()
        .map(|fk| (fk.table.as_str(), fk.column.as_str(), fk.references.as_str()))
        .collect();
    assert_eq!(fks, [("b", "a_id", "a"), ("a", "b_id", "b")]);
}

#[test]
fn flattened_foreign_keys_are_added() {
    let countries = TableDescriptor::new("countries", [ColumnDescriptor::string("name")]);
    let customers = TableDescriptor::new(
        "customers",
        [
            ColumnDescriptor::object(
                "address",
                [ColumnDescriptor::uuid("country_id").references("countries")],
            )
            .flattened(),
            ColumnDescriptor::object(
                "billing",
                [ColumnDescriptor::uuid("country_id").references("countries")],
            ),
        ],
    );

    let schema = assert_ok!(SchemaDescriptor::new([customers, countries], [], ""));
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);

    let fks = foreign_keys(&migration);
    assert_eq!(fks.len(), 1);
    assert_eq!(
        Serializer::postgresql().serialize(&Statement::AddForeignKey(fks[0].clone())),
        r#"ALTER TABLE "customers" ADD CONSTRAINT "customers_address-country_id_fkey" FOREIGN KEY ("address-country_id") REFERENCES "countries" ("id") ON DELETE SET NULL ON UPDATE CASCADE;"#
    );
}

#[test]
fn separate_table_references_parent() {
    let orders = TableDescriptor::new(
        "orders",
        [ColumnDescriptor::array(
            "items",
            ColumnDescriptor::object(
                "item",
                [ColumnDescriptor::string("sku"), ColumnDescriptor::integer("quantity")],
            ),
        )
        .strategy(StorageStrategy::separate_table(Relationship::OneToMany))],
    );

    let schema = assert_ok!(SchemaDescriptor::new([orders], [], ""));
    let migration = Migration::new(&schema, &Capability::MYSQL);

    assert_eq!(created_tables(&migration), ["orders", "orders_items"]);

    let fks = foreign_keys(&migration);
    assert_eq!(fks.len(), 1);
    assert_eq!(fks[0].table, "orders_items");
    assert_eq!(fks[0].column, "order_id");
    assert_eq!(fks[0].on_delete, ForeignKeyAction::Cascade);
}

#[test]
fn foreign_key_to_unknown_table_is_skipped() {
    let posts = TableDescriptor::new("posts", [ColumnDescriptor::uuid("owner_id").references("ghosts")]);
    let schema = assert_ok!(SchemaDescriptor::new([posts], [], ""));
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);

    assert!(foreign_keys(&migration).is_empty());
    assert!(migration.section("Foreign Keys").is_none());
}
