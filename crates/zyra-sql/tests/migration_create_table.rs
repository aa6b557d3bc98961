use pretty_assertions::assert_eq;
use std_util::prelude::*;
use zyra_core::schema::*;
use zyra_sql::{Serializer, Statement};

fn create_table(schema: &SchemaDescriptor, table: &str, serializer: Serializer) -> String {
    let table = schema.table(table).unwrap();
    serializer.serialize(&Statement::create_table(schema, table, serializer.capability()))
}

fn users() -> TableDescriptor {
    TableDescriptor::new(
        "users",
        [
            ColumnDescriptor::string("email").unique().max_length(255),
            ColumnDescriptor::string("name").nullable(),
            ColumnDescriptor::integer("age").default(0),
            ColumnDescriptor::boolean("active").default(true),
        ],
    )
}

fn products() -> TableDescriptor {
    TableDescriptor::new(
        "products",
        [
            ColumnDescriptor::enumeration("status", EnumDescriptor::new("status", ["draft", "live"]))
                .default("draft"),
            ColumnDescriptor::decimal("price", 10, 2).check("price >= 0"),
            ColumnDescriptor::double("weight").nullable(),
            ColumnDescriptor::bigint("views").default(0),
            ColumnDescriptor::string("secret").encrypted().nullable(),
            ColumnDescriptor::string("sku").unique(),
            ColumnDescriptor::string("code").default("A'1"),
        ],
    )
}

#[test]
fn create_table_postgresql() {
    let schema = assert_ok!(SchemaDescriptor::new([users()], [], ""));

    assert_eq!(
        create_table(&schema, "users", Serializer::postgresql()),
        r#"CREATE TABLE "users" (
    "id" UUID NOT NULL,
    "email" TEXT NOT NULL UNIQUE,
    "name" TEXT,
    "age" INTEGER NOT NULL DEFAULT 0,
    "active" BOOLEAN NOT NULL DEFAULT TRUE,
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY ("id")
);"#
    );
}

#[test]
fn create_table_mysql() {
    let schema = assert_ok!(SchemaDescriptor::new([users()], [], ""));

    assert_eq!(
        create_table(&schema, "users", Serializer::mysql()),
        r#"CREATE TABLE `users` (
    `id` CHAR(36) NOT NULL,
    `email` VARCHAR(255) NOT NULL UNIQUE,
    `name` TEXT,
    `age` INT NOT NULL DEFAULT 0,
    `active` BOOLEAN NOT NULL DEFAULT TRUE,
    `created_at` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    `updated_at` DATETIME DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"#
    );
}

#[test]
fn column_types_postgresql() {
    let schema = assert_ok!(SchemaDescriptor::new([products()], [], ""));

    assert_eq!(
        create_table(&schema, "products", Serializer::postgresql()),
        r#"CREATE TABLE "products" (
    "id" UUID NOT NULL,
    "status" "status" NOT NULL DEFAULT 'draft',
    "price" DECIMAL(10, 2) NOT NULL CHECK (price >= 0),
    "weight" DOUBLE PRECISION,
    "views" BIGINT NOT NULL DEFAULT 0,
    "secret" TEXT,
    "sku" TEXT NOT NULL UNIQUE,
    "code" TEXT NOT NULL DEFAULT 'A''1',
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY ("id")
);"#
    );
}

#[test]
fn column_types_mysql() {
    let schema = assert_ok!(SchemaDescriptor::new([products()], [], ""));

    assert_eq!(
        create_table(&schema, "products", Serializer::mysql()),
        r#"CREATE TABLE `products` (
    `id` CHAR(36) NOT NULL,
    `status` ENUM('draft', 'live') NOT NULL DEFAULT 'draft',
    `price` DECIMAL(10, 2) NOT NULL CHECK (price >= 0),
    `weight` DOUBLE,
    `views` BIGINT NOT NULL DEFAULT 0,
    `secret` TEXT,
    `sku` VARCHAR(255) NOT NULL UNIQUE,
    `code` VARCHAR(255) NOT NULL DEFAULT 'A''1',
    `created_at` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    `updated_at` DATETIME DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"#
    );
}

#[test]
fn string_primary_key_is_bounded_on_mysql() {
    let accounts = TableDescriptor::builder("accounts")
        .primary_key("account_id")
        .column(ColumnDescriptor::string("account_id"))
        .build();
    let schema = assert_ok!(SchemaDescriptor::new([accounts], [], ""));

    assert_eq!(
        create_table(&schema, "accounts", Serializer::mysql()),
        r#"CREATE TABLE `accounts` (
    `account_id` VARCHAR(255) NOT NULL,
    `created_at` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    `updated_at` DATETIME DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (`account_id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"#
    );

    assert_eq!(
        create_table(&schema, "accounts", Serializer::postgresql()),
        r#"CREATE TABLE "accounts" (
    "account_id" TEXT NOT NULL,
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY ("account_id")
);"#
    );
}

#[test]
fn flattened_object_columns() {
    let customers = TableDescriptor::new(
        "customers",
        [ColumnDescriptor::object(
            "address",
            [
                ColumnDescriptor::string("addr_ln1"),
                ColumnDescriptor::string("city").nullable(),
            ],
        )
        .flattened()],
    );
    let schema = assert_ok!(SchemaDescriptor::new([customers], [], ""));

    assert_eq!(
        create_table(&schema, "customers", Serializer::postgresql()),
        r#"CREATE TABLE "customers" (
    "id" UUID NOT NULL,
    "address-addr_ln1" TEXT NOT NULL,
    "address-city" TEXT,
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY ("id")
);"#
    );
}

#[test]
fn inline_nested_values_are_json() {
    let events = TableDescriptor::new(
        "events",
        [
            ColumnDescriptor::object("payload", [ColumnDescriptor::string("kind")]),
            ColumnDescriptor::array("tags", ColumnDescriptor::string("tag")).nullable(),
        ],
    );
    let schema = assert_ok!(SchemaDescriptor::new([events], [], ""));

    let pg = create_table(&schema, "events", Serializer::postgresql());
    assert!(pg.contains("\"payload\" JSONB NOT NULL,"));
    assert!(pg.contains("\"tags\" JSONB,"));

    let mysql = create_table(&schema, "events", Serializer::mysql());
    assert!(mysql.contains("`payload` JSON NOT NULL,"));
    assert!(mysql.contains("`tags` JSON,"));
}

#[test]
fn identifiers_are_escaped() {
    let table = TableDescriptor::new("odd\"name", [ColumnDescriptor::string("weird`col")]);
    let schema = assert_ok!(SchemaDescriptor::new([table], [], ""));

    let pg = create_table(&schema, "odd\"name", Serializer::postgresql());
    assert!(pg.starts_with("CREATE TABLE \"odd\"\"name\" ("));
    assert!(pg.contains("\"weird`col\" TEXT NOT NULL"));

    let mysql = create_table(&schema, "odd\"name", Serializer::mysql());
    assert!(mysql.starts_with("CREATE TABLE `odd\"name` ("));
    assert!(mysql.contains("`weird``col` TEXT NOT NULL"));
}

#[test]
fn primary_key_clause_uses_the_column_spelling() {
    let legacy = TableDescriptor::builder("legacy")
        .primary_key("id")
        .column(ColumnDescriptor::integer("ID"))
        .build();
    let schema = assert_ok!(SchemaDescriptor::new([legacy], [], ""));

    let sql = create_table(&schema, "legacy", Serializer::postgresql());

    assert!(sql.contains("    \"ID\" INTEGER NOT NULL,\n"));
    assert!(sql.ends_with("    PRIMARY KEY (\"ID\")\n);"));
}
