use pretty_assertions::assert_eq;
use std_util::prelude::*;
use zyra_core::rls::*;
use zyra_core::schema::*;
use zyra_sql::{Capability, Migration, Serializer, Statement};

fn schema() -> SchemaDescriptor {
    let config = RlsConfig::default();

    let users = TableDescriptor::builder("users")
        .column(ColumnDescriptor::string("email"))
        .rls_policies(OwnershipPolicy::new("users", &config).public_read().build())
        .build();

    let todos = TableDescriptor::builder("todos")
        .column(ColumnDescriptor::uuid("user_id").references("users"))
        .column(ColumnDescriptor::string("title"))
        .rls_policies(
            OwnershipPolicy::new("todos", &config)
                .can_read_own()
                .can_insert_own()
                .build(),
        )
        .build();

    let notes = TableDescriptor::builder("notes")
        .column(ColumnDescriptor::string("body"))
        .rls_policies(
            PolicyBuilder::new("notes", &config)
                .who(["authenticated"])
                .access([Operation::Delete])
                .matching(Match::Always)
                .restrictive()
                .build(),
        )
        .build();

    let tags = TableDescriptor::new("tags", [ColumnDescriptor::string("label")]);

    assert_ok!(SchemaDescriptor::new([users, todos, notes, tags], [], ""))
}

fn rls_statements(migration: &Migration) -> Vec<String> {
    let serializer = Serializer::postgresql();

    migration
        .section("Row Level Security")
        .unwrap()
        .statements
        .iter()
        .map(|stmt| serializer.serialize(stmt))
        .collect()
}

#[test]
fn policies_postgresql() {
    let schema = schema();
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);

    assert_eq!(
        rls_statements(&migration),
        [
            r#"ALTER TABLE "notes" ENABLE ROW LEVEL SECURITY;"#,
            r#"CREATE POLICY "notes_authenticated_delete" ON "notes" AS RESTRICTIVE FOR DELETE USING (auth.uid() IS NOT NULL);"#,
            r#"ALTER TABLE "users" ENABLE ROW LEVEL SECURITY;"#,
            r#"CREATE POLICY "users_self_select" ON "users" AS PERMISSIVE FOR SELECT USING ("id" = auth.uid());"#,
            r#"CREATE POLICY "users_self_update" ON "users" AS PERMISSIVE FOR UPDATE USING ("id" = auth.uid()) WITH CHECK ("id" = auth.uid());"#,
            r#"ALTER TABLE "todos" ENABLE ROW LEVEL SECURITY;"#,
            r#"CREATE POLICY "todos_own_select" ON "todos" AS PERMISSIVE FOR SELECT USING ("user_id" = auth.uid());"#,
            r#"CREATE POLICY "todos_own_insert" ON "todos" AS PERMISSIVE FOR INSERT WITH CHECK ("user_id" = auth.uid());"#,
        ]
    );
}

#[test]
fn users_table_ignores_configured_policies() {
    let schema = schema();
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);

    let users_policies: Vec<&str> = migration
        .statements()
        .filter_map(|stmt| match stmt {
            Statement::CreatePolicy(policy) if policy.on == "users" => Some(policy.name.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(users_policies, ["users_self_select", "users_self_update"]);
}

#[test]
fn tables_without_policies_keep_rls_disabled() {
    let schema = schema();
    let migration = Migration::new(&schema, &Capability::POSTGRESQL);

    assert!(!migration
        .statements()
        .any(|stmt| matches!(stmt, Statement::EnableRls(_)) && stmt.table() == Some("tags")));
}

#[test]
fn mysql_documents_missing_rls() {
    let schema = schema();
    let migration = Migration::new(&schema, &Capability::MYSQL);

    let section = migration.section("Row Level Security").unwrap();
    assert!(section.statements.is_empty());
    assert_eq!(
        section.notes,
        [
            "Row level security is not supported by this database.",
            "Enforce access rules in the application layer.",
        ]
    );
}

#[test]
fn all_policy_carries_both_clauses() {
    let rule = RlsPolicyRule::new("docs_own_all", Operation::All, "\"user_id\" = auth.uid()");

    assert_eq!(
        Serializer::postgresql().serialize(&Statement::create_policy("docs", &rule)),
        r#"CREATE POLICY "docs_own_all" ON "docs" AS PERMISSIVE FOR ALL USING ("user_id" = auth.uid()) WITH CHECK ("user_id" = auth.uid());"#
    );
}
