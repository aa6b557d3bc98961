use pretty_assertions::assert_eq;
use std_util::prelude::*;
use zyra_core::schema::*;
use zyra_core::Warning;

fn names(table: &TableDescriptor) -> Vec<&str> {
    table.columns.iter().map(|column| column.name.as_str()).collect()
}

fn teams(name: &str) -> TableDescriptor {
    TableDescriptor::new(name, [ColumnDescriptor::string("name")])
}

fn projects(name: &str, target: &str) -> TableDescriptor {
    TableDescriptor::new(
        name,
        [
            ColumnDescriptor::string("title"),
            ColumnDescriptor::array("teams", ColumnDescriptor::uuid("team_id")).many_to_many(
                ManyToManyMarker::new(target)
                    .additional_columns([ColumnDescriptor::string("role").default("member")]),
            ),
        ],
    )
}

#[test]
fn belongs_to_many_synthesizes_join_table() {
    let schema = assert_ok!(SchemaDescriptor::new(
        [projects("projects", "teams"), teams("teams")],
        [],
        ""
    ));

    assert_eq!(schema.join_tables().len(), 1);
    let join = &schema.join_tables()[0];

    assert_eq!(join.name, "projects_teams");
    assert_eq!(
        names(join),
        ["id", "project_id", "team_id", "role", "created_at", "updated_at"]
    );

    let project_id = join.column("project_id").unwrap();
    assert!(!project_id.nullable);
    assert_eq!(project_id.ty, Type::Uuid);

    let fk = project_id.foreign_key.as_ref().unwrap();
    assert_eq!(fk.table, "projects");
    assert_eq!(fk.column, "id");
    assert_eq!(fk.on_delete, ForeignKeyAction::Cascade);
    assert_eq!(fk.on_update, ForeignKeyAction::Cascade);

    let team_id = join.column("team_id").unwrap();
    assert!(!team_id.nullable);
    assert_eq!(team_id.foreign_key.as_ref().unwrap().table, "teams");

    assert_eq!(
        join.column("role").unwrap().default,
        Some(DefaultValue::Value(Value::from("member")))
    );

    let projects = schema.table("projects").unwrap();
    assert!(projects.column("teams").is_none());
    assert_eq!(names(projects), ["id", "title", "created_at", "updated_at"]);

    assert_eq!(schema.table_kind("projects_teams"), Some(TableKind::Join));
    assert_eq!(schema.table_kind("projects"), Some(TableKind::Declared));
    assert!(schema.warnings().is_empty());
}

#[test]
fn join_table_has_unique_pair_index() {
    let schema = assert_ok!(SchemaDescriptor::new(
        [projects("projects", "teams"), teams("teams")],
        [],
        ""
    ));

    let join = &schema.join_tables()[0];
    let index = &join.indexes[0];

    assert!(index.unique);
    assert_eq!(index.name, "projects_teams_project_id_team_id_key");
    assert_eq!(
        index.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        ["project_id", "team_id"]
    );
}

#[test]
fn join_table_uses_db_prefix() {
    let schema = assert_ok!(SchemaDescriptor::new(
        [projects("app_projects", "teams"), teams("app_teams")],
        [],
        "app_"
    ));

    let join = &schema.join_tables()[0];
    assert_eq!(join.name, "app_projects_teams");
    assert_eq!(
        join.column("team_id").unwrap().foreign_key.as_ref().unwrap().table,
        "app_teams"
    );
    assert_eq!(
        join.column("project_id").unwrap().foreign_key.as_ref().unwrap().table,
        "app_projects"
    );
}

#[test]
fn explicit_join_table_and_column_names() {
    let users = TableDescriptor::new("test_users", [ColumnDescriptor::string("email")]);
    let organizations = TableDescriptor::new(
        "test_organizations",
        [ColumnDescriptor::array("members", ColumnDescriptor::uuid("id")).many_to_many(
            ManyToManyMarker::new("users")
                .join_table_name("user_organizations")
                .source_column_name("org_id")
                .target_column_name("member_id")
                .target_on_delete(ForeignKeyAction::Restrict),
        )],
    );

    let schema = assert_ok!(SchemaDescriptor::new([users, organizations], [], "test_"));
    let join = &schema.join_tables()[0];

    assert_eq!(join.name, "test_user_organizations");
    assert_eq!(
        names(join),
        ["id", "org_id", "member_id", "created_at", "updated_at"]
    );
    assert_eq!(
        join.column("member_id").unwrap().foreign_key.as_ref().unwrap().on_delete,
        ForeignKeyAction::Restrict
    );
}

#[test]
fn self_referential_relationship_prefixes_target_column() {
    let users = TableDescriptor::new(
        "users",
        [ColumnDescriptor::array("follows", ColumnDescriptor::uuid("id"))
            .many_to_many(ManyToManyMarker::new("users").join_table_name("user_follows"))],
    );

    let schema = assert_ok!(SchemaDescriptor::new([users], [], ""));
    let join = &schema.join_tables()[0];

    assert_eq!(join.name, "user_follows");
    assert_eq!(
        names(join),
        ["id", "user_id", "related_user_id", "created_at", "updated_at"]
    );
}

#[test]
fn join_key_columns_copy_referenced_key_type() {
    let tags = TableDescriptor::builder("tags")
        .primary_key("tag_id")
        .column(ColumnDescriptor::bigint("tag_id"))
        .build();
    let posts = TableDescriptor::new(
        "posts",
        [ColumnDescriptor::array("tags", ColumnDescriptor::bigint("tag")).belongs_to_many("tags")],
    );

    let schema = assert_ok!(SchemaDescriptor::new([posts, tags], [], ""));
    let join = &schema.join_tables()[0];

    assert_eq!(join.name, "posts_tags");
    let tag_id = join.column("tag_id").unwrap();
    assert_eq!(tag_id.ty, Type::BigInt);
    assert_eq!(tag_id.foreign_key.as_ref().unwrap().column, "tag_id");
}

#[test]
fn missing_target_keeps_plain_column() {
    let schema = assert_ok!(SchemaDescriptor::new(
        [projects("projects", "squads")],
        [],
        ""
    ));

    assert!(schema.join_tables().is_empty());

    let column = schema.table("projects").unwrap().column("teams").unwrap();
    assert!(column.many_to_many_marker().is_none());

    assert_eq!(
        schema.warnings(),
        [Warning::ManyToManyTargetMissing {
            table: "projects".to_string(),
            column: "teams".to_string(),
            target: "squads".to_string(),
        }]
    );
}

#[test]
fn both_sides_declaring_the_relationship_share_one_join_table() {
    let teams = TableDescriptor::new(
        "teams",
        [ColumnDescriptor::array("projects", ColumnDescriptor::uuid("id")).belongs_to_many("projects")],
    );

    let schema = assert_ok!(SchemaDescriptor::new(
        [teams, projects("projects", "teams")],
        [],
        ""
    ));

    assert_eq!(schema.join_tables().len(), 1);

    // `projects` is resolved first, so its marker shapes the join table.
    let join = &schema.join_tables()[0];
    assert_eq!(
        names(join),
        ["id", "project_id", "team_id", "role", "created_at", "updated_at"]
    );
    assert!(schema.table("teams").unwrap().column("projects").is_none());
}

#[test]
fn finalized_tables_carry_no_markers() {
    let schema = assert_ok!(SchemaDescriptor::new(
        [projects("projects", "teams"), teams("teams")],
        [],
        ""
    ));

    for table in schema.all_tables() {
        for column in &table.columns {
            assert!(column.many_to_many_marker().is_none(), "{}.{}", table.name, column.name);
        }
    }
}
