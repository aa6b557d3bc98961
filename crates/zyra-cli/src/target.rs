use crate::Config;

use serde::{Deserialize, Serialize};
use zyra_core::SchemaDescriptor;
use zyra_sql::Serializer;

/// An artifact the CLI can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// PostgreSQL migration script
    Postgres,

    /// MySQL migration script
    Mysql,

    /// Prisma schema
    Prisma,

    /// Drizzle ORM schema
    Drizzle,

    /// Zod validation schemas
    Zod,

    /// Rust model declarations
    Rust,

    /// Sync bucket definitions
    SyncRules,
}

impl Target {
    pub const ALL: [Target; 7] = [
        Target::Postgres,
        Target::Mysql,
        Target::Prisma,
        Target::Drizzle,
        Target::Zod,
        Target::Rust,
        Target::SyncRules,
    ];

    /// Name of the generated file inside the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Target::Postgres => "postgres.sql",
            Target::Mysql => "mysql.sql",
            Target::Prisma => "schema.prisma",
            Target::Drizzle => "drizzle.ts",
            Target::Zod => "schema.ts",
            Target::Rust => "models.rs",
            Target::SyncRules => "sync-rules.yaml",
        }
    }

    pub fn render(self, schema: &SchemaDescriptor, config: &Config) -> String {
        match self {
            Target::Postgres => Serializer::postgresql().migration_script(schema),
            Target::Mysql => Serializer::mysql().migration_script(schema),
            Target::Prisma => zyra_codegen::prisma::generate(schema, &config.prisma_options()),
            Target::Drizzle => zyra_codegen::drizzle::generate(schema, &config.drizzle_options()),
            Target::Zod => zyra_codegen::zod::generate(schema),
            Target::Rust => zyra_codegen::rust_model::generate(schema),
            Target::SyncRules => zyra_codegen::sync_rules::generate(schema, &config.sync_rules_options()),
        }
    }
}
