use crate::Target;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zyra_codegen::{Dialect, DrizzleOptions, PrismaOptions, SyncRulesOptions};
use zyra_core::rls::RlsConfig;

/// Configuration for Zyra CLI operations, usually loaded from `Zyra.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the schema file
    pub schema: PathBuf,

    /// Directory generated files are written to
    pub out_dir: PathBuf,

    /// Artifacts to generate
    pub targets: Vec<Target>,

    pub prisma: PrismaConfig,
    pub drizzle: DrizzleConfig,
    pub sync_rules: SyncRulesConfig,
    pub rls: RlsSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrismaConfig {
    pub provider: String,
    pub url: String,
    pub generator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrizzleConfig {
    /// `postgresql` or `mysql`
    pub dialect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncRulesConfig {
    pub user_id_column: String,
    pub global_bucket: String,
    pub user_bucket: String,
}

/// Names row level security policies are written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RlsSection {
    pub current_user: String,
    pub users_table: String,
    pub identity_column: String,
    pub role_column: String,
    pub owner_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: PathBuf::from("schema.toml"),
            out_dir: PathBuf::from("generated"),
            targets: Target::ALL.to_vec(),
            prisma: PrismaConfig::default(),
            drizzle: DrizzleConfig::default(),
            sync_rules: SyncRulesConfig::default(),
            rls: RlsSection::default(),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        contents.parse()
    }

    /// Loads the config file, or returns the default config if it does not
    /// exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if std::fs::exists(&path)? {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    /// Set the schema file path
    pub fn schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema = path.into();
        self
    }

    /// Set the output directory
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = path.into();
        self
    }

    /// Set the targets to generate
    pub fn targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn prisma_options(&self) -> PrismaOptions {
        PrismaOptions {
            provider: self.prisma.provider.clone(),
            url: self.prisma.url.clone(),
            generator: self.prisma.generator.clone(),
        }
    }

    /// Unknown dialects are rejected when the config is parsed; one set
    /// afterwards falls back to PostgreSQL.
    pub fn drizzle_options(&self) -> DrizzleOptions {
        DrizzleOptions {
            dialect: Dialect::parse(&self.drizzle.dialect).unwrap_or_default(),
        }
    }

    pub fn sync_rules_options(&self) -> SyncRulesOptions {
        SyncRulesOptions {
            user_id_column: self.sync_rules.user_id_column.clone(),
            global_bucket: self.sync_rules.global_bucket.clone(),
            user_bucket: self.sync_rules.user_bucket.clone(),
        }
    }

    pub fn rls_config(&self) -> RlsConfig {
        RlsConfig {
            current_user: self.rls.current_user.clone(),
            users_table: self.rls.users_table.clone(),
            identity_column: self.rls.identity_column.clone(),
            role_column: self.rls.role_column.clone(),
            owner_column: self.rls.owner_column.clone(),
        }
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;

        if Dialect::parse(&config.drizzle.dialect).is_none() {
            bail!("unknown drizzle dialect `{}`", config.drizzle.dialect);
        }

        Ok(config)
    }
}

impl Default for PrismaConfig {
    fn default() -> Self {
        let options = PrismaOptions::default();

        Self {
            provider: options.provider,
            url: options.url,
            generator: options.generator,
        }
    }
}

impl Default for DrizzleConfig {
    fn default() -> Self {
        Self {
            dialect: DrizzleOptions::default().dialect.as_str().to_string(),
        }
    }
}

impl Default for SyncRulesConfig {
    fn default() -> Self {
        let options = SyncRulesOptions::default();

        Self {
            user_id_column: options.user_id_column,
            global_bucket: options.global_bucket,
            user_bucket: options.user_bucket,
        }
    }
}

impl Default for RlsSection {
    fn default() -> Self {
        let config = RlsConfig::default();

        Self {
            current_user: config.current_user,
            users_table: config.users_table,
            identity_column: config.identity_column,
            role_column: config.role_column,
            owner_column: config.owner_column,
        }
    }
}
