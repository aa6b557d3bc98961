mod check;
mod config;
mod generate;
mod schema_file;
mod target;
mod theme;

pub use check::CheckCommand;
pub use config::*;
pub use generate::{render, GenerateCommand};
pub use schema_file::SchemaFile;
pub use target::Target;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use zyra_core::SchemaDescriptor;

/// Zyra CLI library for building custom command-line tools
#[derive(Debug, Default)]
pub struct ZyraCli {
    /// When set, used instead of the `--config` file.
    config: Option<Config>,
}

impl ZyraCli {
    /// Create a new ZyraCli that reads its configuration from `--config`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ZyraCli instance with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        let config = match &self.config {
            Some(config) => config.clone(),
            None => Config::load_or_default(&cli.config)?,
        };

        match cli.command {
            Command::Generate(cmd) => cmd.run(&config),
            Command::Check(cmd) => cmd.run(&config),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "zyra")]
#[command(about = "Zyra - schema compiler for SQL, Prisma, Zod and Rust models")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "Zyra.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Generate every configured artifact
    Generate(GenerateCommand),

    /// Build the schema and report problems without writing files
    Check(CheckCommand),
}

/// Loads the schema file at `path` and builds the schema.
pub fn load_schema(path: &Path, config: &Config) -> Result<SchemaDescriptor> {
    let file = SchemaFile::load(path)
        .map_err(|err| err.context(format!("failed to load schema file `{}`", path.display())))?;

    let schema = file.into_schema(&config.rls_config())?;

    tracing::info!(
        tables = schema.all_tables().len(),
        enums = schema.enums().len(),
        warnings = schema.warnings().len(),
        "schema loaded"
    );

    Ok(schema)
}
