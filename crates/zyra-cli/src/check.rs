use crate::{theme, Config};

use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Schema file, overriding the configured one
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Fail when the schema produces warnings
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        let path = self.schema.unwrap_or_else(|| config.schema.clone());

        theme::heading("Check Schema");

        let schema = crate::load_schema(&path, config)?;

        println!(
            "  {} declared, {} join and {} separate table(s), {} enum(s)",
            style(schema.tables().len()).bold(),
            style(schema.join_tables().len()).bold(),
            style(schema.separate_tables().len()).bold(),
            style(schema.enums().len()).bold(),
        );

        let warnings = schema.warnings();

        if warnings.is_empty() {
            theme::done("No problems found");
            return Ok(());
        }

        println!();
        theme::warnings(warnings);

        if self.deny_warnings {
            bail!("schema produced {} warning(s)", warnings.len());
        }

        theme::done(format!("Schema is valid with {} warning(s)", warnings.len()));
        Ok(())
    }
}
