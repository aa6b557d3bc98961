use crate::{theme, Config, Target};

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use zyra_core::SchemaDescriptor;

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Schema file, overriding the configured one
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output directory, overriding the configured one
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Artifacts to generate. Defaults to the configured targets
    #[arg(short, long, value_enum)]
    target: Vec<Target>,
}

impl GenerateCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        let config = self.apply(config);

        theme::heading("Generate");

        let schema = crate::load_schema(&config.schema, &config)?;
        theme::warnings(schema.warnings());

        fs::create_dir_all(&config.out_dir)?;

        let artifacts = render(&schema, &config);
        let count = artifacts.len();

        for (target, contents) in artifacts {
            let path = config.out_dir.join(target.file_name());
            fs::write(&path, contents)?;

            tracing::debug!(?target, path = %path.display(), "wrote artifact");
            theme::success(format!("Wrote {}", path.display()));
        }

        theme::done(format!(
            "Generated {count} artifact(s) in {}",
            config.out_dir.display()
        ));

        Ok(())
    }

    fn apply(self, config: &Config) -> Config {
        let mut config = config.clone();

        if let Some(schema) = self.schema {
            config = config.schema(schema);
        }

        if let Some(out) = self.out {
            config = config.out_dir(out);
        }

        if !self.target.is_empty() {
            config = config.targets(self.target);
        }

        config
    }
}

/// Renders the configured targets, in configuration order. A target listed
/// twice is rendered once.
pub fn render(schema: &SchemaDescriptor, config: &Config) -> Vec<(Target, String)> {
    let mut rendered: Vec<(Target, String)> = vec![];

    for &target in &config.targets {
        if rendered.iter().any(|(seen, _)| *seen == target) {
            continue;
        }

        rendered.push((target, target.render(schema, config)));
    }

    rendered
}
