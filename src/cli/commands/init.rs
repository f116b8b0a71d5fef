use crate::cli::output::*;
use crate::core::config::{save_config, Config};
use crate::storage::PeptideDatabase;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct InitArgs {
    /// Database file to create (default: LPI_data.db)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the effective configuration to this TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,
}

pub fn run(args: InitArgs, config: &Config) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(output) = args.output {
        config.database.target_store_path = output;
    }
    let path = &config.database.target_store_path;

    let db = PeptideDatabase::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    let counts = db.table_counts()?;
    info(&format!(
        "{} taxonomy nodes, {} organisms, {} peptides",
        format_number(counts.tax_node),
        format_number(counts.organism),
        format_number(counts.peptide)
    ));
    success(&format!("Schema ready in {}", path.display()));

    if let Some(config_path) = args.save_config {
        save_config(&config_path, &config)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        success(&format!("Configuration written to {}", config_path.display()));
    }

    Ok(())
}
