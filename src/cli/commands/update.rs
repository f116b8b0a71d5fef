use crate::cli::output::*;
use crate::core::config::Config;
use crate::core::ingest::{ingest_file, IngestOptions, IngestStats};
use crate::storage::PeptideDatabase;
use crate::utils::progress::input_progress_bar;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct UpdateArgs {
    /// Input FASTA file (plain, .gz or .bz2); headers must be '>seq_id taxon_id taxonomy'
    #[arg(value_name = "FASTA")]
    pub input: PathBuf,

    /// Output database file (default: LPI_data.db)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also store raw sequences in the `sequence` table
    #[arg(short = 's', long = "seq")]
    pub store_sequences: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl UpdateArgs {
    /// Command-line flags win over the configuration file.
    pub fn resolve(&self, config: &Config) -> (PathBuf, IngestOptions, bool) {
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.database.target_store_path.clone());
        let options = IngestOptions {
            store_sequences: self.store_sequences || config.database.persist_raw_sequence,
        };
        let progress = config.ingest.progress && !self.no_progress;
        (output, options, progress)
    }
}

pub fn run(args: UpdateArgs, config: &Config) -> anyhow::Result<()> {
    let (output, options, progress) = args.resolve(config);
    let started = chrono::Local::now();
    tracing::info!("Started {}", started.format("%Y-%m-%d %H:%M:%S"));

    let mut db = PeptideDatabase::open(&output)
        .with_context(|| format!("Failed to open database {}", output.display()))?;
    info(&format!("Database: {}", output.display()));
    info(&format!("Reading:  {}", args.input.display()));

    let pb = input_progress_bar(progress, "Ingesting");
    let stats = ingest_file(&mut db, &args.input, options, Some(&pb))
        .with_context(|| format!("Failed to ingest {}", args.input.display()))?;
    pb.finish_and_clear();

    let finished = chrono::Local::now();
    tracing::info!(
        "Finished {} ({}s)",
        finished.format("%Y-%m-%d %H:%M:%S"),
        (finished - started).num_seconds()
    );

    print_summary(&stats, options.store_sequences);
    success(&format!("Updated {}", output.display()));
    Ok(())
}

fn print_summary(stats: &IngestStats, store_sequences: bool) {
    section_header_with_line("Ingestion Summary");

    tree_item(false, "Total sequences", Some(&format_number(stats.total_records)));
    tree_item(false, "Stored records", Some(&format_number(stats.stored_records)));
    if stats.skipped_records > 0 {
        tree_item(false, "Skipped (incomplete)", Some(&format_number(stats.skipped_records)));
    }

    let mut inserted = vec![
        ("peptide", format_number(stats.inserted.peptide)),
        ("organism", format_number(stats.inserted.organism)),
        ("pep_org", format_number(stats.inserted.pep_org)),
        ("tax_node", format_number(stats.inserted.tax_node)),
    ];
    if store_sequences {
        inserted.push(("sequence", format_number(stats.inserted.sequence)));
    }
    tree_section("Inserted rows", inserted, true);
    println!();

    if stats.malformed_headers > 0 {
        warning(&format!(
            "{} header line(s) did not match '>seq_id taxon_id taxonomy'; their sequences were attributed to the previous header",
            format_number(stats.malformed_headers)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: Option<&str>, store_sequences: bool, no_progress: bool) -> UpdateArgs {
        UpdateArgs {
            input: PathBuf::from("in.fa"),
            output: output.map(PathBuf::from),
            store_sequences,
            no_progress,
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let (output, options, progress) = args(None, false, false).resolve(&Config::default());
        assert_eq!(output, PathBuf::from("LPI_data.db"));
        assert!(!options.store_sequences);
        assert!(progress);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.database.target_store_path = PathBuf::from("from_config.db");

        let (output, options, progress) = args(Some("cli.db"), true, true).resolve(&config);
        assert_eq!(output, PathBuf::from("cli.db"));
        assert!(options.store_sequences);
        assert!(!progress);
    }

    #[test]
    fn test_config_enables_sequences() {
        let mut config = Config::default();
        config.database.persist_raw_sequence = true;
        config.ingest.progress = false;

        let (_, options, progress) = args(None, false, false).resolve(&config);
        assert!(options.store_sequences);
        assert!(!progress);
    }
}
