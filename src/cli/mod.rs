pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pepdb",
    version,
    about = "Create/update a peptide SQLite database from FASTA",
    long_about = "pepdb reads FASTA files whose headers carry '>seq_id taxon_id taxonomy;path' \
                  and builds a normalized SQLite database of taxonomy nodes, organisms, \
                  peptides and peptide/organism links. Re-running over the same input adds \
                  nothing. gzip and bzip2 input is detected automatically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true, env = "PEPDB_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add the records of a FASTA file to a database
    Update(commands::update::UpdateArgs),

    /// Create an empty database with the full schema
    Init(commands::init::InitArgs),

    /// Check the fingerprint algorithm and database engine
    Selftest,
}
