use clap::Parser;
use colored::*;
use pepdb::cli::{Cli, Commands};
use pepdb::core::config::{load_config, Config};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // PEPDB_LOG sets the default level; RUST_LOG still takes precedence
    let default_level = match cli.verbose {
        0 => std::env::var("PEPDB_LOG").unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<pepdb::PepdbError>() {
            Some(pepdb::PepdbError::Config(_)) | Some(pepdb::PepdbError::SelfTest(_)) => 2,
            Some(pepdb::PepdbError::Io(_)) => 3,
            Some(pepdb::PepdbError::Parse(_)) => 4,
            Some(pepdb::PepdbError::Database(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Update(args) => pepdb::cli::commands::update::run(args, &config),
        Commands::Init(args) => pepdb::cli::commands::init::run(args, &config),
        Commands::Selftest => pepdb::cli::commands::selftest::run(),
    }
}
