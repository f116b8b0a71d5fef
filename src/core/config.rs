use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file written when no output is given (the historical default name).
pub const DEFAULT_DATABASE: &str = "LPI_data.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file to create or update
    pub target_store_path: PathBuf,
    /// Keep raw sequence text in the `sequence` table
    pub persist_raw_sequence: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Show a progress bar on stderr while reading input
    pub progress: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            target_store_path: PathBuf::from(DEFAULT_DATABASE),
            persist_raw_sequence: false,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { progress: true }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::PepdbError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::PepdbError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::PepdbError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::PepdbError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
