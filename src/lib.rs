pub mod bio;
pub mod cli;
pub mod core;
pub mod storage;
pub mod utils;

pub use crate::core::ingest::{IngestStats, Ingestor};
pub use crate::storage::database::PeptideDatabase;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PepdbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Self-test failed: {0}")]
    SelfTest(String),
}

pub type Result<T> = std::result::Result<T, PepdbError>;
