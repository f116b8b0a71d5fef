use super::schema::ensure_schema;
use crate::Result;
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};

/// Row counts of the five tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub tax_node: u64,
    pub organism: u64,
    pub peptide: u64,
    pub pep_org: u64,
    pub sequence: u64,
}

/// Handle on a peptide database file with its schema in place.
pub struct PeptideDatabase {
    conn: Connection,
    path: Option<PathBuf>,
}

impl PeptideDatabase {
    /// Open (or create) the database at `path` and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::info!("[connect] {}", path.display());
        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// In-memory database, used by the self-test and unit tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        ensure_schema(&conn)?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Start the single transaction that wraps an ingestion run.
    ///
    /// Dropping the transaction without committing rolls every write back.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    pub fn table_counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<u64> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
            Ok(n as u64)
        };

        Ok(TableCounts {
            tax_node: count("tax_node")?,
            organism: count("organism")?,
            peptide: count("peptide")?,
            pep_org: count("pep_org")?,
            sequence: count("sequence")?,
        })
    }
}
