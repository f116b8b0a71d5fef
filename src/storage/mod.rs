/// SQLite persistence for the peptide/organism/taxonomy database
///
/// Every resolver here follows the same lookup-then-insert shape against a
/// plain `rusqlite::Connection` (a `Transaction` derefs to one). Nothing is
/// cached between calls, so each lookup sees exactly what earlier inserts in
/// the same transaction wrote. The pattern is only safe for a single writer;
/// concurrent ingestion would need unique constraints with conflict-as-lookup
/// inserts instead.
pub mod database;
pub mod organism;
pub mod peptide;
pub mod schema;
pub mod taxonomy;

pub use database::{PeptideDatabase, TableCounts};
pub use organism::resolve_organism;
pub use peptide::store_record;
pub use schema::ensure_schema;
pub use taxonomy::resolve_path;

/// Rows inserted per table during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertCounts {
    pub peptide: u64,
    pub organism: u64,
    pub pep_org: u64,
    pub tax_node: u64,
    pub sequence: u64,
}

impl InsertCounts {
    pub fn total(&self) -> u64 {
        self.peptide + self.organism + self.pep_org + self.tax_node + self.sequence
    }
}
