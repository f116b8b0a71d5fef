/// Record ingestion loop
///
/// Lines are pulled one at a time from the source, reassembled into records by
/// a [`RecordAccumulator`] and stored before the next line is read, so memory
/// stays bounded by one record. A whole run happens inside one transaction
/// that is committed only after the final record is flushed.
use crate::bio::fasta::{Record, RecordAccumulator};
use crate::bio::source::RecordSource;
use crate::storage::{store_record, InsertCounts, PeptideDatabase};
use crate::{PepdbError, Result};
use indicatif::ProgressBar;
use rusqlite::Connection;
use std::io::{self, BufRead};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Also keep the raw sequence text in the `sequence` table.
    pub store_sequences: bool,
}

/// What one ingestion run saw and wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines: u64,
    /// Header lines seen, well-formed or not.
    pub total_records: u64,
    pub stored_records: u64,
    /// Records dropped for a missing id, taxon id, taxonomy or sequence.
    pub skipped_records: u64,
    pub malformed_headers: u64,
    pub inserted: InsertCounts,
}

/// Streams lines into the database through a borrowed connection or transaction.
pub struct Ingestor<'conn> {
    conn: &'conn Connection,
    options: IngestOptions,
    accumulator: RecordAccumulator,
    stats: IngestStats,
}

impl<'conn> Ingestor<'conn> {
    pub fn new(conn: &'conn Connection, options: IngestOptions) -> Self {
        Self {
            conn,
            options,
            accumulator: RecordAccumulator::new(),
            stats: IngestStats::default(),
        }
    }

    /// Process one raw line, storing the previous record when it is a header.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.stats.lines += 1;

        if let Some(boundary) = self.accumulator.push_line(line) {
            self.stats.total_records += 1;
            if !boundary.header_recognized {
                self.stats.malformed_headers += 1;
                tracing::warn!(
                    "Line {}: header does not match '>id taxon_id taxonomy', keeping '{}'",
                    self.stats.lines,
                    self.accumulator.current().id
                );
            }
            self.emit(&boundary.record)?;
        }

        Ok(())
    }

    fn emit(&mut self, record: &Record) -> Result<()> {
        let stored = store_record(
            self.conn,
            record,
            self.options.store_sequences,
            &mut self.stats.inserted,
        )?;

        if stored {
            self.stats.stored_records += 1;
        } else if !record.is_blank() {
            self.stats.skipped_records += 1;
            tracing::debug!("Skipping incomplete record '{}'", record.id);
        }
        Ok(())
    }

    /// Store the last record of the stream and return the run statistics.
    pub fn finish(mut self) -> Result<IngestStats> {
        let record = std::mem::take(&mut self.accumulator).finish();
        self.emit(&record)?;
        Ok(self.stats)
    }

    /// Drain a line iterator; the first read error aborts the run.
    ///
    /// Undecodable input (not UTF-8) is reported as a parse error with its
    /// line number.
    pub fn ingest_lines<I, S>(mut self, lines: I) -> Result<IngestStats>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => {
                    PepdbError::Parse(format!("line {}: {}", self.stats.lines + 1, e))
                }
                _ => PepdbError::Io(e),
            })?;
            self.push_line(line.as_ref())?;
        }
        self.finish()
    }
}

/// Ingest every line of `reader` in a single transaction.
///
/// Any error drops the transaction, leaving the database as it was.
pub fn ingest_reader<R: BufRead>(
    db: &mut PeptideDatabase,
    reader: R,
    options: IngestOptions,
) -> Result<IngestStats> {
    let tx = db.transaction()?;
    let stats = Ingestor::new(&tx, options).ingest_lines(reader.lines())?;
    tx.commit()?;
    Ok(stats)
}

/// Open `path` (plain, gzip or bzip2) and ingest it.
pub fn ingest_file<P: AsRef<Path>>(
    db: &mut PeptideDatabase,
    path: P,
    options: IngestOptions,
    progress: Option<&ProgressBar>,
) -> Result<IngestStats> {
    let source = RecordSource::open(path, progress)?;
    ingest_reader(db, source, options)
}
