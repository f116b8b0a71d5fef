/// Peptide, peptide/organism link and raw sequence upserts
use super::organism::resolve_organism;
use super::InsertCounts;
use crate::bio::fasta::Record;
use crate::bio::seguid::seguid;
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Store one record. Returns `false` without touching the database when any
/// of id, taxon id, taxonomy or sequence is empty.
///
/// Rows are only ever inserted: the peptide is keyed by `(seguid, seq_id)`,
/// the link by `(pep_id, org_id)` and the raw sequence by `seq_id`, with the
/// first stored sequence text for an id kept forever.
pub fn store_record(
    conn: &Connection,
    record: &Record,
    store_sequence: bool,
    counts: &mut InsertCounts,
) -> Result<bool> {
    if !record.is_complete() {
        return Ok(false);
    }

    let fingerprint = seguid(&record.sequence);
    let org_id = resolve_organism(conn, &record.taxonomy, &record.taxon_id, counts)?;
    let pep_id = resolve_peptide(conn, &fingerprint, &record.id, counts)?;
    link_peptide_organism(conn, pep_id, org_id, counts)?;

    if store_sequence {
        store_raw_sequence(conn, &record.id, &record.sequence, counts)?;
    }

    tracing::trace!("stored {} (pep {} org {})", record.id, pep_id, org_id);
    Ok(true)
}

fn resolve_peptide(
    conn: &Connection,
    fingerprint: &str,
    seq_id: &str,
    counts: &mut InsertCounts,
) -> Result<i64> {
    let existing: Option<i64> = conn
        .prepare_cached("SELECT pep_id FROM peptide WHERE seguid = ?1 AND seq_id = ?2")?
        .query_row(params![fingerprint, seq_id], |row| row.get(0))
        .optional()?;

    if let Some(pep_id) = existing {
        return Ok(pep_id);
    }

    conn.prepare_cached("INSERT INTO peptide (seguid, seq_id) VALUES(?1, ?2)")?
        .execute(params![fingerprint, seq_id])?;
    counts.peptide += 1;
    Ok(conn.last_insert_rowid())
}

fn link_peptide_organism(
    conn: &Connection,
    pep_id: i64,
    org_id: i64,
    counts: &mut InsertCounts,
) -> Result<()> {
    let linked = conn
        .prepare_cached("SELECT pep_id FROM pep_org WHERE pep_id = ?1 AND org_id = ?2")?
        .exists(params![pep_id, org_id])?;

    if !linked {
        conn.prepare_cached("INSERT INTO pep_org (pep_id, org_id) VALUES(?1, ?2)")?
            .execute(params![pep_id, org_id])?;
        counts.pep_org += 1;
    }
    Ok(())
}

fn store_raw_sequence(
    conn: &Connection,
    seq_id: &str,
    sequence: &str,
    counts: &mut InsertCounts,
) -> Result<()> {
    let present = conn
        .prepare_cached("SELECT seq_id FROM sequence WHERE seq_id = ?1")?
        .exists(params![seq_id])?;

    if !present {
        conn.prepare_cached("INSERT INTO sequence (seq_id, seq) VALUES(?1, ?2)")?
            .execute(params![seq_id, sequence])?;
        counts.sequence += 1;
    }
    Ok(())
}
