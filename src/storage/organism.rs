use super::taxonomy::{chain_to_string, resolve_path};
use super::InsertCounts;
use crate::bio::fasta::organism_name;
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Look up or create the organism identified by the last taxonomy label and
/// the external taxon id.
///
/// The taxonomy chain is only resolved for a new organism; its deepest node
/// becomes `tax_node_id` and the full chain is stored as `tax_str`.
pub fn resolve_organism(
    conn: &Connection,
    taxonomy: &str,
    ext_id: &str,
    counts: &mut InsertCounts,
) -> Result<i64> {
    let name = organism_name(taxonomy);

    let existing: Option<i64> = conn
        .prepare_cached("SELECT org_id FROM organism WHERE name = ?1 AND ext_id = ?2")?
        .query_row(params![name, ext_id], |row| row.get(0))
        .optional()?;

    if let Some(org_id) = existing {
        return Ok(org_id);
    }

    let chain = resolve_path(conn, taxonomy, counts)?;
    // split() always yields at least one label
    let tax_node_id = chain.last().copied().unwrap_or_default();

    conn.prepare_cached(
        "INSERT INTO organism (name, ext_id, tax_node_id, tax_str) VALUES(?1, ?2, ?3, ?4)",
    )?
    .execute(params![name, ext_id, tax_node_id, chain_to_string(&chain)])?;

    let org_id = conn.last_insert_rowid();
    counts.organism += 1;
    tracing::debug!("organism {} '{}' ext_id {}", org_id, name, ext_id);

    Ok(org_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::ensure_schema;
    use pretty_assertions::assert_eq;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_creates_organism_on_deepest_node() {
        let conn = setup();
        let mut counts = InsertCounts::default();

        let org_id =
            resolve_organism(&conn, "Eukaryota;Chordata;Homo sapiens", "9606", &mut counts)
                .unwrap();

        let (name, ext_id, tax_node_id, tax_str): (String, String, i64, String) = conn
            .query_row(
                "SELECT name, ext_id, tax_node_id, tax_str FROM organism WHERE org_id = ?1",
                params![org_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();

        assert_eq!(name, "Homo sapiens");
        assert_eq!(ext_id, "9606");
        assert_eq!(tax_str.split(';').count(), 3);
        assert_eq!(tax_str.rsplit(';').next().unwrap(), tax_node_id.to_string());
        assert_eq!(counts.organism, 1);
        assert_eq!(counts.tax_node, 3);
    }

    #[test]
    fn test_resolves_existing_organism() {
        let conn = setup();
        let mut counts = InsertCounts::default();
        let first = resolve_organism(&conn, "A;B;Mus musculus", "10090", &mut counts).unwrap();
        let second = resolve_organism(&conn, "A;B;Mus musculus", "10090", &mut counts).unwrap();
        assert_eq!(first, second);
        assert_eq!(counts.organism, 1);
    }

    #[test]
    fn test_same_name_other_taxon_id_is_new_organism() {
        let conn = setup();
        let mut counts = InsertCounts::default();
        let a = resolve_organism(&conn, "A;B;strain", "1", &mut counts).unwrap();
        let b = resolve_organism(&conn, "A;B;strain", "2", &mut counts).unwrap();
        assert_ne!(a, b);
        assert_eq!(counts.organism, 2);
        // same path, so no extra nodes
        assert_eq!(counts.tax_node, 3);
    }

    #[test]
    fn test_single_label_path() {
        let conn = setup();
        let mut counts = InsertCounts::default();
        resolve_organism(&conn, "Bacteria", "2", &mut counts).unwrap();
        let name: String = conn
            .query_row("SELECT name FROM organism", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "Bacteria");
    }
}
