/// Taxonomy path resolution into `tax_node` rows
use super::schema::ROOT_TAX_ID;
use super::InsertCounts;
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Weight given to every newly created node.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Resolve a `;`-separated taxonomy path into its chain of `tax_node` ids,
/// creating nodes that do not exist yet.
///
/// Nodes are identified by `(name, rank)` where rank is the 1-based position in
/// the path, so two paths sharing a prefix share those nodes. A new node's
/// parent is the id resolved for the previous label (the root for rank 1).
/// Empty labels such as the middle of `"A;;B"` are ordinary nodes named `""`.
pub fn resolve_path(
    conn: &Connection,
    taxonomy: &str,
    counts: &mut InsertCounts,
) -> Result<Vec<i64>> {
    let mut lookup =
        conn.prepare_cached("SELECT tax_id FROM tax_node WHERE name = ?1 AND rank = ?2")?;
    let mut insert = conn.prepare_cached(
        "INSERT INTO tax_node (parent_tax_id, rank, name, weight) VALUES(?1, ?2, ?3, ?4)",
    )?;

    let mut chain = Vec::new();
    let mut parent_id = ROOT_TAX_ID;

    for (index, name) in taxonomy.split(';').enumerate() {
        let rank = index as i64 + 1;

        let existing: Option<i64> = lookup
            .query_row(params![name, rank], |row| row.get(0))
            .optional()?;

        let tax_id = match existing {
            Some(id) => id,
            None => {
                insert.execute(params![parent_id, rank, name, DEFAULT_WEIGHT])?;
                let id = conn.last_insert_rowid();
                counts.tax_node += 1;
                tracing::debug!("tax_node {} '{}' rank {} parent {}", id, name, rank, parent_id);
                id
            }
        };

        chain.push(tax_id);
        parent_id = tax_id;
    }

    Ok(chain)
}

/// Render a node chain the way it is stored in `organism.tax_str`.
pub fn chain_to_string(chain: &[i64]) -> String {
    chain
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(";")
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

    fn node(conn: &Connection, id: i64) -> (i64, i64, String) {
        conn.query_row(
            "SELECT parent_tax_id, rank, name FROM tax_node WHERE tax_id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap()
    }

    #[test]
    fn test_new_path_links_parents() {
        let conn = setup();
        let mut counts = InsertCounts::default();

        let chain = resolve_path(&conn, "A;B;C", &mut counts).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(counts.tax_node, 3);

        assert_eq!(node(&conn, chain[0]), (ROOT_TAX_ID, 1, "A".to_string()));
        assert_eq!(node(&conn, chain[1]), (chain[0], 2, "B".to_string()));
        assert_eq!(node(&conn, chain[2]), (chain[1], 3, "C".to_string()));
    }

    #[test]
    fn test_shared_prefix_reuses_nodes() {
        let conn = setup();
        let mut counts = InsertCounts::default();

        let abc = resolve_path(&conn, "A;B;C", &mut counts).unwrap();
        let abd = resolve_path(&conn, "A;B;D", &mut counts).unwrap();

        assert_eq!(abc[..2].to_vec(), abd[..2].to_vec());
        assert_ne!(abc[2], abd[2]);
        assert_eq!(counts.tax_node, 4);
    }

    #[test]
    fn test_repeated_path_creates_nothing() {
        let conn = setup();
        let mut counts = InsertCounts::default();
        let first = resolve_path(&conn, "A;B", &mut counts).unwrap();

        let mut again = InsertCounts::default();
        let second = resolve_path(&conn, "A;B", &mut again).unwrap();
        assert_eq!(first, second);
        assert_eq!(again.tax_node, 0);
    }

    #[test]
    fn test_same_name_different_rank_is_distinct() {
        let conn = setup();
        let mut counts = InsertCounts::default();
        let chain = resolve_path(&conn, "X;X", &mut counts).unwrap();
        assert_ne!(chain[0], chain[1]);
    }

    #[test]
    fn test_empty_segment_is_a_node() {
        let conn = setup();
        let mut counts = InsertCounts::default();
        let chain = resolve_path(&conn, "A;;B", &mut counts).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(node(&conn, chain[1]), (chain[0], 2, String::new()));

        let again = resolve_path(&conn, "Z;;Q", &mut counts).unwrap();
        assert_eq!(again[1], chain[1]);
    }

    #[test]
    fn test_chain_to_string() {
        assert_eq!(chain_to_string(&[1, 2, 17]), "1;2;17");
        assert_eq!(chain_to_string(&[]), "");
    }
}
