/// Check-then-create schema setup
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub const ROOT_TAX_ID: i64 = 0;

const TABLES: &[(&str, &str)] = &[
    (
        "peptide",
        "CREATE TABLE peptide(pep_id INTEGER PRIMARY KEY, seguid text, seq_id text)",
    ),
    (
        "tax_node",
        "CREATE TABLE tax_node(tax_id INTEGER PRIMARY KEY, parent_tax_id int, rank int, name text, weight real)",
    ),
    (
        "organism",
        "CREATE TABLE organism(org_id INTEGER PRIMARY KEY, name text, ext_id text, tax_node_id int, tax_str text)",
    ),
    (
        "pep_org",
        "CREATE TABLE pep_org(pep_id INTEGER NOT NULL, org_id INTEGER NOT NULL, PRIMARY KEY (pep_id, org_id))",
    ),
    ("sequence", "CREATE TABLE sequence(seq_id text, seq text)"),
];

const INDEXES: &[(&str, &str)] = &[
    ("seq_id_index", "CREATE INDEX seq_id_index on peptide(seq_id)"),
    ("seguid_index", "CREATE INDEX seguid_index on peptide(seguid)"),
];

fn object_exists(conn: &Connection, kind: &str, name: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = ?1 AND name = ?2",
            params![kind, name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Create `create_sql` unless an object of `kind` named `name` already exists.
/// Returns whether it was created.
fn check_create(conn: &Connection, kind: &str, name: &str, create_sql: &str) -> Result<bool> {
    if object_exists(conn, kind, name)? {
        return Ok(false);
    }
    conn.execute(create_sql, [])?;
    tracing::debug!("Created {} {}", kind, name);
    Ok(true)
}

/// Ensure the five tables and two peptide indexes exist.
///
/// The root taxonomy node `(0, NULL, 0, 'root', 1)` is seeded when `tax_node`
/// is first created. Returns the number of tables plus seeded rows created by
/// this call; indexes are created on demand but not counted.
pub fn ensure_schema(conn: &Connection) -> Result<usize> {
    let mut created = 0;

    for (name, sql) in TABLES {
        if check_create(conn, "table", name, sql)? {
            created += 1;
            if *name == "tax_node" {
                conn.execute(
                    "INSERT INTO tax_node VALUES(?1, NULL, 0, 'root', 1)",
                    params![ROOT_TAX_ID],
                )?;
                created += 1;
            }
        }
    }

    for (name, sql) in INDEXES {
        check_create(conn, "index", name, sql)?;
    }

    if created > 0 {
        tracing::info!("[create ] DB tables {}", created);
    }

    Ok(created)
}
