#![allow(dead_code)]

/// Shared setup for pepdb integration tests
use anyhow::Result;
use flate2::write::GzEncoder;
use pepdb::storage::PeptideDatabase;
use rusqlite::params;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// The two-organism example used throughout the docs.
pub const SCENARIO_FASTA: &str = "\
>seqA 9606 Eukaryota;Chordata;Mammalia;Homo sapiens
MKV
LLL
>seqB 10090 Eukaryota;Chordata;Mammalia;Mus musculus
MKV
";

/// Temporary directory holding input files and the database under test.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn db_path(&self) -> PathBuf {
        self.path("peptides.db")
    }

    pub fn open_db(&self) -> Result<PeptideDatabase> {
        Ok(PeptideDatabase::open(self.db_path())?)
    }

    pub fn create_input_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn create_gzip_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        let mut encoder = GzEncoder::new(File::create(&path)?, flate2::Compression::default());
        encoder.write_all(content.as_bytes())?;
        encoder.finish()?;
        Ok(path)
    }
}

/// FASTA with `n` records spread over a handful of organisms.
pub fn create_peptide_fasta(n: usize) -> String {
    let organisms = [
        ("9606", "Eukaryota;Chordata;Mammalia;Homo sapiens"),
        ("10090", "Eukaryota;Chordata;Mammalia;Mus musculus"),
        ("562", "Bacteria;Proteobacteria;Gammaproteobacteria;Escherichia coli"),
    ];
    let residues = b"ACDEFGHIKLMNPQRSTVWY";

    let mut content = String::new();
    for i in 0..n {
        let (taxon, path) = organisms[i % organisms.len()];
        content.push_str(&format!(">pep_{} {} {}\n", i, taxon, path));
        let seq: String = (0..30 + i % 17)
            .map(|j| residues[(i * 7 + j * 3) % residues.len()] as char)
            .collect();
        content.push_str(&seq[..seq.len() / 2]);
        content.push('\n');
        content.push_str(&seq[seq.len() / 2..]);
        content.push('\n');
    }
    content
}

/// Names of `tax_node` rows along the stored chain of an organism.
pub fn organism_lineage(db: &PeptideDatabase, organism: &str) -> Result<Vec<(i64, String)>> {
    let conn = db.connection();
    let tax_str: String = conn.query_row(
        "SELECT tax_str FROM organism WHERE name = ?1",
        params![organism],
        |row| row.get(0),
    )?;

    let mut lineage = Vec::new();
    for id in tax_str.split(';') {
        let id: i64 = id.parse()?;
        let name: String = conn.query_row(
            "SELECT name FROM tax_node WHERE tax_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        lineage.push((id, name));
    }
    Ok(lineage)
}
