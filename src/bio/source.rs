/// Line source over a possibly compressed FASTA file
///
/// Compression is detected from the leading magic bytes, falling back to the
/// file extension. The decoded stream is exposed through `BufRead` so the
/// ingestion loop can pull one line at a time.
use crate::Result;
use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
}

impl Compression {
    /// Detect compression from magic bytes, then from the file extension.
    pub fn detect(path: &Path, magic: &[u8]) -> Self {
        if magic.starts_with(GZIP_MAGIC) {
            return Self::Gzip;
        }
        if magic.starts_with(BZIP2_MAGIC) {
            return Self::Bzip2;
        }

        match path.extension().and_then(|s| s.to_str()) {
            Some("gz") | Some("gzip") => Self::Gzip,
            Some("bz2") | Some("bzip2") => Self::Bzip2,
            _ => Self::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "plain",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
        }
    }
}

/// Decoded line stream for one input file.
pub struct RecordSource {
    reader: Box<dyn BufRead>,
    path: PathBuf,
    compression: Compression,
    total_bytes: u64,
}

impl RecordSource {
    /// Open `path`, optionally reporting compressed bytes consumed on `progress`.
    pub fn open<P: AsRef<Path>>(path: P, progress: Option<&ProgressBar>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let total_bytes = file.metadata()?.len();

        let raw: Box<dyn Read> = match progress {
            Some(pb) => {
                pb.set_length(total_bytes);
                Box::new(pb.wrap_read(file))
            }
            None => Box::new(file),
        };

        let mut buffered = BufReader::new(raw);
        let magic: Vec<u8> = buffered.fill_buf()?.iter().take(3).copied().collect();
        let compression = Compression::detect(path, &magic);

        let reader: Box<dyn BufRead> = match compression {
            Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(buffered))),
            Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(buffered))),
            Compression::None => Box::new(buffered),
        };

        tracing::debug!(
            "Opened {} ({}, {} bytes)",
            path.display(),
            compression.name(),
            total_bytes
        );

        Ok(Self {
            reader,
            path: path.to_path_buf(),
            compression,
            total_bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Size of the file on disk, before decompression.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

impl Read for RecordSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for RecordSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

/// Open a FASTA file for line-by-line reading without progress reporting.
pub fn open_record_source<P: AsRef<Path>>(path: P) -> Result<RecordSource> {
    RecordSource::open(path, None)
}
