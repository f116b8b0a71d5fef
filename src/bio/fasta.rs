/// FASTA record model and line-level parsing for peptide database input
///
/// Input headers carry three whitespace-separated fields:
///
/// ```text
/// >seq_id ext_taxon_id Eukaryota;Chordata;Mammalia;Homo sapiens
/// ```
///
/// The taxonomy path is "rest of line" and may itself contain spaces.
use nom::{
    bytes::complete::{tag, take_till1, take_while1},
    combinator::{rest, verify},
    IResult,
};

/// One reassembled input record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub taxon_id: String,
    pub taxonomy: String,
    pub sequence: String,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        taxon_id: impl Into<String>,
        taxonomy: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            taxon_id: taxon_id.into(),
            taxonomy: taxonomy.into(),
            sequence: sequence.into(),
        }
    }

    /// All four fields are present. Only complete records are stored.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty()
            && !self.taxon_id.is_empty()
            && !self.taxonomy.is_empty()
            && !self.sequence.is_empty()
    }

    /// No field has been set yet (the emission before the first header).
    pub fn is_blank(&self) -> bool {
        self.id.is_empty()
            && self.taxon_id.is_empty()
            && self.taxonomy.is_empty()
            && self.sequence.is_empty()
    }
}

/// Last `;`-separated label of a taxonomy path.
pub fn organism_name(taxonomy: &str) -> &str {
    taxonomy
        .rsplit_once(';')
        .map_or(taxonomy, |(_, name)| name)
}

/// Fields of a well-formed header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub id: &'a str,
    pub taxon_id: &'a str,
    pub taxonomy: &'a str,
}

fn header(input: &str) -> IResult<&str, Header<'_>> {
    let (input, _) = tag(">")(input)?;
    let (input, id) = take_till1(char::is_whitespace)(input)?;
    let (input, _) = take_while1(char::is_whitespace)(input)?;
    let (input, taxon_id) = take_till1(char::is_whitespace)(input)?;
    let (input, _) = take_while1(char::is_whitespace)(input)?;
    let (input, taxonomy) = verify(rest, |s: &str| !s.is_empty())(input)?;
    Ok((
        input,
        Header {
            id,
            taxon_id,
            taxonomy,
        },
    ))
}

/// Parse a header line that has already had trailing whitespace removed.
///
/// Returns `None` unless the line is `>` followed by an id, a taxon id and a
/// non-empty taxonomy path, each separated by whitespace.
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    header(line).ok().map(|(_, h)| h)
}

/// Remove every whitespace character from a sequence line.
pub fn strip_whitespace(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A record boundary produced by a `>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// The record accumulated before this header.
    pub record: Record,
    /// Whether the new header matched the three-field pattern.
    pub header_recognized: bool,
}

/// The record currently being assembled from the line stream.
///
/// A header line flushes the current record and resets the sequence. When the
/// header is malformed the previous id, taxon id and taxonomy are kept, so the
/// following sequence block is attributed to the last good header.
#[derive(Debug, Default)]
pub struct RecordAccumulator {
    current: Record,
}

impl RecordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line. Returns the flushed record when the line is a header.
    pub fn push_line(&mut self, line: &str) -> Option<Boundary> {
        let line = line.trim_end();

        if line.starts_with('>') {
            let record = Record {
                id: self.current.id.clone(),
                taxon_id: self.current.taxon_id.clone(),
                taxonomy: self.current.taxonomy.clone(),
                sequence: std::mem::take(&mut self.current.sequence),
            };

            let header_recognized = match parse_header(line) {
                Some(h) => {
                    self.current.id = h.id.to_string();
                    self.current.taxon_id = h.taxon_id.to_string();
                    self.current.taxonomy = h.taxonomy.to_string();
                    true
                }
                None => false,
            };

            Some(Boundary {
                record,
                header_recognized,
            })
        } else {
            self.current.sequence.push_str(&strip_whitespace(line));
            None
        }
    }

    /// The record in progress, without flushing it.
    pub fn current(&self) -> &Record {
        &self.current
    }

    /// Flush whatever has accumulated at end of input.
    pub fn finish(self) -> Record {
        self.current
    }
}
