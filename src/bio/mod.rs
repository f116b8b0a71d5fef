pub mod fasta;
pub mod seguid;
pub mod source;

pub use fasta::{Record, RecordAccumulator};
pub use seguid::seguid;
pub use source::{open_record_source, Compression, RecordSource};
