/// SEGUID sequence fingerprints
///
/// A SEGUID is the SHA-1 digest of the upper-cased sequence, encoded as
/// standard base64 without `=` padding or line breaks. Two sequences that
/// differ only in letter case share a SEGUID, which is what makes it usable
/// as a deduplication key in the `peptide` table.
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use sha1::{Digest, Sha1};

/// Compute the SEGUID of a sequence.
///
/// Total over every input; the empty string has a well-defined fingerprint.
pub fn seguid(sequence: &str) -> String {
    let digest = Sha1::digest(sequence.to_uppercase().as_bytes());
    STANDARD_NO_PAD.encode(digest)
}
