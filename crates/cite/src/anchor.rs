//! Deterministic reference-name generation.
//!
//! The anchor linking an inline reference tag to its full citation must be
//! stable: the same citation text always yields the same name, and distinct
//! citations should rarely collide. The name is drawn from a SHA-256 digest
//! of the citation text — one lowercase letter followed by four
//! lowercase-or-digit characters.

use sha2::{Digest, Sha256};

const ASCII_LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const LOWER_ALPHA_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A stable, content-derived anchor name for a citation string.
///
/// The first character is always a letter — a purely numeric name would not
/// be a valid reference anchor.
pub fn ref_name(citation: &str) -> String {
    let digest = Sha256::digest(citation.as_bytes());
    let mut name = String::with_capacity(5);
    name.push(ASCII_LOWER[digest[0] as usize % ASCII_LOWER.len()] as char);
    for byte in &digest[1..5] {
        name.push(LOWER_ALPHA_DIGITS[*byte as usize % LOWER_ALPHA_DIGITS.len()] as char);
    }
    name
}
