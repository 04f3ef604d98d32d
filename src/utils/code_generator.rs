//! Deterministic short code derivation.
//!
//! A short code is the first six lowercase hex characters of the MD5 digest of
//! the original URL's UTF-8 bytes. The same input always yields the same code,
//! in every process, with no seed and no collision counter.

use md5::{Digest, Md5};

/// Number of hex characters kept from the digest.
pub const SHORT_CODE_LEN: usize = 6;

/// Computes the short code for an original URL.
///
/// # Examples
///
/// ```
/// use hexlink::utils::code_generator::short_code;
///
/// assert_eq!(short_code("https://www.example.com"), "e149be");
/// ```
pub fn short_code(original: &str) -> String {
    let digest = Md5::digest(original.as_bytes());
    let mut code = hex::encode(digest);
    code.truncate(SHORT_CODE_LEN);
    code
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_short_code(code: &str) -> bool {
    code.len() == SHORT_CODE_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
