//! Session key fingerprinting for operational visibility.
//!
//! A truncated SHA-256 digest of the signing half of the session key is
//! logged at start-up so operators can tell which key a replica runs with
//! without the key material itself reaching the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Generate a truncated SHA-256 fingerprint of the key's signing material.
///
/// Returns the first 8 bytes of the SHA-256 hash as 16 lowercase hex digits.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use bookstore::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let key = Key::generate();
/// let fp = key_fingerprint(&key);
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let signing_bytes = key.signing();
    let mut hasher = Sha256::new();
    hasher.update(signing_bytes);
    let result = hasher.finalize();
    hex::encode(&result[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_material_gives_same_fingerprint() {
        let key = Key::derive_from(&[b'a'; 64]);
        assert_eq!(key_fingerprint(&key), key_fingerprint(&key.clone()));
    }

    #[rstest]
    fn fingerprint_is_sixteen_lowercase_hex_digits() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[rstest]
    fn distinct_material_gives_distinct_fingerprints() {
        let first = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        let second = key_fingerprint(&Key::derive_from(&[b'b'; 64]));
        assert_ne!(first, second);
    }
}
