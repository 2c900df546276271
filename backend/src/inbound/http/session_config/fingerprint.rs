//! Short, loggable identifier for the active session key.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Lowercase hex of the first eight bytes of `sha256(key.signing())`.
///
/// Logged at startup so operators can tell which key a replica loaded.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use kitchen::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fingerprint = key_fingerprint(&Key::derive_from(&[1_u8; 64]));
/// assert_eq!(fingerprint.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_key_same_fingerprint() {
        let key = Key::derive_from(&[3_u8; 64]);
        assert_eq!(key_fingerprint(&key), key_fingerprint(&key));
    }

    #[rstest]
    fn fingerprints_are_short_lowercase_hex() {
        let fingerprint = key_fingerprint(&Key::generate());
        assert_eq!(fingerprint.len(), FINGERPRINT_BYTES * 2);
        assert!(
            fingerprint
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[rstest]
    fn distinct_keys_are_distinguishable() {
        let first = Key::derive_from(&[b'a'; 64]);
        let second = Key::derive_from(&[b'b'; 64]);
        assert_ne!(key_fingerprint(&first), key_fingerprint(&second));
    }
}
