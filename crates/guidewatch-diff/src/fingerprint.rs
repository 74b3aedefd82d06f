use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the UTF-8 bytes of `canonical`.
///
/// Always 64 lowercase hex characters.
#[must_use]
pub fn fingerprint(canonical: &str) -> String {
    format!("{:x}", Sha256::digest(canonical.as_bytes()))
}
