//! Credential hashing for stored accounts.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// An opaque, encoded credential hash.
///
/// Never serialized outward; `Debug` output is redacted so a logged account
/// cannot leak it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-encoded hash string (e.g. loaded from storage).
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_encoded(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Credential hashing service.
///
/// The rest of the system treats hashes as opaque values; swapping the digest
/// for a KDF is a drop-in replacement behind this trait.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> PasswordHash;
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool;
}

impl<H> CredentialHasher for Arc<H>
where
    H: CredentialHasher + ?Sized,
{
    fn hash(&self, plaintext: &str) -> PasswordHash {
        (**self).hash(plaintext)
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool {
        (**self).verify(plaintext, hash)
    }
}

/// Salted SHA-256 hasher encoding to `v1$<salt-hex>$<digest-hex>`.
///
/// The salt only needs uniqueness, not secrecy; a fresh UUID provides it.
#[derive(Debug, Default)]
pub struct Sha256CredentialHasher;

impl Sha256CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    fn digest(salt: &[u8], plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl CredentialHasher for Sha256CredentialHasher {
    fn hash(&self, plaintext: &str) -> PasswordHash {
        let salt = Uuid::now_v7().into_bytes();
        let encoded = format!(
            "v1${}${}",
            hex::encode(salt),
            Self::digest(&salt, plaintext)
        );
        PasswordHash(encoded)
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool {
        let mut parts = hash.0.split('$');
        let (Some("v1"), Some(salt_hex), Some(digest_hex), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };

        let computed = Self::digest(&salt, plaintext);
        constant_time_eq(computed.as_bytes(), digest_hex.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (&x, &y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
