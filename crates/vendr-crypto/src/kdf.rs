//! PBKDF2-HMAC-SHA256 per-context key derivation.
//!
//! key = PBKDF2-HMAC-SHA256(password=master_secret, salt="{first}-{second}", c=10000, dkLen=32)
//!
//! Keys are recomputed on every call and never persisted; only ciphertext is stored.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::{ContextPair, AES_KEY_LENGTH, PBKDF2_ITERATIONS};

/// A 256-bit key scoped to one context pair. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; AES_KEY_LENGTH]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

fn pbkdf2_sha256(password: &[u8], salt: &[u8], rounds: u32) -> [u8; AES_KEY_LENGTH] {
    let mut okm = [0u8; AES_KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut okm);
    okm
}

/// Derive the key for a context string.
///
/// # Arguments
/// * `master_secret` - Process-wide master secret
/// * `context_info` - Context string, used as the PBKDF2 salt
///
/// # Returns
/// 32-byte derived key. Identical inputs always yield identical keys.
pub fn derive_key(master_secret: &[u8], context_info: &str) -> DerivedKey {
    DerivedKey(pbkdf2_sha256(
        master_secret,
        context_info.as_bytes(),
        PBKDF2_ITERATIONS,
    ))
}

/// Derive the key for a context pair via [`ContextPair::info`].
pub fn derive_context_key(master_secret: &[u8], context: &ContextPair) -> DerivedKey {
    derive_key(master_secret, &context.info())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = derive_key(b"secret", "5-9");
        let b = derive_key(b"secret", "5-9");
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.as_bytes().len(), 32);
    }

    #[test]
    fn order_matters() {
        let a = derive_key(b"secret", "5-9");
        let b = derive_key(b"secret", "9-5");
        assert_ne!(a, b);
    }

    #[test]
    fn different_secrets_different_keys() {
        let a = derive_key(b"secret-a", "1-2");
        let b = derive_key(b"secret-b", "1-2");
        assert_ne!(a, b);
    }

    #[test]
    fn context_pair_matches_info_string() {
        let pair = ContextPair::direct(5, 9);
        assert_eq!(derive_context_key(b"secret", &pair), derive_key(b"secret", "5-9"));
    }

    #[test]
    fn rfc7914_test_vector() {
        // RFC 7914 §11, PBKDF2-HMAC-SHA256 P="passwd" S="salt" c=1, first 32 bytes
        let expected =
            hex::decode("55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc")
                .unwrap();
        let result = pbkdf2_sha256(b"passwd", b"salt", 1);
        assert_eq!(result.to_vec(), expected);
    }

    #[test]
    fn debug_is_redacted() {
        let key = derive_key(b"secret", "1-2");
        assert_eq!(format!("{:?}", key), "DerivedKey(..)");
    }
}
