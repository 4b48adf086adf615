//! Integrity digest over stored ciphertext.
//!
//! digest = HMAC-SHA256(key=master_secret, ciphertext || tag)
//!
//! Keyed on the master secret rather than the derived key, so a digest check
//! needs no key derivation. Rotating the master secret invalidates every
//! stored digest at once.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CryptoError;
use crate::types::DIGEST_LENGTH;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(
    master_secret: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<HmacSha256, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(master_secret)
        .map_err(|e| CryptoError::EncryptionFailed(format!("HMAC key rejected: {}", e)))?;
    mac.update(ciphertext);
    mac.update(tag);
    Ok(mac)
}

/// Compute the digest stored in an envelope's `hmac` field.
pub fn compute_digest(
    master_secret: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<[u8; DIGEST_LENGTH], CryptoError> {
    let mac = keyed_mac(master_secret, ciphertext, tag)?;
    let mut digest = [0u8; DIGEST_LENGTH];
    digest.copy_from_slice(mac.finalize().into_bytes().as_slice());
    Ok(digest)
}

/// Recompute the digest and compare it to `expected` in constant time.
pub fn verify_digest(
    master_secret: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    expected: &[u8],
) -> Result<(), CryptoError> {
    keyed_mac(master_secret, ciphertext, tag)
        .map_err(|_| CryptoError::IntegrityCheckFailed)?
        .verify_slice(expected)
        .map_err(|_| CryptoError::IntegrityCheckFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4231_test_case_2() {
        // Key "Jefe", data "what do ya want for nothing?" split across ciphertext/tag
        let expected =
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap();
        let digest = compute_digest(b"Jefe", b"what do ya want ", b"for nothing?").unwrap();
        assert_eq!(digest.to_vec(), expected);
    }

    #[test]
    fn verify_accepts_own_digest() {
        let digest = compute_digest(b"k", b"ciphertext", b"tag").unwrap();
        assert!(verify_digest(b"k", b"ciphertext", b"tag", &digest).is_ok());
    }

    #[test]
    fn wrong_secret_fails() {
        let digest = compute_digest(b"k", b"ciphertext", b"tag").unwrap();
        let err = verify_digest(b"wrong-secret", b"ciphertext", b"tag", &digest).unwrap_err();
        assert!(matches!(err, CryptoError::IntegrityCheckFailed));
    }

    #[test]
    fn altered_input_fails() {
        let digest = compute_digest(b"k", b"ciphertext", b"tag").unwrap();
        assert!(verify_digest(b"k", b"ciphertexT", b"tag", &digest).is_err());
        assert!(verify_digest(b"k", b"ciphertext", b"taG", &digest).is_err());
    }

    #[test]
    fn truncated_digest_fails() {
        let digest = compute_digest(b"k", b"ciphertext", b"tag").unwrap();
        assert!(verify_digest(b"k", b"ciphertext", b"tag", &digest[..16]).is_err());
        assert!(verify_digest(b"k", b"ciphertext", b"tag", &[]).is_err());
    }

    #[test]
    fn empty_secret_still_keys_the_mac() {
        let a = compute_digest(b"", b"ciphertext", b"tag").unwrap();
        let b = compute_digest(b"k", b"ciphertext", b"tag").unwrap();
        assert_ne!(a, b);
    }
}
