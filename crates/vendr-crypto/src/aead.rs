//! AES-256-GCM with a 128-bit nonce and a detached tag.
//!
//! Ciphertext and tag are returned separately so the tag can be stored in
//! its own column. No associated data is bound; the context pair is bound
//! through the derived key instead.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};

use crate::error::CryptoError;
use crate::kdf::DerivedKey;
use crate::types::{AUTH_TAG_LENGTH, NONCE_LENGTH};

type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Generate a random 16-byte nonce. Called once per encryption.
pub fn generate_nonce() -> Result<[u8; NONCE_LENGTH], CryptoError> {
    let mut nonce = [0u8; NONCE_LENGTH];
    getrandom::getrandom(&mut nonce).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(nonce)
}

fn cipher(key: &DerivedKey) -> Result<Aes256Gcm16, CryptoError> {
    Aes256Gcm16::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Encrypt `plaintext`, returning `(ciphertext, tag)`.
pub fn seal(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LENGTH],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; AUTH_TAG_LENGTH]), CryptoError> {
    let cipher = cipher(key)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(nonce), b"", &mut buffer)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut tag_bytes = [0u8; AUTH_TAG_LENGTH];
    tag_bytes.copy_from_slice(tag.as_slice());
    Ok((buffer, tag_bytes))
}

/// Verify `tag` and decrypt `ciphertext`.
///
/// Any rejection (wrong key, altered nonce, ciphertext or tag) is
/// [`CryptoError::DecryptionFailed`]; no partial plaintext is returned.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if nonce.len() != NONCE_LENGTH {
        return Err(CryptoError::InvalidNonceLength {
            expected: NONCE_LENGTH,
            got: nonce.len(),
        });
    }
    if tag.len() != AUTH_TAG_LENGTH {
        return Err(CryptoError::InvalidTagLength {
            expected: AUTH_TAG_LENGTH,
            got: tag.len(),
        });
    }

    let cipher = cipher(key).map_err(|_| CryptoError::DecryptionFailed)?;
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(nonce),
            b"",
            &mut buffer,
            Tag::from_slice(tag),
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;
    Ok(buffer)
}
