//! Encrypt/decrypt pipeline for stored content.
//!
//! Encrypt: derive key(context) → fresh nonce → AES-256-GCM → HMAC(master, ct || tag) → Envelope
//! Decrypt: split fields → verify HMAC → derive key(context) → AES-256-GCM open → UTF-8

use zeroize::Zeroize;

use crate::aead;
use crate::base64::{base64_decode, base64_encode};
use crate::config::MasterSecret;
use crate::error::CryptoError;
use crate::integrity::{compute_digest, verify_digest};
use crate::kdf::derive_context_key;
use crate::types::{ContextPair, Envelope, ALGORITHM, LEGACY_DELIMITER, SUPPORTED_ALGORITHMS};

/// Encrypt `plaintext` for `context`.
///
/// Every call draws a fresh nonce, so encrypting the same plaintext twice
/// yields unrelated envelopes. Always writes the current format with
/// `authTag` in its own field.
pub fn encrypt(
    plaintext: &str,
    context: ContextPair,
    secret: &MasterSecret,
) -> Result<Envelope, CryptoError> {
    let key = derive_context_key(secret.as_bytes(), &context);
    let nonce = aead::generate_nonce()?;
    let (ciphertext, tag) = aead::seal(&key, &nonce, plaintext.as_bytes())?;
    let digest = compute_digest(secret.as_bytes(), &ciphertext, &tag)?;

    Ok(Envelope {
        encrypted_content: base64_encode(&ciphertext),
        iv: base64_encode(&nonce),
        algorithm: ALGORITHM.to_string(),
        hmac: base64_encode(&digest),
        auth_tag: Some(base64_encode(&tag)),
    })
}

/// Split an envelope into its encoded `(ciphertext, tag)` parts.
///
/// Legacy rows store `"{ciphertext}.{tag}"` in `encryptedContent`; anything
/// other than exactly two parts is rejected.
fn split_content(envelope: &Envelope) -> Result<(&str, &str), CryptoError> {
    if let Some(tag) = envelope.auth_tag.as_deref() {
        return Ok((envelope.encrypted_content.as_str(), tag));
    }

    tracing::debug!("decrypting legacy envelope without separate auth tag");
    let mut parts = envelope.encrypted_content.split(LEGACY_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(ciphertext), Some(tag), None) => Ok((ciphertext, tag)),
        _ => Err(CryptoError::InvalidMessageFormat),
    }
}

/// Decrypt an envelope produced for `context`.
///
/// The integrity digest is checked before any AEAD work; a mismatch is
/// [`CryptoError::IntegrityCheckFailed`]. A wrong context (including a
/// swapped pair) passes the digest but fails AEAD verification with
/// [`CryptoError::DecryptionFailed`].
pub fn decrypt(
    envelope: &Envelope,
    context: ContextPair,
    secret: &MasterSecret,
) -> Result<String, CryptoError> {
    if !SUPPORTED_ALGORITHMS.contains(&envelope.algorithm.as_str()) {
        return Err(CryptoError::UnsupportedAlgorithm(envelope.algorithm.clone()));
    }

    let (encoded_ciphertext, encoded_tag) = split_content(envelope)?;
    let ciphertext = base64_decode(encoded_ciphertext)?;
    let tag = base64_decode(encoded_tag)?;
    let digest = base64_decode(&envelope.hmac).map_err(|_| CryptoError::IntegrityCheckFailed)?;

    verify_digest(secret.as_bytes(), &ciphertext, &tag, &digest)?;

    let nonce = base64_decode(&envelope.iv)?;
    let key = derive_context_key(secret.as_bytes(), &context);
    let plaintext = aead::open(&key, &nonce, &ciphertext, &tag)?;

    String::from_utf8(plaintext).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        CryptoError::InvalidUtf8
    })
}

/// Encrypt with raw identifiers and an optional master secret.
///
/// A missing or empty secret resolves to the development fallback.
pub fn encrypt_for(
    plaintext: &str,
    id_a: i64,
    id_b: i64,
    master_secret: Option<&str>,
) -> Result<Envelope, CryptoError> {
    let secret = MasterSecret::resolve(master_secret);
    encrypt(plaintext, ContextPair::new(id_a, id_b), &secret)
}

/// Decrypt with raw identifiers and an optional master secret.
pub fn decrypt_for(
    envelope: &Envelope,
    id_a: i64,
    id_b: i64,
    master_secret: Option<&str>,
) -> Result<String, CryptoError> {
    let secret = MasterSecret::resolve(master_secret);
    decrypt(envelope, ContextPair::new(id_a, id_b), &secret)
}
