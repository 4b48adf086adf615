//! Per-conversation content encryption for Vendr.
//!
//! A unique AES-256-GCM key is derived for every context pair
//! (sender/receiver, sender/group, product/user, order/user) from one master
//! secret. Each ciphertext carries its GCM tag plus an HMAC keyed on the
//! master secret, checked before decryption is attempted.

pub mod aead;
pub mod base64;
pub mod config;
pub mod envelope;
pub mod error;
pub mod integrity;
pub mod kdf;
pub mod types;

pub use config::{CryptoConfig, MasterSecret, DEVELOPMENT_FALLBACK_SECRET, MASTER_SECRET_ENV};
pub use envelope::{decrypt, decrypt_for, encrypt, encrypt_for};
pub use error::{CryptoError, ErrorKind};
pub use integrity::{compute_digest, verify_digest};
pub use kdf::{derive_context_key, derive_key, DerivedKey};
pub use types::{
    ContextPair, Envelope, ALGORITHM, AUTH_TAG_LENGTH, NONCE_LENGTH, PBKDF2_ITERATIONS,
    SUPPORTED_ALGORITHMS,
};
