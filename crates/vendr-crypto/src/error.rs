use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Message integrity check failed")]
    IntegrityCheckFailed,

    #[error("Invalid message format")]
    InvalidMessageFormat,

    #[error("Failed to decrypt message")]
    DecryptionFailed,

    #[error("Unsupported encryption algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid nonce length: expected {expected} bytes, got {got}")]
    InvalidNonceLength { expected: usize, got: usize },

    #[error("Invalid auth tag length: expected {expected} bytes, got {got}")]
    InvalidTagLength { expected: usize, got: usize },

    #[error("Decrypted content is not valid UTF-8")]
    InvalidUtf8,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}

/// Coarse classification of a [`CryptoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The keyed digest did not match; the stored row was altered or was
    /// written under a different master secret.
    Integrity,
    /// The envelope could not be parsed or the AEAD rejected it.
    Decrypt,
    /// Encryption could not produce an envelope.
    Encrypt,
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::IntegrityCheckFailed => ErrorKind::Integrity,
            CryptoError::InvalidMessageFormat
            | CryptoError::DecryptionFailed
            | CryptoError::UnsupportedAlgorithm(_)
            | CryptoError::InvalidNonceLength { .. }
            | CryptoError::InvalidTagLength { .. }
            | CryptoError::InvalidUtf8 => ErrorKind::Decrypt,
            CryptoError::EncryptionFailed(_) | CryptoError::RngFailed(_) => ErrorKind::Encrypt,
        }
    }

    /// True for failures on the read path (integrity or decrypt).
    pub fn is_read_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::Integrity | ErrorKind::Decrypt)
    }
}
