//! Master secret configuration.
//!
//! The master secret is loaded once at process start and shared read-only
//! with every service that encrypts or decrypts content.

use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable holding the master secret.
pub const MASTER_SECRET_ENV: &str = "VENDR_ENCRYPTION_KEY";

/// Substituted when no master secret is configured. Local development only.
pub const DEVELOPMENT_FALLBACK_SECRET: &str = "vendr-dev-encryption-key-do-not-use-in-production";

/// Process-wide master secret. Zeroized on drop; `Debug` never prints it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterSecret {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    fallback: bool,
}

impl MasterSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: secret.into(),
            fallback: false,
        }
    }

    /// Use `secret` if present and non-empty, otherwise the development fallback.
    ///
    /// The fallback is logged at warn level and never fails.
    pub fn resolve(secret: Option<&str>) -> Self {
        match secret {
            Some(s) if !s.is_empty() => Self::new(s.as_bytes()),
            _ => {
                tracing::warn!(
                    env = MASTER_SECRET_ENV,
                    "no master encryption secret configured, using development fallback"
                );
                Self {
                    bytes: DEVELOPMENT_FALLBACK_SECRET.as_bytes().to_vec(),
                    fallback: true,
                }
            }
        }
    }

    /// Read [`MASTER_SECRET_ENV`], falling back as in [`MasterSecret::resolve`].
    pub fn from_env() -> Self {
        let value = std::env::var(MASTER_SECRET_ENV).ok();
        Self::resolve(value.as_deref())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when the weak development fallback is in use.
    pub fn is_development_fallback(&self) -> bool {
        self.fallback
    }
}

impl std::fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterSecret")
            .field("bytes", &"[redacted]")
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Read-only encryption configuration injected into content services.
#[derive(Debug, Clone)]
pub struct CryptoConfig {
    pub master_secret: Arc<MasterSecret>,
}

impl CryptoConfig {
    pub fn new(master_secret: MasterSecret) -> Self {
        Self {
            master_secret: Arc::new(master_secret),
        }
    }

    pub fn from_env() -> Self {
        Self::new(MasterSecret::from_env())
    }
}
