use serde::{Deserialize, Serialize};

/// Algorithm tag written into every envelope.
///
/// AES-256-GCM with a 128-bit IV and a detached 128-bit tag.
pub const ALGORITHM: &str = "aes-256-gcm";

/// Algorithm tags accepted on decryption.
pub const SUPPORTED_ALGORITHMS: &[&str] = &[ALGORITHM];

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// AES-GCM nonce length in bytes (128 bits).
pub const NONCE_LENGTH: usize = 16;

/// AES-GCM tag length in bytes (128 bits).
pub const AUTH_TAG_LENGTH: usize = 16;

/// HMAC-SHA256 digest length in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count for per-context keys.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Separator between ciphertext and tag in legacy `encryptedContent` values.
pub const LEGACY_DELIMITER: char = '.';

/// The ordered pair of identifiers that scopes a derived key.
///
/// Order matters: `(a, b)` and `(b, a)` derive different keys. Callers must
/// build the pair the same way at encryption and decryption time; the
/// constructors below name the order used by each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextPair {
    pub first: i64,
    pub second: i64,
}

impl ContextPair {
    pub fn new(first: i64, second: i64) -> Self {
        Self { first, second }
    }

    /// Direct message: `(sender_id, receiver_id)`.
    pub fn direct(sender_id: i64, receiver_id: i64) -> Self {
        Self::new(sender_id, receiver_id)
    }

    /// Group message: `(sender_id, group_id)`.
    pub fn group(sender_id: i64, group_id: i64) -> Self {
        Self::new(sender_id, group_id)
    }

    /// Per-product sensitive fields: `(product_id, user_id)`.
    pub fn product(product_id: i64, user_id: i64) -> Self {
        Self::new(product_id, user_id)
    }

    /// Per-order payment snapshot: `(order_id, user_id)`.
    pub fn order(order_id: i64, user_id: i64) -> Self {
        Self::new(order_id, user_id)
    }

    /// KDF context string: `"{first}-{second}"`.
    pub fn info(&self) -> String {
        format!("{}-{}", self.first, self.second)
    }
}

/// Stored form of one encrypted value.
///
/// Each field maps 1:1 to a column on the owning row. All binary fields are
/// standard padded base64. Rows written before the tag had its own column
/// carry `authTag = None` and `encryptedContent = "{ciphertext}.{tag}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub encrypted_content: String,
    pub iv: String,
    pub algorithm: String,
    pub hmac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_tag: Option<String>,
}

impl Envelope {
    /// True for the dotted format without a separate `authTag`.
    pub fn is_legacy(&self) -> bool {
        self.auth_tag.is_none()
    }
}
