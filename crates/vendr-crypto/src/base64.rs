use base64ct::{Base64, Encoding};

use crate::error::CryptoError;

/// Standard padded base64, the encoding of every binary envelope field.
pub fn base64_encode(data: &[u8]) -> String {
    Base64::encode_string(data)
}

/// Decode a stored envelope field.
///
/// Malformed input is reported as [`CryptoError::InvalidMessageFormat`].
pub fn base64_decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    Base64::decode_vec(s).map_err(|_| CryptoError::InvalidMessageFormat)
}
