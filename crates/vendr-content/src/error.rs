use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Message can no longer be edited: edit window of {window_minutes} minutes has passed")]
    EditWindowExpired { window_minutes: i64 },

    #[error("User {editor_id} cannot edit a message sent by {sender_id}")]
    NotAuthor { editor_id: i64, sender_id: i64 },

    #[error("Crypto error: {0}")]
    Crypto(#[from] vendr_crypto::CryptoError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
