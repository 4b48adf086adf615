//! Direct and group message encryption.
//!
//! Direct messages are keyed on (sender_id, receiver_id), group messages on
//! (sender_id, group_id). Messages are encrypted before they reach storage
//! and decrypted on every read with the identifiers stored on the row.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use vendr_crypto::{decrypt, encrypt, ContextPair, CryptoConfig, Envelope};

use crate::error::ContentError;

/// Minutes after creation during which the sender may edit a message.
pub const EDIT_WINDOW_MINUTES: i64 = 15;

/// Shown in place of a message that fails integrity or decryption.
pub const ENCRYPTED_PLACEHOLDER: &str = "[Encrypted Message]";

/// Recipient of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageTarget {
    Direct { receiver_id: i64 },
    Group { group_id: i64 },
}

impl MessageTarget {
    /// Key context for a message sent by `sender_id` to this target.
    pub fn context(&self, sender_id: i64) -> ContextPair {
        match *self {
            MessageTarget::Direct { receiver_id } => ContextPair::direct(sender_id, receiver_id),
            MessageTarget::Group { group_id } => ContextPair::group(sender_id, group_id),
        }
    }
}

/// A message row as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: i64,
    pub sender_id: i64,
    pub target: MessageTarget,
    #[serde(flatten)]
    pub envelope: Envelope,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl StoredMessage {
    pub fn context(&self) -> ContextPair {
        self.target.context(self.sender_id)
    }
}

/// Encrypts, decrypts and edits messages under the configured master secret.
#[derive(Debug, Clone)]
pub struct MessageService {
    config: CryptoConfig,
}

impl MessageService {
    pub fn new(config: CryptoConfig) -> Self {
        Self { config }
    }

    /// Encrypt a new message for storage.
    pub fn compose(
        &self,
        id: i64,
        sender_id: i64,
        target: MessageTarget,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<StoredMessage, ContentError> {
        let envelope = encrypt(
            content,
            target.context(sender_id),
            &self.config.master_secret,
        )?;
        Ok(StoredMessage {
            id,
            sender_id,
            target,
            envelope,
            created_at: now,
            edited_at: None,
        })
    }

    /// Decrypt a stored message.
    pub fn read(&self, message: &StoredMessage) -> Result<String, ContentError> {
        let plaintext = decrypt(
            &message.envelope,
            message.context(),
            &self.config.master_secret,
        )?;
        Ok(plaintext)
    }

    /// Decrypt a stored message, substituting [`ENCRYPTED_PLACEHOLDER`] for
    /// rows that fail integrity or decryption.
    pub fn read_or_placeholder(&self, message: &StoredMessage) -> String {
        match self.read(message) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    message_id = message.id,
                    sender_id = message.sender_id,
                    error = %err,
                    "failed to decrypt message"
                );
                ENCRYPTED_PLACEHOLDER.to_string()
            }
        }
    }

    /// Whether `editor_id` may still edit `message` at `now`.
    pub fn can_edit(&self, message: &StoredMessage, editor_id: i64, now: DateTime<Utc>) -> bool {
        editor_id == message.sender_id && within_edit_window(message.created_at, now)
    }

    /// Replace the content of a message with a freshly encrypted envelope.
    ///
    /// Only the sender may edit, and only within [`EDIT_WINDOW_MINUTES`] of
    /// creation. On any error the message is left unchanged.
    pub fn edit(
        &self,
        message: &mut StoredMessage,
        editor_id: i64,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        if editor_id != message.sender_id {
            return Err(ContentError::NotAuthor {
                editor_id,
                sender_id: message.sender_id,
            });
        }
        if !within_edit_window(message.created_at, now) {
            return Err(ContentError::EditWindowExpired {
                window_minutes: EDIT_WINDOW_MINUTES,
            });
        }

        let envelope = encrypt(content, message.context(), &self.config.master_secret)?;
        message.envelope = envelope;
        message.edited_at = Some(now);
        tracing::debug!(message_id = message.id, "message re-encrypted after edit");
        Ok(())
    }
}

fn within_edit_window(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(created_at) <= Duration::minutes(EDIT_WINDOW_MINUTES)
}
