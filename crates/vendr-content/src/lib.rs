//! Encrypted content services: direct/group messages and marketplace
//! sensitive fields, built on `vendr-crypto`.

pub mod error;
pub mod marketplace;
pub mod messages;

pub use error::ContentError;
pub use marketplace::{
    ContactInfo, MarketplaceVault, PaymentDetails, PaymentSnapshot, ProductSecrets,
};
pub use messages::{
    MessageService, MessageTarget, StoredMessage, EDIT_WINDOW_MINUTES, ENCRYPTED_PLACEHOLDER,
};
