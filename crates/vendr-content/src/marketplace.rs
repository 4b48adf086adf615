//! Marketplace sensitive fields.
//!
//! Seller contact and payment info is keyed on (product_id, owner_id); the
//! payment snapshot frozen onto an order is keyed on (order_id, user_id).
//! Values are serialized to JSON and encrypted as a single plaintext.
//!
//! No authorization happens here: a caller passing a different user id
//! derives a different key and the open fails.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vendr_crypto::{decrypt, encrypt, ContextPair, CryptoConfig, Envelope};

use crate::error::ContentError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// e.g. "bank_transfer", "mobile_money", "wallet".
    pub method: String,
    pub account: String,
    pub holder_name: String,
}

/// Encrypted per-product fields as persisted on the product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSecrets {
    pub product_id: i64,
    pub owner_id: i64,
    pub contact: Envelope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Envelope>,
}

/// Payment details captured when an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSnapshot {
    pub order_id: i64,
    pub user_id: i64,
    pub envelope: Envelope,
}

/// Seals and opens marketplace sensitive fields.
#[derive(Debug, Clone)]
pub struct MarketplaceVault {
    config: CryptoConfig,
}

impl MarketplaceVault {
    pub fn new(config: CryptoConfig) -> Self {
        Self { config }
    }

    fn seal<T: Serialize>(
        &self,
        value: &T,
        context: ContextPair,
    ) -> Result<Envelope, ContentError> {
        let json = serde_json::to_string(value)?;
        Ok(encrypt(&json, context, &self.config.master_secret)?)
    }

    fn open<T: DeserializeOwned>(
        &self,
        envelope: &Envelope,
        context: ContextPair,
    ) -> Result<T, ContentError> {
        let json = decrypt(envelope, context, &self.config.master_secret)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Encrypt a product's contact and optional payment details for its owner.
    pub fn seal_product(
        &self,
        product_id: i64,
        owner_id: i64,
        contact: &ContactInfo,
        payment: Option<&PaymentDetails>,
    ) -> Result<ProductSecrets, ContentError> {
        let context = ContextPair::product(product_id, owner_id);
        let contact = self.seal(contact, context)?;
        let payment = payment.map(|p| self.seal(p, context)).transpose()?;
        Ok(ProductSecrets {
            product_id,
            owner_id,
            contact,
            payment,
        })
    }

    /// Decrypt contact info using `(product_id, user_id)`.
    pub fn open_contact(
        &self,
        secrets: &ProductSecrets,
        user_id: i64,
    ) -> Result<ContactInfo, ContentError> {
        self.open(
            &secrets.contact,
            ContextPair::product(secrets.product_id, user_id),
        )
    }

    /// Decrypt payment details using `(product_id, user_id)`.
    ///
    /// Returns `Ok(None)` if the product has none.
    pub fn open_payment(
        &self,
        secrets: &ProductSecrets,
        user_id: i64,
    ) -> Result<Option<PaymentDetails>, ContentError> {
        let context = ContextPair::product(secrets.product_id, user_id);
        secrets
            .payment
            .as_ref()
            .map(|envelope| self.open(envelope, context))
            .transpose()
    }

    /// Overwrite the contact envelope with a fresh encryption of `contact`.
    pub fn update_contact(
        &self,
        secrets: &mut ProductSecrets,
        contact: &ContactInfo,
    ) -> Result<(), ContentError> {
        let context = ContextPair::product(secrets.product_id, secrets.owner_id);
        secrets.contact = self.seal(contact, context)?;
        Ok(())
    }

    /// Freeze payment details onto an order for `user_id`.
    pub fn snapshot_payment(
        &self,
        order_id: i64,
        user_id: i64,
        details: &PaymentDetails,
    ) -> Result<PaymentSnapshot, ContentError> {
        let envelope = self.seal(details, ContextPair::order(order_id, user_id))?;
        Ok(PaymentSnapshot {
            order_id,
            user_id,
            envelope,
        })
    }

    pub fn open_snapshot(
        &self,
        snapshot: &PaymentSnapshot,
    ) -> Result<PaymentDetails, ContentError> {
        self.open(
            &snapshot.envelope,
            ContextPair::order(snapshot.order_id, snapshot.user_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendr_crypto::{CryptoError, MasterSecret};

    fn vault() -> MarketplaceVault {
        MarketplaceVault::new(CryptoConfig::new(MasterSecret::new("market-secret")))
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            email: Some("seller@example.com".into()),
            phone: Some("+15550100".into()),
        }
    }

    fn payment() -> PaymentDetails {
        PaymentDetails {
            method: "bank_transfer".into(),
            account: "DE89370400440532013000".into(),
            holder_name: "Ada Seller".into(),
        }
    }

    #[test]
    fn owner_opens_product_fields() {
        let vault = vault();
        let secrets = vault
            .seal_product(100, 7, &contact(), Some(&payment()))
            .unwrap();
        assert_eq!(vault.open_contact(&secrets, 7).unwrap(), contact());
        assert_eq!(vault.open_payment(&secrets, 7).unwrap(), Some(payment()));
    }

    #[test]
    fn other_user_cannot_open_contact() {
        let vault = vault();
        let secrets = vault.seal_product(100, 7, &contact(), None).unwrap();
        let err = vault.open_contact(&secrets, 8).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Crypto(CryptoError::DecryptionFailed)
        ));
    }

    #[test]
    fn product_without_payment() {
        let vault = vault();
        let secrets = vault.seal_product(100, 7, &contact(), None).unwrap();
        assert!(secrets.payment.is_none());
        assert_eq!(vault.open_payment(&secrets, 7).unwrap(), None);
    }

    #[test]
    fn contact_fields_are_not_in_plaintext() {
        let vault = vault();
        let secrets = vault.seal_product(100, 7, &contact(), None).unwrap();
        let row = serde_json::to_string(&secrets).unwrap();
        assert!(!row.contains("seller@example.com"));
        assert!(!row.contains("+15550100"));
    }

    #[test]
    fn update_contact_replaces_envelope() {
        let vault = vault();
        let mut secrets = vault.seal_product(100, 7, &contact(), None).unwrap();
        let before = secrets.contact.clone();
        let updated = ContactInfo {
            email: None,
            phone: Some("+15550199".into()),
        };

        vault.update_contact(&mut secrets, &updated).unwrap();

        assert_ne!(secrets.contact, before);
        assert_eq!(vault.open_contact(&secrets, 7).unwrap(), updated);
    }

    #[test]
    fn payment_snapshot_round_trip() {
        let vault = vault();
        let snapshot = vault.snapshot_payment(555, 9, &payment()).unwrap();
        assert_eq!(vault.open_snapshot(&snapshot).unwrap(), payment());
    }

    #[test]
    fn snapshot_bound_to_order() {
        let vault = vault();
        let mut snapshot = vault.snapshot_payment(555, 9, &payment()).unwrap();
        snapshot.order_id = 556;
        assert!(vault.open_snapshot(&snapshot).is_err());
    }
}
