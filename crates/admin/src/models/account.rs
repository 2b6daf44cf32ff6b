//! Seller accounts for the mock login.
//!
//! A [`CredentialRecord`] is what the registry stores. Its serialized shape is
//! fixed: `{ ownerName, businessName, emailPrefix, password }`. The secret is
//! plaintext by construction; this registry is a demo fixture, not a security
//! control.

use serde::{Deserialize, Serialize};

use bharatcart_core::Handle;

/// One persisted account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub owner_name: String,
    pub business_name: String,
    /// Handle derived from `business_name` at registration.
    #[serde(rename = "emailPrefix")]
    pub handle: Handle,
    pub password: String,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("owner_name", &self.owner_name)
            .field("business_name", &self.business_name)
            .field("handle", &self.handle)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialRecord {
    /// Public part of the record.
    #[must_use]
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            owner_name: self.owner_name.clone(),
            business_name: self.business_name.clone(),
            handle: self.handle.clone(),
        }
    }
}

/// The signed-in seller's identity, without the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub owner_name: String,
    pub business_name: String,
    #[serde(rename = "emailPrefix")]
    pub handle: Handle,
}

/// How a session was opened; decides which data the dashboard starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Built-in demo identity; collections are loaded with sample data.
    Demo,
    /// Account from the registry; collections start empty.
    Registered,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> CredentialRecord {
        CredentialRecord {
            owner_name: "Arjun".to_string(),
            business_name: "Sharma Co".to_string(),
            handle: Handle::from_business_name("Sharma Co"),
            password: "pw1".to_string(),
        }
    }

    #[test]
    fn test_storage_shape() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ownerName": "Arjun",
                "businessName": "Sharma Co",
                "emailPrefix": "sharmaco",
                "password": "pw1"
            })
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug_output = format!("{:?}", record());
        assert!(debug_output.contains("Sharma Co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("pw1"));
    }

    #[test]
    fn test_profile_drops_secret() {
        let profile = record().profile();
        assert_eq!(profile.handle.as_str(), "sharmaco");
        assert_eq!(profile.owner_name, "Arjun");
    }
}
