//! Login handle derived from a business name.
//!
//! A seller signs up with a business name and logs in with the handle derived
//! from it: `"Sharma Co"` becomes `sharmaco`. The handle doubles as the local
//! part of the seller's profile mailbox.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Domain appended to a handle to form the profile mailbox.
pub const MAILBOX_DOMAIN: &str = "gmail.com";

/// A seller's login handle.
///
/// Two constructors exist because sign-up and login normalize differently:
///
/// - [`Handle::from_business_name`] lowercases and strips *all* whitespace.
/// - [`Handle::normalize_login`] lowercases and trims the ends only, so a
///   login input with an inner space never matches a derived handle.
///
/// ```
/// use bharatcart_core::Handle;
///
/// assert_eq!(Handle::from_business_name("Sharma Co").as_str(), "sharmaco");
/// assert_eq!(Handle::normalize_login("  SharmaCo ").as_str(), "sharmaco");
/// assert_ne!(
///     Handle::normalize_login("sharma co"),
///     Handle::from_business_name("Sharma Co"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Derive the handle registered for a business name.
    #[must_use]
    pub fn from_business_name(business_name: &str) -> Self {
        Self(
            business_name
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }

    /// Normalize a handle typed at the login prompt.
    #[must_use]
    pub fn normalize_login(input: &str) -> Self {
        Self(input.to_lowercase().trim().to_owned())
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the handle is empty (e.g. derived from a blank business name).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Profile mailbox for this handle (`<handle>@gmail.com`).
    #[must_use]
    pub fn mailbox(&self) -> String {
        format!("{}@{MAILBOX_DOMAIN}", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_business_name_strips_inner_whitespace() {
        let handle = Handle::from_business_name("  Sharma \t Handi crafts ");
        assert_eq!(handle.as_str(), "sharmahandicrafts");
    }

    #[test]
    fn test_normalize_login_keeps_inner_whitespace() {
        let handle = Handle::normalize_login(" Sharma Co ");
        assert_eq!(handle.as_str(), "sharma co");
    }

    #[test]
    fn test_blank_business_name_derives_empty_handle() {
        assert!(Handle::from_business_name("   ").is_empty());
    }

    #[test]
    fn test_mailbox() {
        assert_eq!(Handle::normalize_login("demo").mailbox(), "demo@gmail.com");
    }
}
