//! Notification toggles and the seller profile.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::AccountProfile;

/// A notification the seller can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    OrderAlerts,
    LowStock,
    AiInsight,
    GstReminders,
    SecurityLogs,
    VpaAlerts,
}

impl NotificationKind {
    pub const ALL: [Self; 6] = [
        Self::OrderAlerts,
        Self::LowStock,
        Self::AiInsight,
        Self::GstReminders,
        Self::SecurityLogs,
        Self::VpaAlerts,
    ];

    /// Stable key, e.g. `order-alerts`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OrderAlerts => "order-alerts",
            Self::LowStock => "low-stock",
            Self::AiInsight => "ai-insight",
            Self::GstReminders => "gst-reminders",
            Self::SecurityLogs => "security-logs",
            Self::VpaAlerts => "vpa-alerts",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::OrderAlerts => "High-Value Order Alerts",
            Self::LowStock => "Inventory Warning",
            Self::AiInsight => "AI Insight Digest",
            Self::GstReminders => "GST Compliance Calendar",
            Self::SecurityLogs => "Admin Session Guard",
            Self::VpaAlerts => "UPI / VPA Payment Alerts",
        }
    }

    /// State for a fresh session. Everything is on except GST reminders.
    #[must_use]
    pub const fn enabled_by_default(self) -> bool {
        !matches!(self, Self::GstReminders)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-session notification toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    toggles: BTreeMap<NotificationKind, bool>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            toggles: NotificationKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.enabled_by_default()))
                .collect(),
        }
    }
}

impl NotificationSettings {
    #[must_use]
    pub fn is_enabled(&self, kind: NotificationKind) -> bool {
        self.toggles
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.enabled_by_default())
    }

    /// Flip `kind` and return its new state.
    pub fn toggle(&mut self, kind: NotificationKind) -> bool {
        let next = !self.is_enabled(kind);
        self.toggles.insert(kind, next);
        next
    }

    pub fn set(&mut self, kind: NotificationKind, enabled: bool) {
        self.toggles.insert(kind, enabled);
    }

    pub fn enable_all(&mut self) {
        for kind in NotificationKind::ALL {
            self.toggles.insert(kind, true);
        }
    }

    /// Every toggle in display order.
    pub fn iter(&self) -> impl Iterator<Item = (NotificationKind, bool)> + '_ {
        NotificationKind::ALL
            .into_iter()
            .map(|kind| (kind, self.is_enabled(kind)))
    }
}

/// Editable profile card for the signed-in seller.
///
/// Name, mailbox and business come from the account; the rest are optional
/// contact fields that live only for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub business_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub business_type: Option<String>,
    /// GSTIN.
    pub tax_id: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn from_account(account: &AccountProfile) -> Self {
        let email = if account.handle.is_empty() {
            String::new()
        } else {
            account.handle.mailbox()
        };

        Self {
            full_name: account.owner_name.clone(),
            email,
            business_name: account.business_name.clone(),
            phone: None,
            location: None,
            business_type: None,
            tax_id: None,
        }
    }
}
