//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Mock registration and login against the credential registry
//! - `export` - Analytics CSV and JSON reports
//! - `metrics` - Derived dashboard statistics
//! - `settings` - Notification toggles and the seller profile

pub mod auth;
pub mod export;
pub mod metrics;
pub mod settings;

pub use auth::{AuthError, AuthService, LoginOutcome};
pub use export::{AnalyticsReport, ChannelShare, RevenuePoint};
pub use metrics::{DashboardStats, OrderPipeline};
pub use settings::{NotificationKind, NotificationSettings, Profile};
