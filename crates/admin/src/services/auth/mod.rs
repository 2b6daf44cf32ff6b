//! Mock seller authentication.
//!
//! Registration derives a handle from the business name and appends a
//! plaintext record to the registry; login compares handle and secret
//! verbatim. There is no hashing, no session token and no lockout. This is
//! the dashboard's demo login and must not guard anything real.
//!
//! A fixed demo pair (`demo` / `demo@123`) always signs in, even against an
//! empty registry, and opens a session preloaded with sample data.

mod error;

use std::time::Duration;

use tracing::instrument;

use bharatcart_core::Handle;

pub use error::AuthError;

use crate::db::CredentialRepository;
use crate::models::{AccountProfile, CredentialRecord, SessionKind};

/// Handle of the built-in demo account.
pub const DEMO_HANDLE: &str = "demo";
/// Secret of the built-in demo account.
pub const DEMO_SECRET: &str = "demo@123";

const DEMO_OWNER_NAME: &str = "Arjun Sharma";
const DEMO_BUSINESS_NAME: &str = "Sharma Handicrafts";

/// Identity returned for the demo pair.
#[must_use]
pub fn demo_profile() -> AccountProfile {
    AccountProfile {
        owner_name: DEMO_OWNER_NAME.to_string(),
        business_name: DEMO_BUSINESS_NAME.to_string(),
        handle: Handle::normalize_login(DEMO_HANDLE),
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub profile: AccountProfile,
    pub kind: SessionKind,
}

/// Registration and login over a [`CredentialRepository`].
#[derive(Debug)]
pub struct AuthService<R> {
    registry: R,
    latency: Duration,
}

impl<R: CredentialRepository> AuthService<R> {
    /// Create a service that resolves immediately.
    #[must_use]
    pub const fn new(registry: R) -> Self {
        Self {
            registry,
            latency: Duration::ZERO,
        }
    }

    /// Wait `latency` before resolving each call, to mimic a network hop.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Register a new seller account.
    ///
    /// The handle is the business name lowercased with all whitespace removed.
    /// Returns the derived handle, which is what the seller logs in with.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if a field is blank or the business
    /// name derives an empty handle.
    /// Returns `AuthError::DuplicateHandle` if any record already has the
    /// derived handle, regardless of owner name or secret.
    /// Returns `AuthError::Repository` if the registry cannot be read or written.
    #[instrument(skip(self, owner_name, secret))]
    pub async fn register(
        &self,
        owner_name: &str,
        business_name: &str,
        secret: &str,
    ) -> Result<Handle, AuthError> {
        self.simulate_latency().await;

        if owner_name.trim().is_empty() {
            return Err(AuthError::MissingField("owner name"));
        }
        if secret.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        let handle = Handle::from_business_name(business_name);
        if handle.is_empty() {
            return Err(AuthError::MissingField("business name"));
        }

        let inserted = self
            .registry
            .insert_unique(CredentialRecord {
                owner_name: owner_name.to_owned(),
                business_name: business_name.to_owned(),
                handle: handle.clone(),
                password: secret.to_owned(),
            })
            .await?;
        if !inserted {
            tracing::info!(%handle, "Registration rejected: handle taken");
            return Err(AuthError::DuplicateHandle(handle));
        }

        tracing::info!(%handle, "Seller registered");
        Ok(handle)
    }

    /// Check a handle and secret.
    ///
    /// The input handle is lowercased and trimmed. The demo pair always
    /// succeeds. Otherwise the first record whose handle and secret both match
    /// exactly wins.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if nothing matches.
    /// Returns `AuthError::Repository` if the registry cannot be read.
    #[instrument(skip(self, secret))]
    pub async fn authenticate(&self, handle: &str, secret: &str) -> Result<LoginOutcome, AuthError> {
        self.simulate_latency().await;

        let handle = Handle::normalize_login(handle);

        if handle.as_str() == DEMO_HANDLE && secret == DEMO_SECRET {
            tracing::info!("Demo login");
            return Ok(LoginOutcome {
                profile: demo_profile(),
                kind: SessionKind::Demo,
            });
        }

        let records = self.registry.list_all().await?;
        let matched = records
            .iter()
            .find(|record| record.handle == handle && record.password == secret);

        match matched {
            Some(record) => {
                tracing::info!(%handle, "Seller logged in");
                Ok(LoginOutcome {
                    profile: record.profile(),
                    kind: SessionKind::Registered,
                })
            }
            None => {
                tracing::warn!(%handle, "Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::db::MemoryRegistry;

    fn service() -> AuthService<MemoryRegistry> {
        AuthService::new(MemoryRegistry::new())
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let auth = service();
        let handle = auth.register("Arjun", "Sharma Co", "pw1").await.unwrap();
        assert_eq!(handle.as_str(), "sharmaco");

        let outcome = auth.authenticate("sharmaco", "pw1").await.unwrap();
        assert_eq!(outcome.kind, SessionKind::Registered);
        assert_eq!(outcome.profile.owner_name, "Arjun");
        assert_eq!(outcome.profile.business_name, "Sharma Co");

        let err = auth.authenticate("sharmaco", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_handle() {
        let auth = service();
        auth.register("Arjun", "Sharma Co", "pw1").await.unwrap();

        let err = auth
            .register("Someone Else", "  sharma   CO ", "different")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateHandle(ref h) if h.as_str() == "sharmaco"));
        assert_eq!(auth.registry().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_registrations_admit_one_handle() {
        let auth = service();

        let (first, second) = tokio::join!(
            auth.register("Arjun", "Sharma Co", "pw1"),
            auth.register("Priya", "sharma co", "pw2"),
        );
        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(AuthError::DuplicateHandle(_))))
        );
        assert_eq!(auth.registry().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_records_resolve_to_first_inserted() {
        let record = |owner: &str| CredentialRecord {
            owner_name: owner.to_string(),
            business_name: "Sharma Co".to_string(),
            handle: Handle::from_business_name("Sharma Co"),
            password: "pw1".to_string(),
        };
        let auth = AuthService::new(MemoryRegistry::with_records(vec![
            record("First Owner"),
            record("Second Owner"),
        ]));

        let outcome = auth.authenticate("sharmaco", "pw1").await.unwrap();
        assert_eq!(outcome.profile.owner_name, "First Owner");
    }

    #[tokio::test]
    async fn test_login_input_is_normalized() {
        let auth = service();
        auth.register("Arjun", "Sharma Co", "pw1").await.unwrap();
        assert!(auth.authenticate("  SharmaCo ", "pw1").await.is_ok());
        // Inner whitespace is not stripped at login.
        assert!(auth.authenticate("sharma co", "pw1").await.is_err());
    }

    #[tokio::test]
    async fn test_secret_is_case_sensitive() {
        let auth = service();
        auth.register("Arjun", "Sharma Co", "Secret").await.unwrap();
        assert!(auth.authenticate("sharmaco", "secret").await.is_err());
    }

    #[tokio::test]
    async fn test_demo_pair_works_on_empty_registry() {
        let outcome = service().authenticate(" DEMO ", "demo@123").await.unwrap();
        assert_eq!(outcome.kind, SessionKind::Demo);
        assert_eq!(outcome.profile, demo_profile());
    }

    #[tokio::test]
    async fn test_demo_handle_with_wrong_secret_is_rejected() {
        let err = service().authenticate("demo", "demo").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let auth = service();
        assert!(matches!(
            auth.register("Arjun", "   ", "pw").await,
            Err(AuthError::MissingField("business name"))
        ));
        assert!(matches!(
            auth.register("", "Sharma Co", "pw").await,
            Err(AuthError::MissingField("owner name"))
        ));
        assert!(matches!(
            auth.register("Arjun", "Sharma Co", "").await,
            Err(AuthError::MissingField("password"))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_awaited() {
        let auth = service().with_latency(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        auth.authenticate("demo", "demo@123").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
