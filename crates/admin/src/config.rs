//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BHARATCART_REGISTRY_PATH` - Credential registry file (default: `bharatcart_sql_registry_v1.json`)
//! - `BHARATCART_AUTH_LATENCY_MS` - Simulated auth round-trip in milliseconds (default: 1000)
//! - `GEMINI_API_KEY` - Google Gemini API key; insights use the static fallback when unset
//! - `GEMINI_MODEL` - Gemini model ID (default: gemini-3-flash-preview)
//! - `GEMINI_BASE_URL` - API root (default: `https://generativelanguage.googleapis.com/v1beta`)
//! - `GEMINI_TIMEOUT_SECS` - Insight request timeout (default: 20)

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Registry file name; the stem matches the storage key the dashboard uses.
pub const DEFAULT_REGISTRY_PATH: &str = "bharatcart_sql_registry_v1.json";
const DEFAULT_AUTH_LATENCY_MS: &str = "1000";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_TIMEOUT_SECS: &str = "20";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Credential registry file
    pub registry_path: PathBuf,
    /// Delay awaited before register and login resolve
    pub auth_latency: Duration,
    /// Insight client configuration
    pub insights: InsightsConfig,
}

/// Gemini insight configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct InsightsConfig {
    /// API key; `None` disables remote insights.
    pub api_key: Option<SecretString>,
    /// Model ID (e.g., gemini-3-flash-preview)
    pub model: String,
    /// API root, without the `/models/...` suffix
    pub base_url: Url,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for InsightsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl InsightsConfig {
    /// A configuration with no API key: every insight request falls back.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the default base URL is a constant.
    pub fn disabled() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: parse_url("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)?,
            timeout: Duration::from_secs(20),
        })
    }

    fn from_source(env: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let api_key = match env.optional("GEMINI_API_KEY") {
            Some(key) => {
                validate_secret_strength(&key, "GEMINI_API_KEY")?;
                Some(SecretString::from(key))
            }
            None => None,
        };

        let base_url = parse_url(
            "GEMINI_BASE_URL",
            &env.or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
        )?;
        let timeout_secs = env.parse_or_default::<u64>("GEMINI_TIMEOUT_SECS", DEFAULT_GEMINI_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "GEMINI_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            model: env.or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the API key looks
    /// like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AdminConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSource { lookup: &lookup };

        let registry_path =
            PathBuf::from(env.or_default("BHARATCART_REGISTRY_PATH", DEFAULT_REGISTRY_PATH));
        let latency_ms =
            env.parse_or_default::<u64>("BHARATCART_AUTH_LATENCY_MS", DEFAULT_AUTH_LATENCY_MS)?;

        Ok(Self {
            registry_path,
            auth_latency: Duration::from_millis(latency_ms),
            insights: InsightsConfig::from_source(&env)?,
        })
    }

    /// Returns a reference to the insight configuration.
    #[must_use]
    pub const fn insights(&self) -> &InsightsConfig {
        &self.insights
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct EnvSource<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvSource<'_> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject placeholders outright; warn on keys with suspiciously low entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        tracing::warn!(
            var = var_name,
            entropy = format!("{entropy:.2}"),
            "API key has low entropy; it may not be a real key"
        );
    }

    Ok(())
}
