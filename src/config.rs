//! Connection settings for the directory service.

use std::fmt;
use std::time::Duration;

/// Default request timeout in seconds, enforced by the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings needed to talk to the directory service.
///
/// Values are taken as given; validation happens when a
/// [`PersonLookup`](crate::lookup::PersonLookup) is built from them.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Base endpoint, with or without `https://`.
    pub api_url: String,
    /// Subscription key sent with every request.
    pub subscription_key: String,
    pub timeout: Duration,
}

impl LookupConfig {
    pub fn new(api_url: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            subscription_key: subscription_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for LookupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupConfig")
            .field("api_url", &self.api_url)
            .field("subscription_key", &mask_secret(&self.subscription_key))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Masks a secret for log output, keeping only the first and last four characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.trim().chars().collect();
    if chars.len() <= 8 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
