//! Builds the outbound GET request for a lookup.

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};

use crate::error::ConfigError;

/// Header carrying the API gateway subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// A validated service endpoint together with the credential used to call it.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
    credential: String,
}

impl Endpoint {
    /// Validates and normalizes the endpoint base and credential.
    ///
    /// A base without a scheme gets `https://`; a base without a trailing
    /// `/` gets one.
    pub fn new(base: &str, credential: &str) -> Result<Self, ConfigError> {
        let base = base.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let credential = credential.trim();
        if credential.is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        HeaderValue::from_str(credential).map_err(|_| ConfigError::InvalidCredential)?;

        let mut base = if base.contains("://") {
            base.to_string()
        } else {
            format!("https://{}", base)
        };
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).map_err(|_| ConfigError::InvalidEndpoint(base.clone()))?;

        Ok(Self {
            base,
            credential: credential.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Builds the request for one lookup key.
    pub fn request_for(&self, lookup_key: &str) -> Result<LookupRequest, ConfigError> {
        let key = sanitize_lookup_key(lookup_key)?;
        let url = format!("{}{}", self.base, urlencoding::encode(&key));

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        let mut credential =
            HeaderValue::from_str(&self.credential).map_err(|_| ConfigError::InvalidCredential)?;
        credential.set_sensitive(true);
        headers.insert(HeaderName::from_static("ocp-apim-subscription-key"), credential);

        Ok(LookupRequest {
            method: Method::GET,
            url,
            headers,
        })
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("base", &self.base)
            .field("credential", &crate::config::mask_secret(&self.credential))
            .finish()
    }
}

/// A fully-formed GET request, ready for the transport. It has no body.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
}

/// Builds the request for `lookup_key` against `endpoint_base` in one step.
pub fn build(
    endpoint_base: &str,
    credential: &str,
    lookup_key: &str,
) -> Result<LookupRequest, ConfigError> {
    Endpoint::new(endpoint_base, credential)?.request_for(lookup_key)
}

/// Trims the key and drops everything from the first `@`, so an email
/// address looks up its local part.
pub fn sanitize_lookup_key(lookup_key: &str) -> Result<String, ConfigError> {
    let trimmed = lookup_key.trim();
    let key = match trimmed.split_once('@') {
        Some((local, _)) => local,
        None => trimmed,
    };
    if key.is_empty() {
        return Err(ConfigError::EmptyLookupKey);
    }
    Ok(key.to_string())
}
