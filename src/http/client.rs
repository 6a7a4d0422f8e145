//! HTTP client executing lookup requests.

use std::time::Duration;

use log::debug;
use reqwest::Client;

use super::transport::classify_transport_error;
use crate::error::TransportError;
use crate::lookup::LookupRequest;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpExchange {
    pub status: u16,
    pub body: Vec<u8>,
}

/// HTTP client that sends exactly one request per call. No retries.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client that gives up on any request after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("PERSON_LOOKUP_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| classify_transport_error(&e))?;
        Ok(Self::new(client))
    }

    /// Sends the request and reads the whole body.
    ///
    /// Any HTTP status counts as a completed exchange; only failures to
    /// get a response at all are errors.
    #[tracing::instrument(skip(self, request))]
    pub async fn execute(&self, request: &LookupRequest) -> Result<HttpExchange, TransportError> {
        debug!("{} {}...", request.method, request.url);

        let response = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        debug!("Received HTTP {} with {} bytes", status, body.len());

        Ok(HttpExchange {
            status,
            body: body.to_vec(),
        })
    }
}
