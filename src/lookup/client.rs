use std::future::Future;

use async_trait::async_trait;
use log::debug;

use super::record::PersonRecord;
use super::request::Endpoint;
use super::response::normalize;
use crate::config::{LookupConfig, mask_secret};
use crate::error::{LookupError, TransportError};
use crate::http::HttpClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FindPerson: Send + Sync {
    /// Looks up one person by NetID, email address, or UIN.
    async fn find_person(&self, lookup_key: &str) -> Result<PersonRecord, LookupError>;
}

/// Client for the person lookup service.
pub struct PersonLookup {
    endpoint: Endpoint,
    http: HttpClient,
}

impl PersonLookup {
    /// Validates the configuration and prepares the HTTP client.
    ///
    /// Fails before any network activity when the URL or key is unusable.
    #[tracing::instrument(skip(config))]
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let endpoint = Endpoint::new(&config.api_url, &config.subscription_key)?;
        debug!(
            "Using endpoint {} with subscription key {}",
            endpoint.base(),
            mask_secret(&config.subscription_key)
        );
        let http = HttpClient::with_timeout(config.timeout)?;
        Ok(Self::with_client(endpoint, http))
    }

    pub fn with_client(endpoint: Endpoint, http: HttpClient) -> Self {
        Self { endpoint, http }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl FindPerson for PersonLookup {
    #[tracing::instrument(skip(self))]
    async fn find_person(&self, lookup_key: &str) -> Result<PersonRecord, LookupError> {
        let request = self.endpoint.request_for(lookup_key)?;

        match self.http.execute(&request).await {
            Ok(exchange) => normalize(exchange.status, &exchange.body, None),
            Err(failure) => normalize(0, &[], Some(failure)),
        }
    }
}

/// Runs a lookup, abandoning it when `cancel` completes first.
///
/// Dropping the lookup future drops the in-flight request with it.
pub async fn find_person_until<F, C>(
    finder: &F,
    lookup_key: &str,
    cancel: C,
) -> Result<PersonRecord, LookupError>
where
    F: FindPerson + ?Sized,
    C: Future<Output = ()>,
{
    tokio::select! {
        result = finder.find_person(lookup_key) => result,
        () = cancel => normalize(0, &[], Some(TransportError::Cancelled)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::lookup::SUBSCRIPTION_KEY_HEADER;
    use crate::test_utils::SAMPLE_EMPLOYEE_BODY;
    use mockito::Server;
    use std::time::Duration;

    fn lookup_for(url: &str) -> PersonLookup {
        PersonLookup::new(&LookupConfig::new(format!("{}/person", url), "secret-key")).unwrap()
    }

    #[test]
    fn test_new_rejects_blank_settings() {
        let err = PersonLookup::new(&LookupConfig::new("", "key")).err().unwrap();
        assert_eq!(err, LookupError::Config(ConfigError::EmptyEndpoint));

        let err = PersonLookup::new(&LookupConfig::new("api.example.edu", "  "))
            .err()
            .unwrap();
        assert_eq!(err, LookupError::Config(ConfigError::EmptyCredential));
    }

    #[tokio::test]
    async fn test_find_person() {
        let mut server = Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/person/jdoe")
            .match_header(SUBSCRIPTION_KEY_HEADER, "secret-key")
            .match_header("cache-control", "no-cache")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE_EMPLOYEE_BODY)
            .expect(1)
            .create_async()
            .await;

        let lookup = lookup_for(&url);
        assert_eq!(lookup.endpoint().base(), format!("{}/person/", url));
        let record = lookup.find_person("jdoe@illinois.edu").await.unwrap();

        mock.assert_async().await;
        assert_eq!(record.first_name(), Some("Jane"));
        assert_eq!(record.institutional_id(), Some(651234567));
        assert_eq!(record.raw_body(), SAMPLE_EMPLOYEE_BODY);
    }

    #[tokio::test]
    async fn test_find_person_not_found() {
        let mut server = Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/person/nobody")
            .with_status(200)
            .with_body(r#"{"list": [{}]}"#)
            .create_async()
            .await;

        let result = lookup_for(&url).find_person("nobody").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap_err(), LookupError::NotFound);
    }

    #[tokio::test]
    async fn test_find_person_remote_rejected() {
        let mut server = Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/person/jdoe")
            .with_status(401)
            .with_body(r#"{"statusCode": 401, "message": "Access denied"}"#)
            .create_async()
            .await;

        let result = lookup_for(&url).find_person("jdoe").await;

        mock.assert_async().await;
        assert_eq!(
            result.unwrap_err(),
            LookupError::RemoteRejected {
                status: 401,
                message: "Access denied".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_find_person_gateway_html_error() {
        let mut server = Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/person/jdoe")
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<html><body>502 Bad Gateway</body></html>")
            .create_async()
            .await;

        let result = lookup_for(&url).find_person("jdoe").await;

        mock.assert_async().await;
        assert_eq!(
            result.unwrap_err(),
            LookupError::RemoteRejected {
                status: 502,
                message: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_find_person_blank_key_sends_nothing() {
        let mut server = Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let result = lookup_for(&url).find_person("   ").await;

        mock.assert_async().await;
        assert_eq!(
            result.unwrap_err(),
            LookupError::Config(ConfigError::EmptyLookupKey)
        );
    }

    #[tokio::test]
    async fn test_find_person_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = lookup_for(&format!("http://{}", addr))
            .find_person("jdoe")
            .await;

        assert_eq!(result.unwrap_err().kind(), "connection_failed");
    }

    /// A service that never answers.
    struct Unresponsive;

    #[async_trait]
    impl FindPerson for Unresponsive {
        async fn find_person(&self, _lookup_key: &str) -> Result<PersonRecord, LookupError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_find_person_until_cancelled() {
        let result = find_person_until(&Unresponsive, "jdoe", std::future::ready(())).await;

        assert_eq!(
            result.unwrap_err(),
            LookupError::Transport(TransportError::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_find_person_until_completes() {
        let mut finder = MockFindPerson::new();
        finder
            .expect_find_person()
            .returning(|_| Err(LookupError::NotFound));

        let cancel = tokio::time::sleep(Duration::from_secs(60));
        let result = find_person_until(&finder, "jdoe", cancel).await;

        assert_eq!(result.unwrap_err(), LookupError::NotFound);
    }
}
