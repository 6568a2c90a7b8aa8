//! Credential-gated fetcher
//!
//! Every outbound call to the upstream goes through [`GatedFetcher::fetch`]:
//!
//! 1. attach the current bearer credential
//! 2. send under a hard timeout
//! 3. on 401/403, refresh the credential once and resend
//! 4. a second authorization failure is terminal
//!
//! Timeouts and non-auth failures are reported as [`FetchOutcome`] values,
//! never as errors. Only credential problems come back as `Err`.

use {
    crate::{
        credentials::{Credential, CredentialStore},
        error::{AuthError, UpstreamError},
    },
    reqwest::{RequestBuilder, StatusCode},
    serde::de::DeserializeOwned,
    std::{sync::Arc, time::Duration},
};

/// Result of one gated upstream call
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Ok(T),
    TimedOut,
    Failed(UpstreamError),
}

impl<T: Default> FetchOutcome<T> {
    /// Collapse to the payload, logging why it is empty when it is
    pub fn or_empty(self, context: &str) -> T {
        match self {
            FetchOutcome::Ok(value) => value,
            FetchOutcome::TimedOut => {
                log::warn!("⏱️  {}: upstream timed out, using empty result", context);
                T::default()
            }
            FetchOutcome::Failed(reason) => {
                log::warn!("⚠️  {}: {}, using empty result", context, reason);
                T::default()
            }
        }
    }
}

/// What a single send produced
enum Attempt<T> {
    Completed(FetchOutcome<T>),
    Unauthorized,
}

pub struct GatedFetcher {
    client: reqwest::Client,
    credentials: Arc<CredentialStore>,
}

impl GatedFetcher {
    pub fn new(client: reqwest::Client, credentials: Arc<CredentialStore>) -> Self {
        Self { client, credentials }
    }

    /// Issue the call built by `build`, bounded by `timeout`
    ///
    /// `build` may run twice (original call and post-refresh retry), so it
    /// must produce the same request each time.
    pub async fn fetch<T, F>(&self, build: F, timeout: Duration) -> Result<FetchOutcome<T>, AuthError>
    where
        T: DeserializeOwned,
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let credential = self.credentials.current().await?;

        match self.attempt(&build, &credential, timeout).await {
            Attempt::Completed(outcome) => return Ok(outcome),
            Attempt::Unauthorized => {
                log::warn!("🔒 Upstream rejected credential, refreshing once");
            }
        }

        let refreshed = self.credentials.refresh_rejected(&credential.token).await?;

        match self.attempt(&build, &refreshed, timeout).await {
            Attempt::Completed(outcome) => Ok(outcome),
            Attempt::Unauthorized => {
                log::error!("❌ Upstream rejected the refreshed credential");
                Err(AuthError::RejectedAfterRefresh)
            }
        }
    }

    async fn attempt<T, F>(&self, build: &F, credential: &Credential, timeout: Duration) -> Attempt<T>
    where
        T: DeserializeOwned,
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let request = build(&self.client).bearer_auth(&credential.token);

        let call = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match tokio::time::timeout(timeout, call).await {
            Err(_elapsed) => return Attempt::Completed(FetchOutcome::TimedOut),
            Ok(Err(e)) if e.is_timeout() => return Attempt::Completed(FetchOutcome::TimedOut),
            Ok(Err(e)) => return Attempt::Completed(FetchOutcome::Failed(e.into())),
            Ok(Ok(sent)) => sent,
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Attempt::Unauthorized;
        }

        if !status.is_success() {
            return Attempt::Completed(FetchOutcome::Failed(UpstreamError::Status(status.as_u16())));
        }

        match serde_json::from_slice::<T>(&body) {
            Ok(value) => Attempt::Completed(FetchOutcome::Ok(value)),
            Err(e) => Attempt::Completed(FetchOutcome::Failed(UpstreamError::MalformedPayload(
                e.to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CredentialFile, RegistrationIdentity};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Payload {
        value: i64,
    }

    /// Each call to /auth hands out the next token in `tokens`
    async fn mount_exchange(server: &MockServer, tokens: &[&str]) {
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"clientID": "cid", "clientSecret": "secret"})),
            )
            .mount(server)
            .await;
        for token in tokens {
            Mock::given(method("POST"))
                .and(path("/auth"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "token_type": "Bearer",
                    "access_token": token,
                    "expires_in": 300
                })))
                .up_to_n_times(1)
                .mount(server)
                .await;
        }
    }

    fn fetcher(server: &MockServer, dir: &tempfile::TempDir) -> GatedFetcher {
        let client = reqwest::Client::new();
        let store = CredentialStore::new(
            client.clone(),
            server.uri(),
            RegistrationIdentity::default(),
            CredentialFile::new(dir.path().join("credentials.json")),
            Duration::from_secs(2),
        );
        GatedFetcher::new(client, Arc::new(store))
    }

    fn get_value(server: &MockServer) -> impl Fn(&reqwest::Client) -> RequestBuilder {
        let url = format!("{}/value", server.uri());
        move |client| client.get(&url)
    }

    fn count_path(requests: &[wiremock::Request], p: &str) -> usize {
        requests.iter().filter(|r| r.url.path() == p).count()
    }

    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let server = MockServer::start().await;
        mount_exchange(&server, &["tok-1"]).await;
        Mock::given(method("GET"))
            .and(path("/value"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 7})))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let outcome: FetchOutcome<Payload> = fetcher(&server, &dir)
            .fetch(get_value(&server), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Ok(Payload { value: 7 }));
    }

    #[tokio::test]
    async fn test_refresh_and_retry_once_on_unauthorized() {
        let server = MockServer::start().await;
        mount_exchange(&server, &["expired", "fresh"]).await;
        Mock::given(method("GET"))
            .and(path("/value"))
            .and(header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/value"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 7})))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let outcome: FetchOutcome<Payload> = fetcher(&server, &dir)
            .fetch(get_value(&server), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Ok(Payload { value: 7 }));
        let requests = server.received_requests().await.unwrap();
        assert_eq!(count_path(&requests, "/value"), 2);
        assert_eq!(count_path(&requests, "/auth"), 2);
    }

    #[tokio::test]
    async fn test_second_unauthorized_is_terminal() {
        let server = MockServer::start().await;
        mount_exchange(&server, &["first", "second", "third"]).await;
        Mock::given(method("GET"))
            .and(path("/value"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let err = fetcher(&server, &dir)
            .fetch::<Payload, _>(get_value(&server), Duration::from_secs(1))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::RejectedAfterRefresh);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(count_path(&requests, "/value"), 2, "no third attempt");
        assert_eq!(count_path(&requests, "/auth"), 2, "exactly one refresh");
    }

    #[tokio::test]
    async fn test_timeout_is_neutral_and_not_retried() {
        let server = MockServer::start().await;
        mount_exchange(&server, &["tok-1"]).await;
        Mock::given(method("GET"))
            .and(path("/value"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"value": 7}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let outcome: FetchOutcome<Payload> = fetcher(&server, &dir)
            .fetch(get_value(&server), Duration::from_millis(50))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::TimedOut);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(count_path(&requests, "/value"), 1);
        assert_eq!(count_path(&requests, "/auth"), 1);
    }

    #[tokio::test]
    async fn test_server_error_and_bad_shape_are_failures() {
        let server = MockServer::start().await;
        mount_exchange(&server, &["tok-1"]).await;
        Mock::given(method("GET"))
            .and(path("/value"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/shape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"other": 1})))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher(&server, &dir);
        let shape_url = format!("{}/shape", server.uri());

        let status: FetchOutcome<Payload> = fetcher
            .fetch(get_value(&server), Duration::from_secs(1))
            .await
            .unwrap();
        let shape: FetchOutcome<Payload> = fetcher
            .fetch(|c: &reqwest::Client| c.get(&shape_url), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(status, FetchOutcome::Failed(UpstreamError::Status(503)));
        assert!(matches!(shape, FetchOutcome::Failed(UpstreamError::MalformedPayload(_))));
        assert_eq!(shape.or_empty("shape"), Payload::default());
    }
}
