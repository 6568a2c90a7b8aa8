//! Credential store
//!
//! Owns the bearer credential shared by every upstream call. The cached
//! value sits behind an async mutex that is held for the whole
//! exchange, so at most one registration/authentication round-trip is
//! in flight at a time and concurrent callers reuse its result.
//!
//! Each credential remembers the client pair it was issued for. When the
//! upstream refuses a repeat registration (it may register an identity only
//! once), the exchange authenticates with that remembered pair instead.

use {
    super::{
        persistence::CredentialFile,
        types::{AuthRequest, AuthResponse, ClientRegistration, Credential, RegistrationIdentity},
    },
    crate::error::{AuthError, UpstreamError},
    serde::{de::DeserializeOwned, Serialize},
    std::time::Duration,
    tokio::sync::Mutex,
};

pub struct CredentialStore {
    client: reqwest::Client,
    base_url: String,
    identity: RegistrationIdentity,
    file: CredentialFile,
    exchange_timeout: Duration,
    current: Mutex<Option<Credential>>,
}

impl CredentialStore {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        identity: RegistrationIdentity,
        file: CredentialFile,
        exchange_timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identity,
            file,
            exchange_timeout,
            current: Mutex::new(None),
        }
    }

    /// Read the previously persisted credential, if any
    pub fn load(&self) -> Option<Credential> {
        self.file.load()
    }

    /// Run the register/authenticate exchange and make the result current
    pub async fn obtain(&self) -> Result<Credential, AuthError> {
        let mut current = self.current.lock().await;
        let known = self.known_client(current.as_ref());
        let credential = self.exchange(known).await?;
        *current = Some(credential.clone());
        Ok(credential)
    }

    /// Cached credential, falling back to disk and then to a fresh exchange
    pub async fn current(&self) -> Result<Credential, AuthError> {
        let mut current = self.current.lock().await;

        if let Some(credential) = current.as_ref() {
            return Ok(credential.clone());
        }

        let credential = match self.load() {
            Some(credential) => credential,
            None => self.exchange(None).await?,
        };
        *current = Some(credential.clone());
        Ok(credential)
    }

    /// Unconditionally replace the cached credential
    pub async fn refresh(&self) -> Result<Credential, AuthError> {
        log::info!("🔑 Refreshing upstream credential");
        self.obtain().await
    }

    /// Replace the credential the upstream just rejected
    ///
    /// If another caller already swapped out `rejected_token` while this one
    /// waited for the lock, the newer credential is returned as-is.
    pub async fn refresh_rejected(&self, rejected_token: &str) -> Result<Credential, AuthError> {
        let mut current = self.current.lock().await;

        if let Some(credential) = current.as_ref() {
            if credential.token != rejected_token {
                log::debug!("Credential already refreshed by a concurrent caller");
                return Ok(credential.clone());
            }
        }

        log::info!("🔑 Refreshing rejected upstream credential");
        let known = self.known_client(current.as_ref());
        let credential = self.exchange(known).await?;
        *current = Some(credential.clone());
        Ok(credential)
    }

    /// Client pair of the cached credential, else of the persisted one
    fn known_client(&self, cached: Option<&Credential>) -> Option<ClientRegistration> {
        cached
            .map(|c| c.client.clone())
            .or_else(|| self.file.load().map(|c| c.client))
    }

    /// Register, authenticate, persist. Caller holds the `current` lock.
    async fn exchange(&self, known: Option<ClientRegistration>) -> Result<Credential, AuthError> {
        let client = match self.post_json::<_, ClientRegistration>("register", &self.identity).await {
            Ok(client) => {
                log::info!("Registered upstream client {}", client.client_id);
                client
            }
            Err(e) => match known {
                Some(client) => {
                    log::warn!(
                        "Registration refused ({}), reusing client {}",
                        e,
                        client.client_id
                    );
                    client
                }
                None => return Err(AuthError::Registration(e)),
            },
        };

        let request = AuthRequest {
            identity: &self.identity,
            client: &client,
        };
        let response: AuthResponse = self
            .post_json("auth", &request)
            .await
            .map_err(AuthError::Authentication)?;

        let credential =
            response.into_credential(client, self.identity.clone(), chrono::Utc::now());
        log::info!(
            "✅ Obtained {} credential (expires at {})",
            credential.token_type,
            credential.expires_at
        );

        // The in-memory credential stays usable even if it cannot be persisted
        if let Err(e) = self.file.save(&credential) {
            log::warn!(
                "Failed to persist credential to {}: {}",
                self.file.path().display(),
                e
            );
        }

        Ok(credential)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, UpstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .timeout(self.exchange_timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::MalformedPayload(e.to_string()))
    }
}
