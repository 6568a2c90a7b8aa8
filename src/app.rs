//! Wiring: one credential store, one fetcher, one window per category

use {
    crate::{
        analytics::AnalyticsClient,
        config::ServiceConfig,
        credentials::{CredentialFile, CredentialStore},
        error::{NumflowError, NumflowResult},
        http::AppState,
        service::WindowService,
        upstream::{GatedFetcher, NumbersClient},
        window::WindowSet,
    },
    std::sync::Arc,
};

pub struct App {
    pub credentials: Arc<CredentialStore>,
    pub windows: Arc<WindowSet>,
    pub service: Arc<WindowService>,
    pub analytics: Arc<AnalyticsClient>,
}

impl App {
    pub fn from_config(config: &ServiceConfig) -> NumflowResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| NumflowError::Config(format!("failed to build HTTP client: {}", e)))?;

        let credentials = Arc::new(CredentialStore::new(
            client.clone(),
            config.upstream_url.clone(),
            config.identity.clone(),
            CredentialFile::new(&config.credential_path),
            config.exchange_timeout(),
        ));
        let fetcher = Arc::new(GatedFetcher::new(client, credentials.clone()));

        let windows = Arc::new(WindowSet::new(config.window_size));
        let numbers = NumbersClient::new(
            fetcher.clone(),
            config.upstream_url.clone(),
            config.fetch_timeout(),
        );
        let service = Arc::new(WindowService::new(windows.clone(), numbers));
        let analytics = Arc::new(AnalyticsClient::new(
            fetcher,
            config.upstream_url.clone(),
            config.exchange_timeout(),
        ));

        Ok(Self {
            credentials,
            windows,
            service,
            analytics,
        })
    }

    /// Acquire the startup credential; failure here is fatal to the process
    pub async fn init_credentials(&self) -> NumflowResult<()> {
        let credential = self.credentials.current().await?;
        log::info!(
            "✅ Credential ready ({} token, expires at {})",
            credential.token_type,
            credential.expires_at
        );
        Ok(())
    }

    pub fn state(&self) -> AppState {
        AppState {
            service: self.service.clone(),
            analytics: self.analytics.clone(),
        }
    }
}
