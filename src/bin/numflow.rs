//! numflow runtime
//!
//! Usage:
//!   cargo run --release --bin numflow
//!
//! Environment variables:
//!   NUMFLOW_UPSTREAM_URL - Upstream base URL
//!   NUMFLOW_BIND_ADDR - Listener address (default: 0.0.0.0:9876)
//!   NUMFLOW_WINDOW_SIZE - Window capacity (default: 10)
//!   NUMFLOW_FETCH_TIMEOUT_MS - Number fetch timeout (default: 500)
//!   NUMFLOW_CREDENTIAL_PATH - Persisted credential (default: credentials.json)
//!   NUMFLOW_REG_* - Registration identity

use dotenv::dotenv;
use log::{error, info};
use numflow::{http, App, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServiceConfig::from_env();

    info!("🚀 Starting numflow");
    info!("   ├─ Upstream: {}", config.upstream_url);
    info!("   ├─ Window size: {}", config.window_size);
    info!("   ├─ Fetch timeout: {}ms", config.fetch_timeout_ms);
    info!("   └─ Credential file: {}", config.credential_path);

    let app = App::from_config(&config)?;

    if let Err(e) = app.init_credentials().await {
        error!("❌ Could not acquire upstream credential: {}", e);
        return Err(e.into());
    }

    tokio::select! {
        result = http::serve(&config.bind_addr, app.state()) => {
            if let Err(e) = result {
                error!("❌ Server error: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("⚠️  Received CTRL+C, shutting down...");
        }
    }

    info!("✅ numflow stopped");
    Ok(())
}
