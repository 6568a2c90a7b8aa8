//! # numflow
//!
//! Average calculator over a rate-limited, occasionally slow upstream
//! number provider, plus a small social-analytics surface.
//!
//! ## Module Organization
//!
//! - `window` - Bounded unique-value windows, one per number category
//! - `credentials` - Bearer credential exchange, cache and persistence
//! - `upstream` - Credential-gated fetcher and number endpoints
//! - `service` - Per-request orchestration (snapshot, fetch, ingest, average)
//! - `analytics` - Top users, latest and most-commented posts
//! - `http` - Inbound axum routes
//! - `config` - Environment configuration
//! - `app` - Wiring of the above

pub mod analytics;
pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod service;
pub mod upstream;
pub mod window;

pub use app::App;
pub use config::ServiceConfig;
pub use error::{AuthError, NumflowError, NumflowResult, UpstreamError};
pub use service::{ResponseSnapshot, WindowService};
pub use window::{average, Category, UniqueWindow, WindowSet};
