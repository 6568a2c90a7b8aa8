//! Error taxonomy for the average calculator
//!
//! Only two kinds of failure ever reach an inbound caller: an invalid
//! category token and a credential failure. Everything that goes wrong
//! inside a single number fetch is absorbed into an empty result by
//! [`crate::upstream::FetchOutcome`].

use thiserror::Error;

/// Credential acquisition or authorization failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("registration exchange failed: {0}")]
    Registration(UpstreamError),

    #[error("authentication exchange failed: {0}")]
    Authentication(UpstreamError),

    #[error("upstream rejected the credential again after refresh")]
    RejectedAfterRefresh,
}

/// Unexpected upstream response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("upstream transport error: {0}")]
    Transport(String),
}

/// Top-level error surfaced to callers of the service
#[derive(Debug, Error)]
pub enum NumflowError {
    #[error("invalid category '{0}' (expected one of p, f, e, r)")]
    InvalidCategory(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type NumflowResult<T> = Result<T, NumflowError>;

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status(status.as_u16()),
            None if e.is_decode() => Self::MalformedPayload(e.to_string()),
            None => Self::Transport(e.to_string()),
        }
    }
}
