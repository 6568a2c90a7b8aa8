//! Inbound HTTP surface
//!
//! - `GET /numbers/:category` average calculator
//! - `GET /users` top users by post count
//! - `GET /posts?type=latest|popular` post rankings
//! - `GET /health`

use {
    crate::{
        analytics::{AnalyticsClient, DEFAULT_TOP_LIMIT},
        error::NumflowError,
        service::WindowService,
    },
    axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    },
    serde::{Deserialize, Serialize},
    serde_json::json,
    std::sync::Arc,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WindowService>,
    pub analytics: Arc<AnalyticsClient>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for NumflowError {
    fn into_response(self) -> Response {
        let status = match &self {
            NumflowError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            NumflowError::Auth(_) | NumflowError::Upstream(_) => StatusCode::BAD_GATEWAY,
            NumflowError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status != StatusCode::BAD_REQUEST {
            log::error!("❌ Request failed: {}", self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/numbers/:category", get(numbers_handler))
        .route("/users", get(top_users_handler))
        .route("/posts", get(posts_handler))
        .with_state(state)
}

/// Bind and serve until the listener fails
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn numbers_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, NumflowError> {
    let snapshot = state.service.handle(&category).await?;
    Ok(Json(snapshot))
}

async fn top_users_handler(State(state): State<AppState>) -> Result<impl IntoResponse, NumflowError> {
    let top_users = state.analytics.top_users(DEFAULT_TOP_LIMIT).await?;
    Ok(Json(json!({ "topUsers": top_users })))
}

#[derive(Debug, Deserialize)]
struct PostsQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

async fn posts_handler(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Result<Response, NumflowError> {
    match query.kind.as_deref().unwrap_or("popular") {
        "latest" => {
            let posts = state.analytics.latest_posts(DEFAULT_TOP_LIMIT).await?;
            Ok(Json(json!({ "posts": posts })).into_response())
        }
        "popular" => {
            let posts = state.analytics.popular_posts().await?;
            Ok(Json(json!({ "posts": posts })).into_response())
        }
        other => Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("invalid post type '{}' (expected latest or popular)", other),
            }),
        )
            .into_response()),
    }
}
