//! Window service: one request = snapshot, fetch, ingest, average
//!
//! The category's window lock is held from the "before" snapshot through
//! the ingest, so `window_prev_state` is always exactly the state this
//! request's batch was applied to. Different categories never contend.

use {
    crate::{
        error::{NumflowError, NumflowResult},
        upstream::NumbersClient,
        window::{average, Category, WindowSet},
    },
    serde::Serialize,
    serde_json::Number,
    std::sync::Arc,
};

/// Response for one average-calculator request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    pub window_prev_state: Vec<Number>,
    pub window_curr_state: Vec<Number>,
    pub numbers: Vec<Number>,
    pub avg: f64,
}

pub struct WindowService {
    windows: Arc<WindowSet>,
    numbers: NumbersClient,
}

impl WindowService {
    pub fn new(windows: Arc<WindowSet>, numbers: NumbersClient) -> Self {
        Self { windows, numbers }
    }

    /// Handle a request for the inbound category token
    ///
    /// Unknown tokens are rejected before any window or upstream is touched.
    pub async fn handle(&self, token: &str) -> NumflowResult<ResponseSnapshot> {
        let category = Category::from_token(token)
            .ok_or_else(|| NumflowError::InvalidCategory(token.to_string()))?;
        self.handle_category(category).await
    }

    pub async fn handle_category(&self, category: Category) -> NumflowResult<ResponseSnapshot> {
        let mut window = self.windows.get(category).lock().await;
        let window_prev_state = window.snapshot();

        let numbers = self
            .numbers
            .fetch(category)
            .await?
            .or_empty(&format!("numbers/{}", category));

        let window_curr_state = window.ingest_and_snapshot(&numbers);
        drop(window);

        let avg = average(&window_curr_state);

        log::debug!(
            "numbers/{}: fetched {} values, window {} -> {}, avg {:.2}",
            category,
            numbers.len(),
            window_prev_state.len(),
            window_curr_state.len(),
            avg
        );

        Ok(ResponseSnapshot {
            window_prev_state,
            window_curr_state,
            numbers,
            avg,
        })
    }
}
