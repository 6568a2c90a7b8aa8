//! Per-category recency windows and their running average
//!
//! Each [`Category`] owns an independent [`UniqueWindow`]. The set of
//! windows lives in [`WindowSet`], one async mutex per category so that
//! requests for different categories never contend.
//!
//! Values are kept as [`serde_json::Number`] so that anything the upstream
//! sends as a JSON number survives: integers past `i64::MAX` (late
//! Fibonacci terms) and floats alike. `2` and `2.0` are distinct values.

pub mod category;
pub mod unique_window;

pub use category::Category;
pub use unique_window::{UniqueWindow, DEFAULT_WINDOW_SIZE};

use {serde_json::Number, tokio::sync::Mutex};

/// One window per category, each behind its own exclusion scope
pub struct WindowSet {
    windows: [Mutex<UniqueWindow<Number>>; 4],
}

impl WindowSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            windows: std::array::from_fn(|_| Mutex::new(UniqueWindow::new(capacity))),
        }
    }

    pub fn get(&self, category: Category) -> &Mutex<UniqueWindow<Number>> {
        &self.windows[category.index()]
    }
}

impl Default for WindowSet {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

/// Arithmetic mean rounded to two decimals, `0.0` for an empty snapshot.
///
/// Rounding is half away from zero (`f64::round` on the value scaled by 100).
pub fn average(values: &[Number]) -> f64 {
    let floats: Vec<f64> = values.iter().filter_map(Number::as_f64).collect();
    if floats.is_empty() {
        return 0.0;
    }

    let sum: f64 = floats.iter().sum();
    round2(sum / floats.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
