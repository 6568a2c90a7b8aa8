//! Outbound calls to the upstream provider

pub mod fetcher;
pub mod numbers;

pub use fetcher::{FetchOutcome, GatedFetcher};
pub use numbers::{NumbersClient, NumbersPayload};
