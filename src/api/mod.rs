//! PokeAPI client and types.
//!
//! This module provides the interface for fetching location area pages.

mod client;
mod error;
mod fetcher;
pub mod types;

pub use client::PokeApiClient;
pub use error::{ApiError, Result};
pub use fetcher::PageFetcher;
pub use types::LocationAreaPage;
