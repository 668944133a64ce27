//! The page-fetching capability the shell commands depend on.

use super::error::Result;
use super::types::LocationAreaPage;

/// Something that can fetch one page of location areas.
///
/// `PokeApiClient` talks to the real API; tests substitute in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetch `limit` location areas starting at `offset`.
    async fn fetch_page(&self, limit: u32, offset: u32) -> Result<LocationAreaPage>;
}
