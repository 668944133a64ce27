//! PokeAPI client implementation.
//!
//! Issues plain GET requests against the REST API v2 and decodes the JSON
//! bodies. There is no retry: every failure is returned to the caller.

use std::time::Duration;

use reqwest::{header, Client, Response, Url};
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::fetcher::PageFetcher;
use super::types::LocationAreaPage;
use crate::config::Settings;

/// The PokeAPI client.
#[derive(Debug)]
pub struct PokeApiClient {
    /// The HTTP client.
    client: Client,
    /// The API root, e.g. `https://pokeapi.co/api/v2`.
    base_url: String,
}

impl PokeApiClient {
    /// Create a new client from the application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL cannot be parsed
    /// - The HTTP client cannot be built
    #[instrument(skip(settings), fields(base_url = %settings.base_url))]
    pub fn new(settings: &Settings) -> Result<Self> {
        Url::parse(&settings.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", settings.base_url, e)))?;

        let timeout = settings.request_timeout_secs.map(Duration::from_secs);
        let client = Self::build_http_client(timeout)?;

        info!("PokeAPI client created");
        Ok(Self {
            client,
            base_url: normalize_base_url(&settings.base_url),
        })
    }

    /// Build the HTTP client.
    ///
    /// Without a timeout a stalled server blocks the shell until it answers.
    fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(ApiError::Network)
    }

    /// List location areas.
    ///
    /// Calls `GET /location-area?limit={limit}&offset={offset}`.
    #[instrument(skip(self))]
    pub async fn list_location_areas(&self, limit: u32, offset: u32) -> Result<LocationAreaPage> {
        let url = self.location_area_url(limit, offset);
        let page: LocationAreaPage = self.get(&url).await?;
        debug!(
            has_next = page.next.is_some(),
            has_previous = page.previous.is_some(),
            "Fetched {} location areas (total: {})",
            page.results.len(),
            page.count
        );
        Ok(page)
    }

    fn location_area_url(&self, limit: u32, offset: u32) -> String {
        format!(
            "{}/location-area?limit={}&offset={}",
            self.base_url, limit, offset
        )
    }

    /// Perform a single GET request and decode the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Check the status and parse the JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("Error response body: {}", body);
            return Err(ApiError::from_status(status, &url));
        }

        serde_json::from_str::<T>(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageFetcher for PokeApiClient {
    async fn fetch_page(&self, limit: u32, offset: u32) -> Result<LocationAreaPage> {
        self.list_location_areas(limit, offset).await
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
