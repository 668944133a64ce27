//! PokeAPI response types.
//!
//! Only the fields the shell prints or pages with are modelled.

use serde::Deserialize;

/// One page of location areas.
///
/// Returned by `GET /api/v2/location-area?limit=..&offset=..`.
/// Every field defaults when missing so sparse bodies still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas across all pages.
    #[serde(default)]
    pub count: u32,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, `null` on the first page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Entries on this page, in API order.
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl LocationAreaPage {
    /// Names of the entries on this page, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }
}

/// A named reference to another API resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}
