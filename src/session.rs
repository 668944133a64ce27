//! Per-run session state shared by the shell commands.
//!
//! The session owns the pagination cursor and the page fetcher. It is built
//! once at startup and handed to every command by the interactive loop.

use tracing::{debug, instrument};

use crate::api::{self, LocationAreaPage, PageFetcher};

/// Number of location areas per page.
pub const PAGE_SIZE: u32 = 20;

/// The pagination cursor.
///
/// `offset` is where the next forward page starts. It is always a multiple of
/// `PAGE_SIZE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    offset: u32,
}

impl Pagination {
    /// Current offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Offset the backward command fetches from.
    ///
    /// The cursor already points one page past the page last shown, so
    /// stepping back goes two pages, clamped to the first page.
    pub fn previous_offset(&self) -> u32 {
        if self.offset > PAGE_SIZE {
            self.offset - 2 * PAGE_SIZE
        } else {
            0
        }
    }

    /// Record that the page starting at `offset` was shown.
    fn shown(&mut self, offset: u32) {
        self.offset = offset + PAGE_SIZE;
    }
}

/// Session context: pagination plus the capability to fetch pages.
#[derive(Debug)]
pub struct Session<F> {
    pagination: Pagination,
    fetcher: F,
}

impl<F: PageFetcher> Session<F> {
    /// Create a session starting at the first page.
    pub fn new(fetcher: F) -> Self {
        Self {
            pagination: Pagination::default(),
            fetcher,
        }
    }

    /// The pagination cursor.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Fetch the page at the cursor and move the cursor forward one page.
    pub async fn next_page(&mut self) -> api::Result<LocationAreaPage> {
        let offset = self.pagination.offset();
        self.fetch_from(offset).await
    }

    /// Fetch the page before the one last shown and leave the cursor just past it.
    pub async fn previous_page(&mut self) -> api::Result<LocationAreaPage> {
        let offset = self.pagination.previous_offset();
        self.fetch_from(offset).await
    }

    /// The cursor only moves when the fetch succeeds.
    #[instrument(skip(self))]
    async fn fetch_from(&mut self, offset: u32) -> api::Result<LocationAreaPage> {
        let page = self.fetcher.fetch_page(PAGE_SIZE, offset).await?;
        self.pagination.shown(offset);
        debug!(next_offset = self.pagination.offset(), "Page shown");
        Ok(page)
    }
}
