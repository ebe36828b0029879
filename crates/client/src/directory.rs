//! State behind the searchable athlete directory.
//!
//! Every fetch is tagged with a generation number when it is issued. Only the
//! response carrying the latest generation is applied; anything older is
//! dropped, so a slow response can never overwrite a newer one.

use storage::dto::{
    athlete::AthleteProfileResponse, common::SearchPage, search::SearchFilters,
};

use crate::location;
use crate::render;
use crate::traits::DirectoryBackend;
use crate::{ClientError, Result};

pub const EMPTY_STATE: &str = "No athletes found matching your criteria.";

/// Handle for one in-flight fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    filters: SearchFilters,
}

impl FetchTicket {
    /// Filters to send, including the requested page
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }
}

#[derive(Debug)]
pub struct DirectoryView {
    filters: SearchFilters,
    page: u32,
    loading: bool,
    error: Option<String>,
    rows: Vec<AthleteProfileResponse>,
    count: i64,
    total_pages: u32,
    latest_generation: u64,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new(SearchFilters::default())
    }
}

impl DirectoryView {
    /// Text filters are stored trimmed, with blanks dropped, so the state
    /// survives a trip through [`location`](Self::location) unchanged.
    pub fn new(filters: SearchFilters) -> Self {
        let page = filters.page.max(1);
        Self {
            filters: SearchFilters { page: 1, ..filters.normalized() },
            page,
            loading: false,
            error: None,
            rows: Vec::new(),
            count: 0,
            total_pages: 0,
            latest_generation: 0,
        }
    }

    /// Rebuild the view from a shared location such as `?city=Austin&page=2`.
    pub fn restore(location: &str) -> Result<Self> {
        Ok(Self::new(location::from_query_string(location)?))
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn rows(&self) -> &[AthleteProfileResponse] {
        &self.rows
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Query string describing the current filters and page
    pub fn location(&self) -> String {
        location::to_query_string(&self.filters.with_page(self.page))
    }

    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.latest_generation += 1;
        self.loading = true;
        self.error = None;

        FetchTicket {
            generation: self.latest_generation,
            filters: self.filters.with_page(page),
        }
    }

    /// Apply a response. Returns `false` when the ticket was superseded and the
    /// response was dropped.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<SearchPage<AthleteProfileResponse>>,
    ) -> bool {
        if ticket.generation != self.latest_generation {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.latest_generation,
                "Dropping superseded directory response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.rows = page.data;
                self.count = page.count;
                self.total_pages = page.total_pages;
                self.page = ticket.filters.page;
            }
            Err(e) => {
                self.error = Some(match e {
                    ClientError::Api { message, .. } => message,
                    _ => "Failed to fetch athletes".to_string(),
                });
            }
        }
        true
    }

    pub async fn fetch<B>(&mut self, backend: &B, page: u32) -> bool
    where
        B: DirectoryBackend + ?Sized,
    {
        let ticket = self.begin_fetch(page);
        let result = backend.search(ticket.filters()).await;
        self.finish_fetch(ticket, result)
    }

    /// Replace the filters and show their first page
    pub async fn set_filters<B>(&mut self, backend: &B, filters: SearchFilters) -> bool
    where
        B: DirectoryBackend + ?Sized,
    {
        self.filters = SearchFilters {
            page: 1,
            ..filters.normalized()
        };
        self.fetch(backend, 1).await
    }

    /// Change some filters in place; like any filter change this returns to page 1
    pub async fn edit_filters<B>(
        &mut self,
        backend: &B,
        edit: impl FnOnce(&mut SearchFilters),
    ) -> bool
    where
        B: DirectoryBackend + ?Sized,
    {
        let mut filters = self.filters.clone();
        edit(&mut filters);
        self.set_filters(backend, filters).await
    }

    pub async fn reset<B>(&mut self, backend: &B) -> bool
    where
        B: DirectoryBackend + ?Sized,
    {
        self.set_filters(backend, SearchFilters::default()).await
    }

    /// No-op on the last page
    pub async fn next_page<B>(&mut self, backend: &B) -> bool
    where
        B: DirectoryBackend + ?Sized,
    {
        if self.page >= self.total_pages {
            return false;
        }
        self.fetch(backend, self.page + 1).await
    }

    /// No-op on the first page
    pub async fn previous_page<B>(&mut self, backend: &B) -> bool
    where
        B: DirectoryBackend + ?Sized,
    {
        if self.page <= 1 {
            return false;
        }
        self.fetch(backend, self.page - 1).await
    }

    pub fn render(&self) -> String {
        let mut out = Vec::new();

        if let Some(error) = &self.error {
            out.push(format!("Error: {}", error));
        }

        if self.loading {
            out.push("Loading athletes...".to_string());
        } else if self.rows.is_empty() {
            out.push(EMPTY_STATE.to_string());
        } else {
            out.push(format!("Found {} athletes", self.count));
            out.extend(self.rows.iter().map(render::athlete_card));
            if self.total_pages > 1 {
                out.push(format!("Page {} of {}", self.page, self.total_pages));
            }
        }

        out.join("\n\n")
    }
}
