/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer.
use serde::Deserialize;

/// Number of hits requested per page
pub const PAGE_SIZE: u32 = 12;

/// A single image returned by the search API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageHit {
    /// Pixabay image ID
    pub id: u64,
    /// Medium-sized preview used for the gallery tile
    #[serde(rename = "webformatURL")]
    pub thumbnail_url: String,
    /// Large image shown in the viewer
    #[serde(rename = "largeImageURL")]
    pub full_image_url: String,
    /// Comma-separated tags (e.g. "cat, kitten, pet")
    #[serde(default)]
    pub tags: String,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    /// Number of hits reachable through the API for this query
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    pub hits: Vec<ImageHit>,
}

impl SearchResponse {
    /// Number of pages reachable for this query
    pub fn total_pages(&self) -> u64 {
        self.total_hits.div_ceil(u64::from(PAGE_SIZE))
    }

    /// A page is full when it carries exactly `PAGE_SIZE` hits
    pub fn is_full_page(&self) -> bool {
        self.hits.len() == PAGE_SIZE as usize
    }
}

/// The search the user is currently looking at.
///
/// Also used as the key of a fetch: a response is only applied while its
/// key still matches the latest observed search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    pub query: String,
    /// 1-based page number
    pub page: u32,
}

impl SearchState {
    /// Start a new search: set the query and go back to page 1
    pub fn submit(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Advance to the next page of the current query
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }
}
