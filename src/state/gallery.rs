/// Gallery fetch and pagination state machine
///
/// The gallery watches the root's `SearchState`. Every change of
/// `(query, page)` yields exactly one fetch; the response either replaces
/// the image list (new query, or page 1) or is appended to it (next page).
use super::data::{ImageHit, SearchResponse, SearchState};
use super::notice::Notice;
use crate::error::ApiError;

pub const MSG_NO_RESULTS: &str = "No results were found for your request";
pub const MSG_FAILED: &str = "Sorry, something went wrong. Please, try again";
pub const MSG_END_OF_RESULTS: &str = "You reached end of results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing to show (initial state, empty result, or failure)
    #[default]
    Idle,
    /// Images are displayed
    Success,
}

/// The fetch the gallery is waiting on
#[derive(Debug, Clone, PartialEq)]
struct Pending {
    key: SearchState,
    replace: bool,
}

#[derive(Debug, Default)]
pub struct Gallery {
    status: Status,
    images: Vec<ImageHit>,
    is_loading: bool,
    has_more: bool,
    /// Last search state seen by `observe`
    observed: Option<SearchState>,
    pending: Option<Pending>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn images(&self) -> &[ImageHit] {
        &self.images
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn find(&self, id: u64) -> Option<&ImageHit> {
        self.images.iter().find(|image| image.id == id)
    }

    /// React to the root's search state.
    ///
    /// Returns the key to fetch when `(query, page)` changed since the last
    /// call, `None` otherwise. An empty query never triggers a fetch.
    pub fn observe(&mut self, search: &SearchState) -> Option<SearchState> {
        if self.observed.as_ref() == Some(search) {
            return None;
        }

        let replace = match &self.observed {
            Some(previous) => previous.query != search.query || search.page <= 1,
            None => true,
        };
        self.observed = Some(search.clone());

        if search.query.is_empty() {
            return None;
        }

        tracing::debug!(query = %search.query, page = search.page, replace, "fetch requested");

        self.is_loading = true;
        self.pending = Some(Pending {
            key: search.clone(),
            replace,
        });

        Some(search.clone())
    }

    /// Apply the outcome of a fetch and return the notices to show.
    ///
    /// Responses for anything but the latest requested key are dropped.
    pub fn apply(
        &mut self,
        key: &SearchState,
        result: Result<SearchResponse, ApiError>,
    ) -> Vec<Notice> {
        let pending = match self.pending.take() {
            Some(pending) if pending.key == *key => pending,
            other => {
                tracing::debug!(query = %key.query, page = key.page, "dropping stale response");
                self.pending = other;
                return Vec::new();
            }
        };

        self.is_loading = false;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, query = %key.query, page = key.page, "search failed");
                self.status = Status::Idle;
                return vec![Notice::error(MSG_FAILED)];
            }
        };

        if response.hits.is_empty() {
            tracing::info!(query = %key.query, page = key.page, "no results");
            self.status = Status::Idle;
            self.has_more = false;
            return vec![Notice::error(MSG_NO_RESULTS)];
        }

        let mut notices = Vec::new();
        self.has_more = response.is_full_page();

        if pending.replace {
            notices.push(Notice::success(format!(
                "We found {} images",
                response.total_hits
            )));
            self.status = Status::Success;
            self.images = response.hits.clone();
        } else {
            self.images.extend(response.hits.iter().cloned());
        }

        tracing::info!(
            query = %key.query,
            page = key.page,
            received = response.hits.len(),
            shown = self.images.len(),
            total = response.total_hits,
            "page applied"
        );

        if u64::from(key.page) == response.total_pages() && key.page > 1 {
            notices.push(Notice::info(MSG_END_OF_RESULTS));
        }

        notices
    }
}
