/// Pixabay search client
///
/// One `search` call fetches one page of hits. The client is cheap to
/// clone (reqwest shares its connection pool), so every background task
/// gets its own copy.
use reqwest::{Client, Request};

use crate::config::Settings;
use crate::error::ApiError;
use crate::state::data::{SearchResponse, SearchState, PAGE_SIZE};

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SearchClient {
    /// Build a client from the resolved settings
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(concat!("image-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Underlying HTTP client, shared with image downloads
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Build the search request for one page without sending it
    pub fn build_request(&self, key: &SearchState) -> Result<Request, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        let page = key.page.to_string();
        let per_page = PAGE_SIZE.to_string();

        let request = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", key.query.as_str()),
                ("page", page.as_str()),
                ("key", self.api_key.as_str()),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("per_page", per_page.as_str()),
            ])
            .build()?;

        Ok(request)
    }

    /// Fetch page `key.page` of `key.query`
    pub async fn search(self, key: SearchState) -> Result<SearchResponse, ApiError> {
        let request = self.build_request(&key)?;

        tracing::info!(query = %key.query, page = key.page, "searching");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}
