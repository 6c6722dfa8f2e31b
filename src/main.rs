use iced::keyboard::{self, key, Key};
use iced::widget::{column, stack};
use iced::{Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod state;
mod ui;

use api::client::SearchClient;
use config::Settings;
use error::ApiError;
use state::data::{SearchResponse, SearchState};
use state::gallery::Gallery;
use state::notice::Notice;
use ui::gallery::Thumbnail;
use ui::loader::Spinner;
use ui::toast::Toasts;
use ui::viewer::Viewer;

/// Frame interval of the loading spinner
const SPINNER_FRAME: Duration = Duration::from_millis(30);

/// Main application state
struct ImageFinder {
    settings: Settings,
    client: SearchClient,
    /// Text currently typed in the search bar
    input: String,
    /// The search the gallery is showing: `{query, page}`
    search: SearchState,
    gallery: Gallery,
    thumbnails: HashMap<u64, Thumbnail>,
    spinner: Spinner,
    viewer: Option<Viewer>,
    toasts: Toasts,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User edited the search field
    QueryChanged(String),
    /// User pressed Enter or clicked "Search"
    SearchSubmitted,
    /// User clicked "Load more"
    LoadMore,
    /// A search page came back
    PageLoaded(SearchState, Result<SearchResponse, ApiError>),
    /// A gallery thumbnail finished downloading
    ThumbnailLoaded(u64, Result<iced::widget::image::Handle, ApiError>),
    /// User clicked a thumbnail
    OpenImage(u64),
    /// The full-size image for the viewer finished downloading
    FullImageLoaded(u64, Result<iced::widget::image::Handle, ApiError>),
    /// Escape or a click on the backdrop
    CloseViewer,
    /// A toast timed out or was clicked
    DismissToast(u64),
    /// Spinner animation frame
    Tick,
}

impl ImageFinder {
    /// Create a new instance of the application
    fn new(settings: Settings, client: SearchClient) -> (Self, Task<Message>) {
        let mut app = ImageFinder {
            settings,
            client,
            input: String::new(),
            search: SearchState::default(),
            gallery: Gallery::new(),
            thumbnails: HashMap::new(),
            spinner: Spinner::new(),
            viewer: None,
            toasts: Toasts::new(),
        };

        let task = if app.settings.api_key.is_empty() {
            tracing::warn!(
                "no API key configured; set {} or add api_key to {}",
                config::API_KEY_ENV,
                Settings::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.json".to_string())
            );
            app.notify(Notice::warning("No API key configured, searches will fail"))
        } else {
            Task::none()
        };

        tracing::info!("image finder initialized");

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                self.input = value;
                Task::none()
            }
            Message::SearchSubmitted => match ui::searchbar::normalize_query(&self.input) {
                Some(query) => {
                    tracing::info!(%query, "search submitted");
                    self.search.submit(query);
                    self.input.clear();
                    self.sync_gallery()
                }
                None => self.notify(Notice::warning("Please enter a search query")),
            },
            Message::LoadMore => {
                if self.gallery.is_loading() || !self.gallery.has_more() {
                    return Task::none();
                }
                self.search.next_page();
                self.sync_gallery()
            }
            Message::PageLoaded(key, result) => {
                let notices = self.gallery.apply(&key, result);

                // Drop thumbnails of images no longer shown (query replaced)
                let gallery = &self.gallery;
                self.thumbnails.retain(|id, _| gallery.find(*id).is_some());

                let mut tasks = vec![self.fetch_missing_thumbnails()];
                tasks.extend(notices.into_iter().map(|notice| self.notify(notice)));
                Task::batch(tasks)
            }
            Message::ThumbnailLoaded(id, result) => {
                if let Some(slot) = self.thumbnails.get_mut(&id) {
                    *slot = match result {
                        Ok(handle) => Thumbnail::Ready(handle),
                        Err(err) => {
                            tracing::warn!(id, error = %err, "thumbnail failed");
                            Thumbnail::Failed
                        }
                    };
                }
                Task::none()
            }
            Message::OpenImage(id) => {
                let Some(hit) = self.gallery.find(id) else {
                    return Task::none();
                };

                self.viewer = Some(Viewer::open(id, hit.tags.clone()));

                Task::perform(
                    api::images::load_full_image(
                        self.client.http().clone(),
                        hit.full_image_url.clone(),
                    ),
                    move |result| Message::FullImageLoaded(id, result),
                )
            }
            Message::FullImageLoaded(id, result) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    let handle = match result {
                        Ok(handle) => Some(handle),
                        Err(err) => {
                            tracing::warn!(id, error = %err, "full image failed");
                            None
                        }
                    };
                    viewer.loaded(id, handle);
                }
                Task::none()
            }
            Message::CloseViewer => {
                self.viewer = None;
                Task::none()
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
            Message::Tick => {
                self.spinner.tick();
                Task::none()
            }
        }
    }

    /// Let the gallery observe the current search and fetch if it changed
    fn sync_gallery(&mut self) -> Task<Message> {
        let Some(key) = self.gallery.observe(&self.search) else {
            return Task::none();
        };

        Task::perform(self.client.clone().search(key.clone()), move |result| {
            Message::PageLoaded(key.clone(), result)
        })
    }

    /// Start downloads for gallery images that have no thumbnail entry yet
    fn fetch_missing_thumbnails(&mut self) -> Task<Message> {
        let size = self.settings.thumbnail_size;
        let mut tasks = Vec::new();

        for hit in self.gallery.images() {
            if self.thumbnails.contains_key(&hit.id) {
                continue;
            }
            self.thumbnails.insert(hit.id, Thumbnail::Loading);

            let id = hit.id;
            tasks.push(Task::perform(
                api::images::load_thumbnail(
                    self.client.http().clone(),
                    hit.thumbnail_url.clone(),
                    size,
                ),
                move |result| Message::ThumbnailLoaded(id, result),
            ));
        }

        Task::batch(tasks)
    }

    /// Show a toast and schedule its dismissal
    fn notify(&mut self, notice: Notice) -> Task<Message> {
        let id = self.toasts.push(notice);
        let delay = self.settings.toast_duration();

        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                id
            },
            Message::DismissToast,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let base = column![
            ui::searchbar::view(&self.input),
            ui::gallery::view(&self.gallery, &self.thumbnails, &self.spinner),
        ];

        let mut layers = stack![base];

        if let Some(viewer) = &self.viewer {
            layers = layers.push(viewer.view());
        }

        if !self.toasts.is_empty() {
            layers = layers.push(self.toasts.view());
        }

        layers.into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();

        if self.gallery.is_loading() {
            subscriptions.push(iced::time::every(SPINNER_FRAME).map(|_| Message::Tick));
        }

        if self.viewer.is_some() {
            subscriptions.push(keyboard::on_key_press(|key, _modifiers| match key {
                Key::Named(key::Named::Escape) => Some(Message::CloseViewer),
                _ => None,
            }));
        }

        Subscription::batch(subscriptions)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("image_finder=info,wgpu=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn,iced_wgpu=warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    let settings = Settings::load();
    let client = match SearchClient::new(&settings) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "failed to create HTTP client");
            std::process::exit(1);
        }
    };

    iced::application("Image Finder", ImageFinder::update, ImageFinder::view)
        .subscription(ImageFinder::subscription)
        .theme(ImageFinder::theme)
        .window_size((1240.0, 860.0))
        .centered()
        .run_with(move || ImageFinder::new(settings, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ImageHit;
    use crate::state::gallery::Status;
    use crate::state::notice::Level;

    fn app() -> ImageFinder {
        let settings = Settings {
            api_key: "test-key".to_string(),
            ..Settings::default()
        };
        let client = SearchClient::new(&settings).unwrap();
        let (app, _) = ImageFinder::new(settings, client);
        app
    }

    fn response(start: u64, count: u64, total_hits: u64) -> SearchResponse {
        SearchResponse {
            total_hits,
            hits: (start..start + count)
                .map(|id| ImageHit {
                    id,
                    thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
                    full_image_url: format!("https://cdn.example/{id}_1280.jpg"),
                    tags: format!("tag{id}"),
                })
                .collect(),
        }
    }

    fn submit(app: &mut ImageFinder, query: &str) {
        let _ = app.update(Message::QueryChanged(query.to_string()));
        let _ = app.update(Message::SearchSubmitted);
    }

    #[test]
    fn test_missing_api_key_warns_on_start() {
        let settings = Settings::default();
        let client = SearchClient::new(&settings).unwrap();
        let (app, _) = ImageFinder::new(settings, client);

        assert_eq!(app.toasts.items().len(), 1);
        assert_eq!(app.toasts.items()[0].notice.level, Level::Warning);
    }

    #[test]
    fn test_submit_sets_query_and_resets_page() {
        let mut app = app();
        submit(&mut app, "  mountains ");
        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(1, 12, 40))));
        let _ = app.update(Message::LoadMore);
        assert_eq!(app.search.page, 2);

        submit(&mut app, "rivers");

        assert_eq!(app.search.query, "rivers");
        assert_eq!(app.search.page, 1);
        assert!(app.input.is_empty());
        assert!(app.gallery.is_loading());
    }

    #[test]
    fn test_blank_submit_only_warns() {
        let mut app = app();
        submit(&mut app, "   ");

        assert_eq!(app.search, SearchState::default());
        assert!(!app.gallery.is_loading());
        assert_eq!(app.toasts.items().len(), 1);
        assert_eq!(app.toasts.items()[0].notice.level, Level::Warning);
    }

    #[test]
    fn test_new_query_replaces_image_list() {
        let mut app = app();
        submit(&mut app, "cats");
        let cats = app.search.clone();
        let _ = app.update(Message::PageLoaded(cats, Ok(response(1, 12, 30))));
        assert_eq!(app.gallery.images().len(), 12);
        assert_eq!(app.thumbnails.len(), 12);

        submit(&mut app, "dogs");
        let dogs = app.search.clone();
        let _ = app.update(Message::PageLoaded(dogs, Ok(response(500, 3, 3))));

        assert_eq!(app.gallery.status(), Status::Success);
        let ids: Vec<u64> = app.gallery.images().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![500, 501, 502]);
        assert_eq!(app.thumbnails.len(), 3);
        assert!(app.thumbnails.contains_key(&500));
        assert!(!app.thumbnails.contains_key(&1));
    }

    #[test]
    fn test_load_more_appends_and_reports_end() {
        let mut app = app();
        submit(&mut app, "owls");
        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(1, 12, 20))));

        let _ = app.update(Message::LoadMore);
        assert!(app.gallery.is_loading());
        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(13, 8, 20))));

        assert_eq!(app.gallery.images().len(), 20);
        assert!(!app.gallery.has_more());
        assert!(app
            .toasts
            .items()
            .iter()
            .any(|t| t.notice.text == "You reached end of results"));
    }

    #[test]
    fn test_load_more_ignored_while_page_is_loading() {
        let mut app = app();
        submit(&mut app, "cats");
        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(1, 12, 100))));

        let _ = app.update(Message::LoadMore);
        let _ = app.update(Message::LoadMore);
        assert_eq!(app.search.page, 2);

        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(13, 12, 100))));

        let ids: Vec<u64> = app.gallery.images().iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=24).collect::<Vec<u64>>());
    }

    #[test]
    fn test_load_more_ignored_without_more_pages() {
        let mut app = app();
        submit(&mut app, "rare");
        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(1, 3, 3))));

        let _ = app.update(Message::LoadMore);

        assert_eq!(app.search.page, 1);
        assert!(!app.gallery.is_loading());
    }

    #[test]
    fn test_failed_fetch_shows_error_toast() {
        let mut app = app();
        submit(&mut app, "cats");
        let _ = app.update(Message::PageLoaded(
            app.search.clone(),
            Err(ApiError::MissingApiKey),
        ));

        assert!(!app.gallery.is_loading());
        assert_eq!(app.gallery.status(), Status::Idle);
        let last = app.toasts.items().last().unwrap();
        assert_eq!(last.notice.level, Level::Error);
    }

    #[test]
    fn test_thumbnail_for_unknown_image_is_ignored() {
        let mut app = app();
        let _ = app.update(Message::ThumbnailLoaded(42, Err(ApiError::MissingApiKey)));
        assert!(app.thumbnails.is_empty());
    }

    #[test]
    fn test_failed_thumbnail_is_marked() {
        let mut app = app();
        submit(&mut app, "cats");
        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(1, 2, 2))));

        let _ = app.update(Message::ThumbnailLoaded(1, Err(ApiError::MissingApiKey)));

        assert!(matches!(app.thumbnails.get(&1), Some(Thumbnail::Failed)));
        assert!(matches!(app.thumbnails.get(&2), Some(Thumbnail::Loading)));
    }

    #[test]
    fn test_open_and_close_viewer() {
        let mut app = app();
        submit(&mut app, "cats");
        let _ = app.update(Message::PageLoaded(app.search.clone(), Ok(response(1, 2, 2))));

        let _ = app.update(Message::OpenImage(2));
        let viewer = app.viewer.as_ref().unwrap();
        assert_eq!(viewer.image_id, 2);
        assert_eq!(viewer.tags, "tag2");

        let _ = app.update(Message::CloseViewer);
        assert!(app.viewer.is_none());
    }

    #[test]
    fn test_open_unknown_image_does_nothing() {
        let mut app = app();
        let _ = app.update(Message::OpenImage(99));
        assert!(app.viewer.is_none());
    }

    #[test]
    fn test_dismiss_toast() {
        let mut app = app();
        submit(&mut app, "");
        let id = app.toasts.items()[0].id;

        let _ = app.update(Message::DismissToast(id));

        assert!(app.toasts.is_empty());
    }
}
