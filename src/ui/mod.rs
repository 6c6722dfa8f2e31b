/// User interface components
///
/// - Search bar (searchbar.rs)
/// - Thumbnail grid and load-more button (gallery.rs)
/// - Loading spinner drawn on a canvas (loader.rs)
/// - Full-size image viewer (viewer.rs)
/// - Toast notifications (toast.rs)

pub mod gallery;
pub mod loader;
pub mod searchbar;
pub mod toast;
pub mod viewer;
