/// Remote image API module
///
/// This module handles:
/// - Searching Pixabay one page at a time (client.rs)
/// - Downloading thumbnails and full-size images (images.rs)

pub mod client;
pub mod images;
