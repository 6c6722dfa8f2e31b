/// Image downloads for the gallery and the viewer
///
/// Thumbnails are decoded and downscaled off the UI thread so a page of
/// large web-format JPEGs doesn't stall rendering. Full-size images are
/// handed to iced as encoded bytes.
use iced::widget::image::Handle;
use image::imageops::FilterType;
use reqwest::Client;

use crate::error::ApiError;

/// Download an image and return its raw bytes
async fn download(http: &Client, url: &str) -> Result<Vec<u8>, ApiError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            body: String::new(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

/// Fetch a thumbnail and shrink it to fit in a `size` x `size` box
pub async fn load_thumbnail(http: Client, url: String, size: u32) -> Result<Handle, ApiError> {
    let bytes = download(&http, &url).await?;

    // Spawn blocking because decoding and resizing are CPU-bound
    tokio::task::spawn_blocking(move || decode_thumbnail(&bytes, size)).await?
}

/// Fetch a full-size image for the viewer
pub async fn load_full_image(http: Client, url: String) -> Result<Handle, ApiError> {
    let bytes = download(&http, &url).await?;
    tracing::debug!(%url, bytes = bytes.len(), "loaded full image");
    Ok(Handle::from_bytes(bytes))
}

/// Decode encoded image bytes and resize to fit in a `size` x `size` box
pub fn decode_thumbnail(bytes: &[u8], size: u32) -> Result<Handle, ApiError> {
    let img = image::load_from_memory(bytes)?;

    let thumbnail = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Triangle)
    } else {
        img
    };

    let rgba = thumbnail.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}
