//! Metadata resolution strategies.
//!
//! [`Extractor`] is the seam between the engine and the two extraction
//! strategies: [`ApiExtractor`] (classify the path, fetch structured data
//! from solar, synthesize tags) and the browser-scraping fallback in
//! [`crate::browser`]. Each resource kind gets its own synthesis module;
//! the synthesis functions are pure so every title/description/image rule
//! is testable without I/O.

pub mod album;
pub mod index;
pub mod post;
pub mod profile;

use async_trait::async_trait;
use fxtrack_core::{ClassifiedTarget, PreviewResult, classify};

use crate::error::ResolveError;
use crate::upstream::SolarClient;

/// Image host for gallery content.
const GALLERY_BASE: &str = "https://orca2.furtrack.com";

/// Image host for user icons.
const ICON_BASE: &str = "https://orca.furtrack.com";

/// Gallery image URL for a post.
pub(crate) fn gallery_image_url(
    submit_user_id: u64,
    post_id: u64,
    fingerprint: &str,
    filetype: &str,
) -> String {
    format!("{GALLERY_BASE}/gallery/{submit_user_id}/{post_id}-{fingerprint}.{filetype}")
}

/// Thumbnail URL for a video post; thumbnails are always jpg.
pub(crate) fn video_thumb_url(submit_user_id: u64, post_id: u64, fingerprint: &str) -> String {
    format!("{GALLERY_BASE}/thumb/{submit_user_id}/{post_id}-{fingerprint}.jpg")
}

/// Icon URL for a user's avatar.
pub(crate) fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE}/icons/{icon}.jpg")
}

/// A whole-pipeline extraction strategy: path in, preview out.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Resolve a normalized path into a preview.
    async fn extract(&self, path: &str) -> Result<PreviewResult, ResolveError>;

    /// Called when the queue reports no pending work; a chance to release
    /// idle resources. Default: nothing to release.
    async fn on_idle(&self) {}
}

/// Structured-API strategy: classifier + solar client + per-kind synthesis.
pub struct ApiExtractor {
    client: SolarClient,
}

impl ApiExtractor {
    pub fn new(client: SolarClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for ApiExtractor {
    async fn extract(&self, path: &str) -> Result<PreviewResult, ResolveError> {
        match classify(path)? {
            ClassifiedTarget::Post { id, video } => {
                let view = self
                    .client
                    .post_view(id)
                    .await?
                    .ok_or_else(|| ResolveError::NoData(format!("post {id}")))?;
                post::build(id, video, &view)
            }
            ClassifiedTarget::UserProfile { username, section } => {
                let view = self
                    .client
                    .user(&username)
                    .await?
                    .ok_or_else(|| ResolveError::NoData(format!("user {username}")))?;
                profile::build(&username, section, path, &view)
            }
            ClassifiedTarget::Album { username, album_id } => {
                // Two sequential lookups; either missing fails the whole
                // resolution.
                let user = self
                    .client
                    .user(&username)
                    .await?
                    .ok_or_else(|| ResolveError::NoData(format!("user {username}")))?;
                let album = self
                    .client
                    .album(&username, &album_id)
                    .await?
                    .ok_or_else(|| {
                        ResolveError::NoData(format!("album {username}/{album_id}"))
                    })?;
                album::build(&username, path, &user, &album)
            }
            ClassifiedTarget::TagIndex { expression } => {
                let view = self
                    .client
                    .index(&expression)
                    .await?
                    .ok_or_else(|| ResolveError::NoData(format!("index {expression}")))?;
                index::build(&expression, &view)
            }
        }
    }
}

/// Capitalize the first character, the way character names are displayed.
pub(crate) fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("fox"), "Fox");
        assert_eq!(capitalize("Fox"), "Fox");
        assert_eq!(capitalize("f"), "F");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn gallery_url_template() {
        assert_eq!(
            gallery_image_url(1, 12345, "abc", "jpg"),
            "https://orca2.furtrack.com/gallery/1/12345-abc.jpg"
        );
    }

    #[test]
    fn video_thumb_is_always_jpg() {
        assert_eq!(
            video_thumb_url(1, 12345, "abc"),
            "https://orca2.furtrack.com/thumb/1/12345-abc.jpg"
        );
    }

    #[test]
    fn icon_url_template() {
        assert_eq!(icon_url("xyz"), "https://orca.furtrack.com/icons/xyz.jpg");
    }
}
