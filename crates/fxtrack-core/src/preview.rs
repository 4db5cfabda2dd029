//! Preview data model and the shared meta-tag builders.
//!
//! Every resolver produces its tags through [`og_tags`] and [`twitter_tags`]
//! so that all resource kinds share one tag ordering, one site name, and one
//! canonical-URL template. The ordering is functionally irrelevant to link
//! unfurlers but must stay stable: cached results are compared structurally
//! in tests and re-served verbatim.

use serde::{Deserialize, Serialize};

use crate::{SITE_BASE_URL, SITE_NAME, TWITTER_SITE};

/// A single meta tag.
///
/// `key` is an Open Graph `property` when the tag lives in
/// [`PreviewResult::metadata`] and a Twitter-card `name` when it lives in
/// [`PreviewResult::twitter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub key: String,
    pub value: String,
}

impl MetaTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Terminal status of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStatus {
    Ok,
    Error,
}

/// The resolved preview for one request path.
///
/// Invariant: when `status` is [`PreviewStatus::Ok`], `metadata` is non-empty
/// and contains an `og:title` tag. Error results are never written to the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResult {
    /// Absolute canonical URL of the previewed resource.
    pub canonical_url: String,
    /// Open Graph tags, in builder order.
    pub metadata: Vec<MetaTag>,
    /// Twitter-card tags, in builder order.
    pub twitter: Vec<MetaTag>,
    pub status: PreviewStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl PreviewResult {
    /// Build a successful result from pre-built tag sequences.
    pub fn ok(canonical_url: String, metadata: Vec<MetaTag>, twitter: Vec<MetaTag>) -> Self {
        Self {
            canonical_url,
            metadata,
            twitter,
            status: PreviewStatus::Ok,
            message: None,
        }
    }

    /// Build a failed result carrying only a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            canonical_url: String::new(),
            metadata: Vec::new(),
            twitter: Vec::new(),
            status: PreviewStatus::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == PreviewStatus::Ok
    }
}

/// Twitter card flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Summary,
    SummaryLargeImage,
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::SummaryLargeImage => "summary_large_image",
        }
    }
}

/// Pixel dimensions copied verbatim from upstream post metadata.
///
/// Values are strings because upstream may omit them; an absent dimension is
/// rendered as an empty tag value rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDimensions {
    pub width: String,
    pub height: String,
}

/// Input to the shared tag builders.
#[derive(Debug, Clone)]
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Absolute image URL, when the resource has one.
    pub image: Option<&'a str>,
    /// Site-relative canonical path (leading slash).
    pub canonical_path: &'a str,
    pub card: CardType,
    /// Present only for post previews.
    pub dimensions: Option<&'a PostDimensions>,
}

impl PageMeta<'_> {
    /// The absolute canonical URL for this page.
    pub fn canonical_url(&self) -> String {
        format!("{SITE_BASE_URL}{}", self.canonical_path)
    }
}

/// Build the Open Graph tag sequence for a page.
///
/// Order: title, description, image (if any), type, site_name, url,
/// image dimensions (posts only).
pub fn og_tags(meta: &PageMeta<'_>) -> Vec<MetaTag> {
    let mut tags = vec![
        MetaTag::new("og:title", meta.title),
        MetaTag::new("og:description", meta.description),
    ];
    if let Some(image) = meta.image {
        tags.push(MetaTag::new("og:image", image));
    }
    tags.push(MetaTag::new("og:type", "website"));
    tags.push(MetaTag::new("og:site_name", SITE_NAME));
    tags.push(MetaTag::new("og:url", meta.canonical_url()));
    if let Some(dims) = meta.dimensions {
        tags.push(MetaTag::new("og:image:width", dims.width.as_str()));
        tags.push(MetaTag::new("og:image:height", dims.height.as_str()));
    }
    tags
}

/// Build the Twitter-card tag sequence for a page.
///
/// Order: card, title, description, image (if any), site.
pub fn twitter_tags(meta: &PageMeta<'_>) -> Vec<MetaTag> {
    let mut tags = vec![
        MetaTag::new("twitter:card", meta.card.as_str()),
        MetaTag::new("twitter:title", meta.title),
        MetaTag::new("twitter:description", meta.description),
    ];
    if let Some(image) = meta.image {
        tags.push(MetaTag::new("twitter:image", image));
    }
    tags.push(MetaTag::new("twitter:site", TWITTER_SITE));
    tags
}

/// Build a complete successful [`PreviewResult`] from one [`PageMeta`].
pub fn build_result(meta: &PageMeta<'_>) -> PreviewResult {
    PreviewResult::ok(meta.canonical_url(), og_tags(meta), twitter_tags(meta))
}
