//! Authenticated client for the solar data API.
//!
//! All endpoints are point lookups returning loosely-shaped JSON; every
//! field is modeled as optional and accessed defensively. A non-success
//! status is "no data" for the caller, never an error — missing posts and
//! deleted users are ordinary outcomes.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ResolveError;

/// Fixed browser user agent; the API rejects obviously non-browser callers.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:135.0) Gecko/20100101 Firefox/135.0";

/// Origin/referer expected by the API.
const SITE_ORIGIN: &str = "https://www.furtrack.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for `solar.furtrack.com`.
#[derive(Clone)]
pub struct SolarClient {
    http: reqwest::Client,
    base: String,
}

impl SolarClient {
    /// Build a client with the fixed header set and a bearer token.
    pub fn new(base: &str, token: &str) -> Result<Self, ResolveError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );
        headers.insert(header::REFERER, HeaderValue::from_static("https://www.furtrack.com/"));
        headers.insert(header::ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .use_rustls_tls()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// GET an endpoint, returning `None` on any non-success status.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>, ResolveError> {
        let url = format!("{}{endpoint}", self.base);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(endpoint, status = %status, "upstream returned non-success");
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    pub async fn post_view(&self, id: u64) -> Result<Option<PostView>, ResolveError> {
        self.get(&format!("/view/post/{id}")).await
    }

    pub async fn user(&self, username: &str) -> Result<Option<UserView>, ResolveError> {
        self.get(&format!("/get/u/{username}")).await
    }

    pub async fn album(
        &self,
        username: &str,
        album_id: &str,
    ) -> Result<Option<AlbumView>, ResolveError> {
        self.get(&format!("/view/album/{username}/{album_id}")).await
    }

    pub async fn index(&self, expression: &str) -> Result<Option<IndexView>, ResolveError> {
        self.get(&format!("/get/index/{expression}")).await
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Response shapes
// ═══════════════════════════════════════════════════════════════════════════

/// Tag namespace prefixes used by upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Character,
    Photographer,
    General,
}

/// A tag attached to a post.
///
/// `tagName` uses a `<namespace>:<name>` convention where `1:` marks a
/// character and `3:` a photographer; anything else, including an absent or
/// malformed name, is a general tag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTag {
    #[serde(default)]
    pub tag_name: Option<String>,
}

impl UpstreamTag {
    pub fn kind(&self) -> TagKind {
        match self.tag_name.as_deref() {
            Some(name) if name.starts_with("1:") => TagKind::Character,
            Some(name) if name.starts_with("3:") => TagKind::Photographer,
            _ => TagKind::General,
        }
    }

    /// Display name: the fragment after the last `:`, or the raw tag.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.tag_name.as_deref()?;
        Some(name.rsplit(':').next().unwrap_or(name))
    }
}

/// `GET /view/post/{id}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostView {
    #[serde(default)]
    pub post: Option<PostRecord>,
    #[serde(default)]
    pub tags: Vec<UpstreamTag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub post_id: Option<u64>,
    #[serde(default)]
    pub submit_user_id: Option<u64>,
    /// Content hash used to build stable image URLs.
    #[serde(default)]
    pub meta_fingerprint: Option<String>,
    #[serde(default)]
    pub meta_filetype: Option<String>,
    #[serde(default)]
    pub meta_width: Option<u64>,
    #[serde(default)]
    pub meta_height: Option<u64>,
}

/// `GET /get/u/{username}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserView {
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_icon: Option<String>,
}

/// `GET /view/album/{username}/{albumId}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumView {
    #[serde(default)]
    pub album: Option<AlbumRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    #[serde(default)]
    pub album_title: Option<String>,
}

/// `GET /get/index/{expression}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexView {
    #[serde(default)]
    pub tag: Option<UpstreamTag>,
    #[serde(default)]
    pub posts: Vec<IndexPost>,
}

/// A post summary inside a tag index listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPost {
    #[serde(default)]
    pub post_id: Option<u64>,
    #[serde(default)]
    pub submit_user_id: Option<u64>,
    #[serde(default)]
    pub meta_fingerprint: Option<String>,
    #[serde(default)]
    pub meta_filetype: Option<String>,
    /// Ranking field; the highest-scored post represents the index page.
    #[serde(default)]
    pub post_score: Option<f64>,
}
