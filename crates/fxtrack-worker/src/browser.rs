//! Headless-browser extraction strategy.
//!
//! Instead of calling the data API, this strategy renders the real site in
//! headless Chromium and scrapes the meta tags the site's own frontend
//! emits. One browser process is shared for the worker's lifetime: launched
//! lazily on the first job, torn down by the idle hook once the queue
//! drains. Pages are per-job and isolated.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetBlockedUrLsParams;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::Mutex;

use fxtrack_core::{MetaTag, PreviewResult, normalize_path};

use crate::error::ResolveError;
use crate::resolve::Extractor;

/// Bound on navigation.
const NAV_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound on waiting for the page's ready signal.
const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll interval while waiting for the ready signal.
const READY_POLL: Duration = Duration::from_millis(500);

/// The tag whose appearance marks the page as fully rendered.
const READY_SELECTOR: &str = "meta[name='twitter:image']";

/// Request patterns to block: only document + script are needed to render
/// the meta tags.
const BLOCKED_URL_PATTERNS: &[&str] = &[
    "*.css", "*.png", "*.jpg", "*.jpeg", "*.gif", "*.webp", "*.svg", "*.ico", "*.woff",
    "*.woff2", "*.ttf", "*.otf", "*.mp4", "*.webm", "*.mp3",
];

/// Collects every `og:*` and `twitter:*` meta tag plus the document title
/// and description, serialized to JSON for transport out of the page.
const SCRAPE_JS: &str = r#"
(() => {
  const collect = (selector, attr) =>
    Array.from(document.querySelectorAll(selector)).map(el => ({
      key: el.getAttribute(attr) || '',
      value: el.getAttribute('content') || '',
    }));
  const desc = document.querySelector("meta[name='description']");
  return JSON.stringify({
    og: collect("meta[property^='og:']", 'property'),
    twitter: collect("meta[name^='twitter:']", 'name'),
    title: document.title || '',
    description: desc ? (desc.getAttribute('content') || '') : '',
  });
})()
"#;

#[derive(Debug, Deserialize)]
struct ScrapedPage {
    og: Vec<MetaTag>,
    twitter: Vec<MetaTag>,
    title: String,
    description: String,
}

/// Browser-scraping [`Extractor`].
pub struct BrowserExtractor {
    /// Site base the pages are rendered from.
    site_url: String,
    /// Lazily-launched shared browser. The lock is held only for launch,
    /// page creation, and shutdown — never across a navigation.
    browser: Mutex<Option<Browser>>,
}

impl BrowserExtractor {
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            browser: Mutex::new(None),
        }
    }

    /// Open a fresh page on the shared browser, launching it first if this
    /// is the first use.
    async fn new_page(&self) -> Result<chromiumoxide::Page, ResolveError> {
        let mut guard = self.browser.lock().await;
        if guard.is_none() {
            let config = BrowserConfig::builder()
                .build()
                .map_err(ResolveError::Browser)?;
            let (browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| ResolveError::Browser(e.to_string()))?;
            tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!(error = %e, "browser handler stopped");
                        break;
                    }
                }
            });
            tracing::info!("headless browser launched");
            *guard = Some(browser);
        }
        let browser = guard
            .as_ref()
            .ok_or_else(|| ResolveError::Browser("browser unavailable".to_string()))?;

        browser
            .new_page("about:blank")
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))
    }

    /// Render one path and scrape its meta tags.
    async fn scrape(&self, path: &str) -> Result<ScrapedPage, ResolveError> {
        let page = self.new_page().await?;
        let outcome = self.scrape_on(&page, path).await;
        page.close().await.ok();
        outcome
    }

    async fn scrape_on(
        &self,
        page: &chromiumoxide::Page,
        path: &str,
    ) -> Result<ScrapedPage, ResolveError> {
        page.execute(SetBlockedUrLsParams {
            urls: BLOCKED_URL_PATTERNS.iter().map(|p| p.to_string()).collect(),
        })
        .await
        .map_err(|e| ResolveError::Browser(e.to_string()))?;

        let url = format!("{}{path}", self.site_url);
        tokio::time::timeout(NAV_TIMEOUT, page.goto(url.as_str()))
            .await
            .map_err(|_| ResolveError::RenderTimeout(NAV_TIMEOUT.as_millis() as u64))?
            .map_err(|e| ResolveError::Browser(e.to_string()))?;

        // The site populates its meta tags from script; the twitter:image
        // tag is the last one written and doubles as the ready signal.
        let ready = tokio::time::timeout(READY_TIMEOUT, async {
            loop {
                if page.find_element(READY_SELECTOR).await.is_ok() {
                    return;
                }
                tokio::time::sleep(READY_POLL).await;
            }
        })
        .await;
        if ready.is_err() {
            return Err(ResolveError::RenderTimeout(READY_TIMEOUT.as_millis() as u64));
        }

        let raw: String = page
            .evaluate(SCRAPE_JS)
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?
            .into_value()
            .map_err(|e| ResolveError::Browser(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ResolveError::Browser(e.to_string()))
    }
}

/// Assemble a [`PreviewResult`] from scraped tags.
///
/// The scraped document title/description backfill missing `og:` tags;
/// a page that never produced a title is "no data".
fn result_from_scrape(path: &str, site_url: &str, scraped: ScrapedPage) -> Result<PreviewResult, ResolveError> {
    let mut metadata = scraped.og;
    let mut twitter = scraped.twitter;

    if !metadata.iter().any(|t| t.key == "og:title") {
        if scraped.title.is_empty() {
            return Err(ResolveError::NoData(format!("no tags rendered for {path}")));
        }
        metadata.insert(0, MetaTag::new("og:title", scraped.title.clone()));
    }
    if !metadata.iter().any(|t| t.key == "og:description") && !scraped.description.is_empty() {
        metadata.push(MetaTag::new("og:description", scraped.description.clone()));
    }
    if !twitter.iter().any(|t| t.key == "twitter:title") && !scraped.title.is_empty() {
        twitter.push(MetaTag::new("twitter:title", scraped.title));
    }

    let canonical_url = metadata
        .iter()
        .find(|t| t.key == "og:url")
        .map(|t| t.value.clone())
        .unwrap_or_else(|| format!("{site_url}{path}"));

    Ok(PreviewResult::ok(canonical_url, metadata, twitter))
}

#[async_trait]
impl Extractor for BrowserExtractor {
    async fn extract(&self, path: &str) -> Result<PreviewResult, ResolveError> {
        let path = normalize_path(path);
        let scraped = self.scrape(&path).await?;
        result_from_scrape(&path, &self.site_url, scraped)
    }

    /// Queue drained: shut the shared browser down until the next burst.
    async fn on_idle(&self) {
        let mut guard = self.browser.lock().await;
        if let Some(mut browser) = guard.take() {
            tracing::info!("queue drained, closing headless browser");
            browser.close().await.ok();
            browser.wait().await.ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraped(og: &[(&str, &str)], twitter: &[(&str, &str)]) -> ScrapedPage {
        ScrapedPage {
            og: og.iter().map(|(k, v)| MetaTag::new(*k, *v)).collect(),
            twitter: twitter.iter().map(|(k, v)| MetaTag::new(*k, *v)).collect(),
            title: "FurTrack".to_string(),
            description: "desc".to_string(),
        }
    }

    #[test]
    fn scraped_tags_become_a_result() {
        let page = scraped(
            &[
                ("og:title", "Fox (📸 @Jane)"),
                ("og:url", "https://furtrack.com/p/1"),
            ],
            &[("twitter:card", "summary_large_image")],
        );
        let result = result_from_scrape("/p/1", "https://www.furtrack.com", page).unwrap();
        assert!(result.is_ok());
        assert_eq!(result.canonical_url, "https://furtrack.com/p/1");
        assert!(result.metadata.iter().any(|t| t.key == "og:title"));
    }

    #[test]
    fn document_title_backfills_missing_og_title() {
        let page = scraped(&[], &[]);
        let result = result_from_scrape("/p/1", "https://www.furtrack.com", page).unwrap();
        assert!(
            result
                .metadata
                .iter()
                .any(|t| t.key == "og:title" && t.value == "FurTrack")
        );
        assert_eq!(result.canonical_url, "https://www.furtrack.com/p/1");
    }

    #[test]
    fn empty_page_is_no_data() {
        let page = ScrapedPage {
            og: vec![],
            twitter: vec![],
            title: String::new(),
            description: String::new(),
        };
        let outcome = result_from_scrape("/p/1", "https://www.furtrack.com", page);
        assert!(matches!(outcome, Err(ResolveError::NoData(_))));
    }

    #[tokio::test]
    #[ignore = "requires Chrome/Chromium installation"]
    async fn browser_launches_and_shuts_down() {
        let extractor = BrowserExtractor::new("https://www.furtrack.com");
        extractor.new_page().await.unwrap();
        extractor.on_idle().await;
        assert!(extractor.browser.lock().await.is_none());
    }
}
