//! HTML rendering for gateway responses.
//!
//! All pages use [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic escaping of the tag values coming back from
//! the worker.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use fxtrack_core::PreviewResult;

/// Site theme color carried on every preview page.
const THEME_COLOR: &str = "#48166a";

/// Redirect script: crawlers read the meta tags, browsers move on to the
/// real page.
const REDIRECT_JS: &str = r#"
window.onload = function() {
    window.location.href = "https://furtrack.com" + window.location.pathname;
};
"#;

/// Inline CSS for the redirect stub.
const PAGE_CSS: &str = "body{font-family:sans-serif;text-align:center}";

/// Inline CSS for error pages.
const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#fafafa;color:#1a1a2e;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;line-height:1.5}
@media(prefers-color-scheme:dark){body{background:#0a0a0f;color:#e5e5e5}.error-page p{color:#a0a0a0}}
"#;

/// Render the preview/redirect page for a resolved result.
///
/// One `<meta property content>` per Open Graph tag and one
/// `<meta name content>` per Twitter tag, in the worker's order.
pub fn preview_page(result: &PreviewResult) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "FurTrack" }
                meta name="theme-color" content=(THEME_COLOR);
                @for tag in &result.metadata {
                    meta property=(tag.key) content=(tag.value);
                }
                @for tag in &result.twitter {
                    meta name=(tag.key) content=(tag.value);
                }
                script { (PreEscaped(REDIRECT_JS)) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                p { i { "Redirecting..." } }
            }
        }
    }
}

/// Render the root info page: an immediate refresh to the project page.
pub fn info_page(info_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta http-equiv="refresh" content=(format!("0; url={info_url}"));
                title { "FurTrack" }
            }
            body {
                p { "Redirecting..." }
            }
        }
    }
}

/// Render a minimal error page.
pub fn error_page(title: &str, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " — fxtrack" }
                meta name="robots" content="noindex";
                style { (PreEscaped(ERROR_CSS)) }
            }
            body {
                main class="error-page" {
                    h1 { (title) }
                    p { (message) }
                }
            }
        }
    }
}
