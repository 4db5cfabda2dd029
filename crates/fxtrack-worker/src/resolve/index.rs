//! Tag index preview synthesis.
//!
//! A tag page with zero posts is still a valid page; it just carries no
//! preview image. When upstream returns tag metadata the display name comes
//! from it, otherwise the literal (possibly `+`-joined) expression stands in.

use fxtrack_core::{CardType, PageMeta, PreviewResult, preview};

use super::gallery_image_url;
use crate::error::ResolveError;
use crate::upstream::IndexView;

/// Build a tag index preview.
pub fn build(expression: &str, view: &IndexView) -> Result<PreviewResult, ResolveError> {
    let display = view
        .tag
        .as_ref()
        .and_then(|t| t.display_name())
        .unwrap_or(expression);

    let title = format!("#{display}");
    let description = format!("Check out posts tagged #{display} on Furtrack");

    // The highest-scored post represents the page.
    let image = view
        .posts
        .iter()
        .max_by(|a, b| {
            a.post_score
                .unwrap_or(f64::MIN)
                .total_cmp(&b.post_score.unwrap_or(f64::MIN))
        })
        .and_then(|best| {
            match (
                best.submit_user_id,
                best.post_id,
                best.meta_fingerprint.as_deref(),
                best.meta_filetype.as_deref(),
            ) {
                (Some(user), Some(id), Some(fp), Some(ft)) => {
                    Some(gallery_image_url(user, id, fp, ft))
                }
                _ => None,
            }
        });

    let card = if image.is_some() {
        CardType::SummaryLargeImage
    } else {
        CardType::Summary
    };

    let canonical_path = format!("/index/{expression}");
    Ok(preview::build_result(&PageMeta {
        title: &title,
        description: &description,
        image: image.as_deref(),
        canonical_path: &canonical_path,
        card,
        dimensions: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{IndexPost, UpstreamTag};

    fn post(id: u64, score: Option<f64>) -> IndexPost {
        IndexPost {
            post_id: Some(id),
            submit_user_id: Some(7),
            meta_fingerprint: Some(format!("fp{id}")),
            meta_filetype: Some("jpg".to_string()),
            post_score: score,
        }
    }

    fn og<'a>(result: &'a PreviewResult, key: &str) -> Option<&'a str> {
        result
            .metadata
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    #[test]
    fn empty_listing_is_still_ok_without_image() {
        let result = build("fox", &IndexView::default()).unwrap();
        assert!(result.is_ok());
        assert!(og(&result, "og:image").is_none());
        assert_eq!(og(&result, "og:title"), Some("#fox"));
        assert!(
            result
                .twitter
                .iter()
                .any(|t| t.key == "twitter:card" && t.value == "summary")
        );
    }

    #[test]
    fn highest_scored_post_provides_the_image() {
        let view = IndexView {
            tag: None,
            posts: vec![post(1, Some(0.5)), post(2, Some(9.0)), post(3, None)],
        };
        let result = build("fox", &view).unwrap();
        assert_eq!(
            og(&result, "og:image"),
            Some("https://orca2.furtrack.com/gallery/7/2-fp2.jpg")
        );
    }

    #[test]
    fn tag_metadata_supplies_display_name() {
        let view = IndexView {
            tag: Some(UpstreamTag {
                tag_name: Some("1:fox".to_string()),
            }),
            posts: vec![],
        };
        let result = build("fox", &view).unwrap();
        assert_eq!(og(&result, "og:title"), Some("#fox"));
    }

    #[test]
    fn intersection_expression_falls_back_to_literal() {
        let result = build("fox+forest", &IndexView::default()).unwrap();
        assert_eq!(og(&result, "og:title"), Some("#fox+forest"));
        assert_eq!(
            og(&result, "og:url"),
            Some("https://furtrack.com/index/fox+forest")
        );
    }

    #[test]
    fn best_post_with_missing_fields_drops_the_image() {
        let mut broken = post(5, Some(10.0));
        broken.meta_fingerprint = None;
        let view = IndexView {
            tag: None,
            posts: vec![broken],
        };
        let result = build("fox", &view).unwrap();
        assert!(result.is_ok());
        assert!(og(&result, "og:image").is_none());
    }
}
