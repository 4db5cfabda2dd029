//! Post preview synthesis.
//!
//! Title framing depends on the tag partition: a post with exactly one
//! character tag is titled after the character with a photographer credit;
//! anything ambiguous falls back to photographer-only framing. Video posts
//! credit the photographer and use the fixed thumbnail template instead of
//! the gallery image.

use fxtrack_core::{CardType, PageMeta, PostDimensions, PreviewResult, preview};

use super::{capitalize, gallery_image_url, video_thumb_url};
use crate::error::ResolveError;
use crate::upstream::{PostView, TagKind};

/// Build a post preview from its classified id and upstream view.
pub fn build(id: u64, video: bool, view: &PostView) -> Result<PreviewResult, ResolveError> {
    let post = view
        .post
        .as_ref()
        .ok_or_else(|| ResolveError::NoData(format!("post {id}")))?;

    let characters: Vec<&str> = view
        .tags
        .iter()
        .filter(|t| t.kind() == TagKind::Character)
        .filter_map(|t| t.display_name())
        .collect();
    let photographer = view
        .tags
        .iter()
        .filter(|t| t.kind() == TagKind::Photographer)
        .filter_map(|t| t.display_name())
        .next();

    let title = title_for(video, &characters, photographer);

    let general: Vec<&str> = view
        .tags
        .iter()
        .filter(|t| t.kind() == TagKind::General)
        .filter_map(|t| t.display_name())
        .collect();
    let description = if general.is_empty() {
        String::new()
    } else {
        format!("#{}", general.join(" #"))
    };

    // Image needs the full ingredient set; a partial record degrades to a
    // text-only card instead of a broken URL.
    let post_id = post.post_id.unwrap_or(id);
    let image = match (
        post.submit_user_id,
        post.meta_fingerprint.as_deref(),
        post.meta_filetype.as_deref(),
    ) {
        (Some(user), Some(fp), _) if video => Some(video_thumb_url(user, post_id, fp)),
        (Some(user), Some(fp), Some(ft)) => Some(gallery_image_url(user, post_id, fp, ft)),
        _ => {
            tracing::warn!(post_id, "post record missing image fields");
            None
        }
    };

    let dimensions = PostDimensions {
        width: post.meta_width.map(|w| w.to_string()).unwrap_or_default(),
        height: post.meta_height.map(|h| h.to_string()).unwrap_or_default(),
    };

    let canonical_path = format!("/p/{id}");
    Ok(preview::build_result(&PageMeta {
        title: &title,
        description: &description,
        image: image.as_deref(),
        canonical_path: &canonical_path,
        card: CardType::SummaryLargeImage,
        dimensions: Some(&dimensions),
    }))
}

fn title_for(video: bool, characters: &[&str], photographer: Option<&str>) -> String {
    if video {
        return match photographer {
            Some(p) => format!("Video by {p}"),
            None => "Video on Furtrack".to_string(),
        };
    }
    if let [character] = characters {
        let name = capitalize(character);
        return match photographer {
            Some(p) => format!("{name} (📸 @{p})"),
            None => name,
        };
    }
    match photographer {
        Some(p) => format!("Photo by {p}"),
        None => "Photo on Furtrack".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{PostRecord, UpstreamTag};

    fn tag(name: &str) -> UpstreamTag {
        UpstreamTag {
            tag_name: Some(name.to_string()),
        }
    }

    fn view(tags: &[&str]) -> PostView {
        PostView {
            post: Some(PostRecord {
                post_id: Some(12345),
                submit_user_id: Some(1),
                meta_fingerprint: Some("abc".to_string()),
                meta_filetype: Some("jpg".to_string()),
                meta_width: Some(800),
                meta_height: Some(600),
            }),
            tags: tags.iter().map(|t| tag(t)).collect(),
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
    fn single_character_title_credits_photographer() {
        let result = build(12345, false, &view(&["1:fox", "3:Jane"])).unwrap();
        assert_eq!(og(&result, "og:title"), Some("Fox (📸 @Jane)"));
    }

    #[test]
    fn zero_characters_falls_back_to_photographer() {
        let result = build(12345, false, &view(&["3:Jane", "nature"])).unwrap();
        assert_eq!(og(&result, "og:title"), Some("Photo by Jane"));
    }

    #[test]
    fn multiple_characters_fall_back_to_photographer() {
        let result = build(12345, false, &view(&["1:Fox", "1:Wolf", "3:Jane"])).unwrap();
        assert_eq!(og(&result, "og:title"), Some("Photo by Jane"));
    }

    #[test]
    fn missing_photographer_degrades_without_credit() {
        let result = build(12345, false, &view(&["1:fox"])).unwrap();
        assert_eq!(og(&result, "og:title"), Some("Fox"));

        let result = build(12345, false, &view(&["nature"])).unwrap();
        assert_eq!(og(&result, "og:title"), Some("Photo on Furtrack"));
    }

    #[test]
    fn video_title_and_thumbnail() {
        let result = build(12345, true, &view(&["1:fox", "3:Jane"])).unwrap();
        assert_eq!(og(&result, "og:title"), Some("Video by Jane"));
        assert_eq!(
            og(&result, "og:image"),
            Some("https://orca2.furtrack.com/thumb/1/12345-abc.jpg")
        );
    }

    #[test]
    fn end_to_end_post_shape() {
        // The mocked upstream payload from the original service's contract.
        let json = r#"{
            "post": {
                "submitUserId": 1,
                "postId": 12345,
                "metaFingerprint": "abc",
                "metaFiletype": "jpg",
                "metaWidth": 800,
                "metaHeight": 600
            },
            "tags": [
                {"tagName": "1:Fox"},
                {"tagName": "3:Jane"},
                {"tagName": "nature"}
            ]
        }"#;
        let view: PostView = serde_json::from_str(json).unwrap();
        let result = build(12345, false, &view).unwrap();

        assert!(result.is_ok());
        assert_eq!(og(&result, "og:title"), Some("Fox (📸 @Jane)"));
        assert_eq!(
            og(&result, "og:image"),
            Some("https://orca2.furtrack.com/gallery/1/12345-abc.jpg")
        );
        assert_eq!(og(&result, "og:description"), Some("#nature"));
        assert_eq!(og(&result, "og:url"), Some("https://furtrack.com/p/12345"));
        assert_eq!(og(&result, "og:image:width"), Some("800"));
        assert_eq!(og(&result, "og:image:height"), Some("600"));
    }

    #[test]
    fn general_tags_join_with_hashes() {
        let result = build(12345, false, &view(&["3:Jane", "nature", "2:con"])).unwrap();
        assert_eq!(og(&result, "og:description"), Some("#nature #con"));
    }

    #[test]
    fn missing_dimensions_become_empty_tag_values() {
        let mut v = view(&["3:Jane"]);
        let post = v.post.as_mut().unwrap();
        post.meta_width = None;
        post.meta_height = None;
        let result = build(12345, false, &v).unwrap();
        assert_eq!(og(&result, "og:image:width"), Some(""));
        assert_eq!(og(&result, "og:image:height"), Some(""));
    }

    #[test]
    fn missing_image_fields_drop_the_image() {
        let mut v = view(&["3:Jane"]);
        v.post.as_mut().unwrap().meta_fingerprint = None;
        let result = build(12345, false, &v).unwrap();
        assert!(result.is_ok());
        assert!(og(&result, "og:image").is_none());
    }

    #[test]
    fn missing_post_record_is_no_data() {
        let v = PostView::default();
        assert!(matches!(
            build(12345, false, &v),
            Err(ResolveError::NoData(_))
        ));
    }
}
