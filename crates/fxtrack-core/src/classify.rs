//! Request-path classification into furtrack resource kinds.
//!
//! The rules form a closed, order-sensitive chain: album before profile,
//! profile before tag index, tag index before numeric post id. Upload paths
//! are rewritten to their photography equivalent before anything else so
//! that both spellings of the same resource share one cache entry.

use thiserror::Error;

/// File extensions that mark a path as a static asset, not a resource.
const ASSET_EXTENSIONS: &[&str] = &[
    "ico",
    "png",
    "jpg",
    "jpeg",
    "gif",
    "svg",
    "css",
    "js",
    "txt",
    "webmanifest",
];

/// Classification failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The path is outside the supported prefix allow-list.
    #[error("not a supported path: {0}")]
    UnsupportedPrefix(String),

    /// The path has a supported prefix but no recognizable resource shape.
    #[error("unsupported path shape: {0}")]
    UnsupportedShape(String),
}

/// Gallery section of a user profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSection {
    Photography,
    Fursuiting,
    Favorites,
    None,
}

impl ProfileSection {
    /// Section name as used in the profile description sentence.
    ///
    /// `None` renders as an empty string, producing a grammatically degraded
    /// but valid sentence.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photography => "photography",
            Self::Fursuiting => "fursuiting",
            Self::Favorites => "favorites",
            Self::None => "",
        }
    }

    fn from_path(path: &str) -> Self {
        if path.contains("photography") {
            Self::Photography
        } else if path.contains("fursuiting") {
            Self::Fursuiting
        } else if path.contains("likes") {
            Self::Favorites
        } else {
            Self::None
        }
    }
}

/// A classified request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedTarget {
    /// A single post, addressed by numeric id.
    Post { id: u64, video: bool },
    /// A user's profile / gallery page.
    UserProfile {
        username: String,
        section: ProfileSection,
    },
    /// A user album; `album_id` is the trailing `-`-separated fragment.
    Album { username: String, album_id: String },
    /// A tag index page; `+` joins an intersection of tags.
    TagIndex { expression: String },
}

/// Rewrite upload paths to their canonical photography spelling.
///
/// Idempotent: the rewritten path contains no `/uploads/` segment.
pub fn normalize_path(path: &str) -> String {
    path.replace("/uploads/", "/photography/")
}

/// Last non-empty path segment, ignoring trailing slashes.
fn last_segment(path: &str) -> Option<&str> {
    path.split('/').rev().find(|s| !s.is_empty())
}

/// Username between `/user/` and the following slash.
fn username_of(path: &str) -> Option<&str> {
    let rest = path.split("/user/").nth(1)?;
    let name = rest.split('/').next().unwrap_or(rest);
    (!name.is_empty()).then_some(name)
}

fn looks_like_asset(path: &str) -> bool {
    let Some(tail) = last_segment(path) else {
        return false;
    };
    match tail.rsplit_once('.') {
        Some((_, ext)) => ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Classify a request path into a [`ClassifiedTarget`].
///
/// Applies [`normalize_path`] first; the caller should use the same
/// normalization for cache keys.
pub fn classify(path: &str) -> Result<ClassifiedTarget, ClassifyError> {
    let path = normalize_path(path);

    let allowed =
        path.starts_with("/p") || path.starts_with("/user") || path.starts_with("/index");
    if path == "/" || !allowed || looks_like_asset(&path) {
        return Err(ClassifyError::UnsupportedPrefix(path));
    }

    // Albums live under /user/ but take precedence over the profile rule.
    if path.contains("/user/") && path.contains("album") {
        let username = username_of(&path)
            .ok_or_else(|| ClassifyError::UnsupportedShape(path.clone()))?
            .to_string();
        let album_id = last_segment(&path)
            .and_then(|tail| tail.rsplit('-').next())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ClassifyError::UnsupportedShape(path.clone()))?
            .to_string();
        return Ok(ClassifiedTarget::Album { username, album_id });
    }

    if path.contains("/user/") {
        let username = username_of(&path)
            .ok_or_else(|| ClassifyError::UnsupportedShape(path.clone()))?
            .to_string();
        return Ok(ClassifiedTarget::UserProfile {
            username,
            section: ProfileSection::from_path(&path),
        });
    }

    if let Some(rest) = path.strip_prefix("/index/") {
        let expression = rest.trim_end_matches('/');
        if expression.is_empty() {
            return Err(ClassifyError::UnsupportedShape(path.clone()));
        }
        return Ok(ClassifiedTarget::TagIndex {
            expression: expression.to_string(),
        });
    }

    if let Some(id) = last_segment(&path).and_then(|tail| tail.parse::<u64>().ok()) {
        return Ok(ClassifiedTarget::Post {
            id,
            video: path.contains("/video/"),
        });
    }

    Err(ClassifyError::UnsupportedShape(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_path() {
        assert_eq!(
            classify("/p/12345"),
            Ok(ClassifiedTarget::Post {
                id: 12345,
                video: false
            })
        );
    }

    #[test]
    fn video_post_path() {
        assert_eq!(
            classify("/p/video/12345"),
            Ok(ClassifiedTarget::Post {
                id: 12345,
                video: true
            })
        );
    }

    #[test]
    fn trailing_slash_does_not_change_classification() {
        for path in ["/p/123", "/user/alice/photography", "/index/fox"] {
            let with_slash = format!("{path}/");
            assert_eq!(classify(path), classify(&with_slash), "path: {path}");
        }
    }

    #[test]
    fn uploads_rewrite_is_idempotent() {
        let once = normalize_path("/user/alice/uploads/987");
        let twice = normalize_path(&once);
        assert_eq!(once, "/user/alice/photography/987");
        assert_eq!(once, twice);
    }

    #[test]
    fn uploads_and_photography_classify_identically() {
        assert_eq!(
            classify("/user/alice/uploads/987"),
            classify("/user/alice/photography/987")
        );
    }

    #[test]
    fn profile_sections() {
        let section = |path: &str| match classify(path) {
            Ok(ClassifiedTarget::UserProfile { section, .. }) => section,
            other => panic!("expected profile for {path}, got {other:?}"),
        };
        assert_eq!(section("/user/alice/photography"), ProfileSection::Photography);
        assert_eq!(section("/user/alice/fursuiting"), ProfileSection::Fursuiting);
        assert_eq!(section("/user/alice/likes"), ProfileSection::Favorites);
        assert_eq!(section("/user/alice"), ProfileSection::None);
    }

    #[test]
    fn album_takes_precedence_over_profile() {
        assert_eq!(
            classify("/user/alice/album-Trip-42"),
            Ok(ClassifiedTarget::Album {
                username: "alice".to_string(),
                album_id: "42".to_string(),
            })
        );
    }

    #[test]
    fn numeric_tail_under_user_is_still_a_profile() {
        // Rule order: the /user/ rule fires before numeric-id detection.
        assert!(matches!(
            classify("/user/alice/photography/123"),
            Ok(ClassifiedTarget::UserProfile { .. })
        ));
    }

    #[test]
    fn tag_index_expression() {
        assert_eq!(
            classify("/index/fox+forest"),
            Ok(ClassifiedTarget::TagIndex {
                expression: "fox+forest".to_string()
            })
        );
    }

    #[test]
    fn empty_tag_index_is_rejected() {
        assert!(matches!(
            classify("/index/"),
            Err(ClassifyError::UnsupportedShape(_))
        ));
    }

    #[test]
    fn root_and_foreign_prefixes_are_rejected() {
        for path in ["/", "/about", "/static/app.js", "/favicon.ico"] {
            assert!(
                matches!(classify(path), Err(ClassifyError::UnsupportedPrefix(_))),
                "path: {path}"
            );
        }
    }

    #[test]
    fn asset_shaped_tail_is_rejected_even_under_allowed_prefix() {
        assert!(matches!(
            classify("/p/thumbnail.png"),
            Err(ClassifyError::UnsupportedPrefix(_))
        ));
    }

    #[test]
    fn non_numeric_tail_is_unsupported_shape() {
        assert!(matches!(
            classify("/p/not-a-number"),
            Err(ClassifyError::UnsupportedShape(_))
        ));
    }

    #[test]
    fn missing_username_is_unsupported_shape() {
        assert!(matches!(
            classify("/user/"),
            Err(ClassifyError::UnsupportedShape(_))
        ));
    }
}
