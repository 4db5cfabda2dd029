//! Album preview synthesis.
//!
//! Albums need two upstream records (owner, then album); a found owner with
//! a missing album is still "no data" for the whole resolution.

use fxtrack_core::{CardType, PageMeta, PreviewResult, preview};

use super::icon_url;
use crate::error::ResolveError;
use crate::upstream::{AlbumView, UserView};

/// Build an album preview from its owner and album views.
pub fn build(
    username: &str,
    path: &str,
    user_view: &UserView,
    album_view: &AlbumView,
) -> Result<PreviewResult, ResolveError> {
    let user = user_view
        .user
        .as_ref()
        .ok_or_else(|| ResolveError::NoData(format!("user {username}")))?;
    let album = album_view
        .album
        .as_ref()
        .ok_or_else(|| ResolveError::NoData(format!("album of {username}")))?;

    let username = user.username.as_deref().unwrap_or(username);
    let album_title = album.album_title.as_deref().unwrap_or("untitled");

    let title = format!("{username}'s {album_title} album");
    let description = format!("Check out {username}'s {album_title} album on Furtrack");
    let image = user.user_icon.as_deref().map(icon_url);

    Ok(preview::build_result(&PageMeta {
        title: &title,
        description: &description,
        image: image.as_deref(),
        canonical_path: path,
        card: CardType::Summary,
        dimensions: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{AlbumRecord, UserRecord};

    fn user_view() -> UserView {
        UserView {
            user: Some(UserRecord {
                username: Some("alice".to_string()),
                user_icon: Some("xyz".to_string()),
            }),
        }
    }

    fn album_view(title: Option<&str>) -> AlbumView {
        AlbumView {
            album: Some(AlbumRecord {
                album_title: title.map(String::from),
            }),
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
    fn album_title_and_description() {
        let result = build(
            "alice",
            "/user/alice/album-Trip-42",
            &user_view(),
            &album_view(Some("Trip")),
        )
        .unwrap();
        assert_eq!(og(&result, "og:title"), Some("alice's Trip album"));
        assert_eq!(
            og(&result, "og:description"),
            Some("Check out alice's Trip album on Furtrack")
        );
    }

    #[test]
    fn missing_album_record_is_no_data() {
        let outcome = build(
            "alice",
            "/user/alice/album-Trip-42",
            &user_view(),
            &AlbumView::default(),
        );
        assert!(matches!(outcome, Err(ResolveError::NoData(_))));
    }

    #[test]
    fn missing_album_title_degrades_to_untitled() {
        let result = build(
            "alice",
            "/user/alice/album-Trip-42",
            &user_view(),
            &album_view(None),
        )
        .unwrap();
        assert_eq!(og(&result, "og:title"), Some("alice's untitled album"));
    }
}
