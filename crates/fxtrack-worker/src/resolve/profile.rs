//! User profile preview synthesis.

use fxtrack_core::{CardType, PageMeta, PreviewResult, ProfileSection, preview};

use super::icon_url;
use crate::error::ResolveError;
use crate::upstream::UserView;

/// Build a profile preview.
///
/// `path` is the normalized request path and doubles as the canonical path,
/// so section-specific profile URLs keep their own canonical form.
pub fn build(
    username: &str,
    section: ProfileSection,
    path: &str,
    view: &UserView,
) -> Result<PreviewResult, ResolveError> {
    let user = view
        .user
        .as_ref()
        .ok_or_else(|| ResolveError::NoData(format!("user {username}")))?;

    // Prefer upstream's canonical casing of the name over the path fragment.
    let username = user.username.as_deref().unwrap_or(username);

    let title = format!("{username}'s profile");
    let description = format!(
        "Check out {username}'s {} gallery on Furtrack",
        section.as_str()
    );
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
