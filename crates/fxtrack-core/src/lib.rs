//! Core types and shared infrastructure for the fxtrack preview service.
//!
//! This crate provides:
//! - The preview data model (`MetaTag`, `PreviewResult`) and the shared
//!   Open Graph / Twitter-card tag builders
//! - URL classification into furtrack resource kinds
//! - The Redis-backed job queue decoupling the gateway from workers
//! - The Redis-backed preview result store with a fixed 24h TTL

pub mod classify;
pub mod preview;
pub mod queue;
pub mod store;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// Public site base used for canonical URLs in OG tags.
pub const SITE_BASE_URL: &str = "https://furtrack.com";

/// Site name emitted in `og:site_name`.
pub const SITE_NAME: &str = "furtrack.com";

/// Twitter handle emitted in `twitter:site`.
pub const TWITTER_SITE: &str = "@furtrack";

pub use classify::{ClassifiedTarget, ClassifyError, ProfileSection, classify, normalize_path};
pub use preview::{CardType, MetaTag, PageMeta, PostDimensions, PreviewResult, PreviewStatus};
pub use queue::{Job, PreviewQueue, QueueError};
pub use store::{PreviewStore, StoreError, RESULT_TTL_SECS};
