//! fxtrack gateway - the front door for link-preview requests.
//!
//! Accepts any furtrack path, submits a resolution job to the shared queue,
//! waits (bounded) for its completion, and renders a minimal HTML page
//! carrying the resolved Open Graph / Twitter-card tags plus a redirect to
//! the real site. Crawlers read the tags; humans get bounced onward.
//!
//! The gateway holds no resolution logic: classification, upstream calls,
//! and caching all live in the worker behind the queue, so either process
//! can scale or restart independently.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
