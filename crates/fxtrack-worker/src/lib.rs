//! fxtrack worker - the link-preview resolution engine.
//!
//! Consumes jobs from the shared Redis queue, resolves each request path to
//! Open Graph / Twitter-card metadata, and caches successful results for
//! 24 hours. Two interchangeable extraction strategies:
//!
//! - **api** (default): classify the path, fetch structured data from the
//!   solar API, synthesize the tags ([`resolve::ApiExtractor`])
//! - **browser**: render the real site headlessly and scrape the tags its
//!   frontend emits ([`browser::BrowserExtractor`])
//!
//! Scale-out is process-level: any number of workers can share one queue.

pub mod browser;
pub mod config;
pub mod engine;
pub mod error;
pub mod resolve;
pub mod upstream;

pub use config::{Config, Strategy};
pub use engine::Engine;
pub use error::ResolveError;
