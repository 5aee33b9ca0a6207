//! Postboard - an in-memory post store fed from a REST endpoint
//!
//! The store holds one ordered collection of posts. It can be refreshed
//! wholesale from a remote source, grown locally by prepending posts, and
//! read through derived views (valid posts and their count).

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod source;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, PostboardError, Result, SourceError};
pub use store::PostStore;
pub use types::{Post, PostId};
