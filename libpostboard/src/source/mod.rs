//! Where posts come from
//!
//! The store never talks HTTP itself; it asks a [`PostSource`] for up to
//! `limit` posts and commits whatever list comes back. [`http::HttpPostSource`]
//! is the real implementation, [`mock::MockSource`] is for tests and demos.
//!
//! ```no_run
//! use libpostboard::source::{PostSource, http::HttpPostSource};
//!
//! # async fn example() -> libpostboard::Result<()> {
//! let source = HttpPostSource::new("https://jsonplaceholder.typicode.com");
//! let posts = source.fetch_posts(3).await?;
//! println!("{} sent {} posts", source.name(), posts.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Post;

pub mod http;

// Available outside tests so integration tests and downstream crates can use it
pub mod mock;

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch up to `limit` posts, in the order the source returns them.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Network` if the request could not be made,
    /// `SourceError::Status` for a non-2xx response and `SourceError::Parse`
    /// if the body is not a JSON array of posts.
    async fn fetch_posts(&self, limit: u32) -> Result<Vec<Post>>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}
