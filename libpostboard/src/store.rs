//! The post store
//!
//! Owns the single in-memory post collection. Writes happen only through
//! [`PostStore::refresh`] (after a successful fetch) and
//! [`PostStore::create_local`]; both funnel into one private `commit` that
//! applies a [`Mutation`] under the write lock, logs it and publishes a
//! [`StoreEvent`]. Everything else is a read.
//!
//! # Concurrent refreshes
//!
//! No lock is held while a fetch is in flight. Two overlapping refreshes
//! each commit their own result when they finish, so the one that completes
//! last wins regardless of which was started first.
//!
//! ```
//! use std::sync::Arc;
//! use libpostboard::{Post, PostStore};
//! use libpostboard::source::mock::MockSource;
//!
//! # async fn example() -> libpostboard::Result<()> {
//! let source = MockSource::with_posts(vec![
//!     Post::new(1, "A", ""),
//!     Post::new(2, "B", "x"),
//! ]);
//! let store = PostStore::new(Arc::new(source));
//!
//! store.refresh(3).await?;
//! store.create_local(Post::new(99, "New", "Hi"));
//!
//! assert_eq!(store.posts().len(), 3);
//! assert_eq!(store.count_valid_posts(), 2);
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::config::{Config, DEFAULT_LIMIT};
use crate::error::{PostboardError, Result};
use crate::events::{EventBus, EventReceiver, StoreEvent};
use crate::source::http::HttpPostSource;
use crate::source::PostSource;
use crate::types::Post;

/// The only two ways the collection can change
#[derive(Debug)]
enum Mutation {
    /// Wholesale replacement with a fetched list
    ReplacePosts(Vec<Post>),
    /// Insert at the front, no dedup
    PrependPost(Post),
}

#[derive(Clone)]
pub struct PostStore {
    posts: Arc<RwLock<Vec<Post>>>,
    source: Arc<dyn PostSource>,
    events: EventBus,
    default_limit: u32,
}

impl PostStore {
    /// Empty store backed by `source`, default limit 3
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        Self {
            posts: Arc::new(RwLock::new(Vec::new())),
            source,
            events: EventBus::default(),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Empty store fetching over HTTP from `config.source`
    ///
    /// # Errors
    ///
    /// Returns a config error if the configuration does not validate.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let source = HttpPostSource::new(&config.source.base_url);
        Ok(Self::new(Arc::new(source)).with_default_limit(config.source.default_limit))
    }

    /// A zero limit is ignored and the current default kept
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        if limit > 0 {
            self.default_limit = limit;
        }
        self
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    /// Replace the whole collection with up to `limit` posts from the source.
    ///
    /// Returns the number of posts now stored. On any error the collection
    /// is exactly what it was before the call.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero limit (no request is made), otherwise the
    /// source's error.
    pub async fn refresh(&self, limit: u32) -> Result<usize> {
        if limit == 0 {
            return Err(PostboardError::InvalidInput(
                "limit must be a positive integer".to_string(),
            ));
        }

        tracing::debug!(limit, source = self.source.name(), "refreshing posts");
        self.events.emit(StoreEvent::RefreshStarted { limit });

        match self.source.fetch_posts(limit).await {
            Ok(posts) => {
                let count = posts.len();
                self.commit(Mutation::ReplacePosts(posts));
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(limit, source = self.source.name(), error = %e, "refresh failed");
                self.events.emit(StoreEvent::RefreshFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// [`refresh`](Self::refresh) with the configured default limit
    pub async fn refresh_default(&self) -> Result<usize> {
        self.refresh(self.default_limit).await
    }

    /// Put `post` at the front of the collection. No I/O.
    pub fn create_local(&self, post: Post) {
        self.commit(Mutation::PrependPost(post));
    }

    /// Snapshot of the raw collection, invalid posts included
    pub fn posts(&self) -> Vec<Post> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Posts with both a title and a body, in stored order
    pub fn valid_posts(&self) -> Vec<Post> {
        valid_posts_of(&self.read())
    }

    pub fn count_valid_posts(&self) -> usize {
        count_valid_posts_of(&self.read())
    }

    /// Change-tracking hook; see [`StoreEvent`]
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    // The guarded Vec is only ever assigned or single-element inserted, so a
    // panic elsewhere cannot leave it half-written; recover from poisoning.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Post>> {
        self.posts.read().unwrap_or_else(PoisonError::into_inner)
    }

    // The event goes out while the write guard is held, so subscribers see
    // commits in the order they were applied.
    fn commit(&self, mutation: Mutation) {
        let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
        let event = match mutation {
            Mutation::ReplacePosts(fetched) => {
                *posts = fetched;
                tracing::debug!(count = posts.len(), "posts replaced");
                StoreEvent::PostsReplaced { count: posts.len() }
            }
            Mutation::PrependPost(post) => {
                let id = post.id.clone();
                posts.insert(0, post);
                tracing::debug!(%id, total = posts.len(), "local post created");
                StoreEvent::PostCreated { id }
            }
        };
        self.events.emit(event);
    }
}

/// The valid subsequence of `posts`, order preserved
pub fn valid_posts_of(posts: &[Post]) -> Vec<Post> {
    posts.iter().filter(|p| p.is_valid()).cloned().collect()
}

/// Always `valid_posts_of(posts).len()`
pub fn count_valid_posts_of(posts: &[Post]) -> usize {
    valid_posts_of(posts).len()
}
