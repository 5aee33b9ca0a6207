//! Scriptable in-process post source
//!
//! Returns a canned list (truncated to the requested limit, like the real
//! endpoint) or a canned error, optionally after a delay. Calls are recorded
//! so tests can check what the store asked for.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{Result, SourceError};
use crate::source::PostSource;
use crate::types::Post;

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub name: String,

    /// Posts handed out on success
    pub posts: Vec<Post>,

    /// When set, every fetch fails with this error
    pub error: Option<SourceError>,

    /// Simulated network latency
    pub delay: Duration,

    /// Limits passed to `fetch_posts`, in call order
    pub requested_limits: Arc<Mutex<Vec<u32>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            posts: Vec::new(),
            error: None,
            delay: Duration::from_millis(0),
            requested_limits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

pub struct MockSource {
    config: MockConfig,
}

impl MockSource {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self::new(MockConfig {
            posts,
            ..Default::default()
        })
    }

    pub fn failing(error: SourceError) -> Self {
        Self::new(MockConfig {
            error: Some(error),
            ..Default::default()
        })
    }

    pub fn delayed(posts: Vec<Post>, delay: Duration) -> Self {
        Self::new(MockConfig {
            posts,
            delay,
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.requested_limits().len()
    }

    pub fn requested_limits(&self) -> Vec<u32> {
        self.config
            .requested_limits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl PostSource for MockSource {
    async fn fetch_posts(&self, limit: u32) -> Result<Vec<Post>> {
        self.config
            .requested_limits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(limit);

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if let Some(error) = &self.config.error {
            return Err(error.clone().into());
        }

        Ok(self
            .config
            .posts
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}
