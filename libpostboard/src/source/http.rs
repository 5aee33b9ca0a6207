//! REST source: `GET <base-url>/posts?_limit=<limit>`

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Result, SourceError};
use crate::source::PostSource;
use crate::types::Post;

pub struct HttpPostSource {
    client: Client,
    base_url: String,
}

impl HttpPostSource {
    /// `base_url` is the API root, e.g. `https://jsonplaceholder.typicode.com`.
    /// A trailing slash is ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn posts_url(&self, limit: u32) -> String {
        format!("{}/posts?_limit={}", self.base_url, limit)
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_posts(&self, limit: u32) -> Result<Vec<Post>> {
        let url = self.posts_url(limit);
        tracing::debug!(%url, "fetching posts");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            }
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(format!("reading body of {} failed: {}", url, e)))?;

        let posts = parse_posts(&bytes)?;
        tracing::debug!(%url, count = posts.len(), "fetched posts");
        Ok(posts)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Decode a response body that must be a JSON array of post objects
pub(crate) fn parse_posts(body: &[u8]) -> std::result::Result<Vec<Post>, SourceError> {
    serde_json::from_slice(body).map_err(|e| SourceError::Parse(e.to_string()))
}
