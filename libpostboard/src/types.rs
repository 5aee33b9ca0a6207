//! Core types for Postboard

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identifier of a post
///
/// Remote sources hand out integers, callers creating posts locally may use
/// anything. Serializes as a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Int(i64),
    Text(String),
}

impl PostId {
    /// Fresh random identifier for a locally created post
    pub fn generate() -> Self {
        PostId::Text(Uuid::new_v4().to_string())
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        PostId::Int(id)
    }
}

impl From<i32> for PostId {
    fn from(id: i32) -> Self {
        PostId::Int(id.into())
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        PostId::Text(id.to_string())
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        PostId::Text(id)
    }
}

impl std::str::FromStr for PostId {
    type Err = std::convert::Infallible;

    /// Canonical integers become `Int`; anything that would not print back
    /// identically (`007`, `+7`) stays `Text`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => PostId::Int(n),
            _ => PostId::Text(s.to_string()),
        })
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostId::Int(n) => write!(f, "{}", n),
            PostId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single post record
///
/// `title` and `body` may be missing, `null` or empty; such posts are kept
/// but never count as valid. Any other fields the source sends (e.g.
/// `userId`) are carried along in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn new(id: impl Into<PostId>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            body: Some(body.into()),
            extra: Map::new(),
        }
    }

    /// A post with a generated id, for callers that have none
    pub fn local(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(PostId::generate(), title, body)
    }

    /// Both title and body present and non-empty
    pub fn is_valid(&self) -> bool {
        has_text(&self.title) && has_text(&self.body)
    }
}

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}
