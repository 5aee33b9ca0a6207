//! Change notifications for the post store
//!
//! Every committed mutation, plus the start and failure of a refresh, is
//! published on an in-process broadcast channel. Subscribers are purely
//! observers (devtools, UI redraws, logs); the store never waits on them.
//!
//! ```
//! use libpostboard::events::{EventBus, StoreEvent};
//!
//! # async fn example() {
//! let bus = EventBus::new(16);
//! let mut receiver = bus.subscribe();
//!
//! bus.emit(StoreEvent::PostsReplaced { count: 3 });
//! assert!(matches!(receiver.recv().await, Ok(StoreEvent::PostsReplaced { count: 3 })));
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::PostId;

pub type EventReceiver = broadcast::Receiver<StoreEvent>;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// `capacity` is the per-subscriber buffer; lagging subscribers lose the
    /// oldest events first.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Never blocks. Dropped if nobody is subscribed.
    pub fn emit(&self, event: StoreEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A refresh was requested
    RefreshStarted { limit: u32 },

    /// The collection was replaced by a refresh result
    PostsReplaced { count: usize },

    /// A local post was prepended
    PostCreated { id: PostId },

    /// A refresh failed; the collection was left alone
    RefreshFailed { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_emission_and_subscription() {
        let bus = EventBus::new(10);
        let mut receiver = bus.subscribe();

        bus.emit(StoreEvent::RefreshStarted { limit: 3 });

        assert_eq!(
            receiver.recv().await.unwrap(),
            StoreEvent::RefreshStarted { limit: 3 }
        );
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(10);
        let mut receiver1 = bus.subscribe();
        let mut receiver2 = bus.subscribe();

        bus.emit(StoreEvent::PostCreated { id: PostId::Int(99) });

        let expected = StoreEvent::PostCreated { id: PostId::Int(99) };
        assert_eq!(receiver1.recv().await.unwrap(), expected);
        assert_eq!(receiver2.recv().await.unwrap(), expected);
    }

    #[test]
    fn test_no_subscribers() {
        let bus = EventBus::new(10);

        bus.emit(StoreEvent::PostsReplaced { count: 0 });

        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_count() {
        let bus = EventBus::default();
        let _r1 = bus.subscribe();
        let _r2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[test]
    fn test_event_serialization() {
        let event = StoreEvent::RefreshFailed {
            error: "Network error: connection refused".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"refresh_failed\""));
        assert!(json.contains("connection refused"));

        let back: StoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_post_created_serializes_id_bare() {
        let json = serde_json::to_value(StoreEvent::PostCreated { id: PostId::Int(5) }).unwrap();
        assert_eq!(json["type"], "post_created");
        assert_eq!(json["id"], 5);
    }
}
