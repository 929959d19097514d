// quicktools-core/src/event.rs
use crossbeam::channel::{Receiver, Sender, unbounded};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Event payload - can be any type
#[derive(Clone)]
pub struct EventPayload(Arc<dyn Any + Send + Sync>);

impl EventPayload {
    pub fn new<T: Any + Send + Sync>(data: T) -> Self {
        Self(Arc::new(data))
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::downcast(self.0.clone()).ok()
    }
}

/// Event with topic and payload
#[derive(Clone)]
pub struct BusEvent {
    pub topic: String,
    pub payload: EventPayload,
}

impl BusEvent {
    pub fn new<T: Any + Send + Sync>(topic: impl Into<String>, data: T) -> Self {
        Self {
            topic: topic.into(),
            payload: EventPayload::new(data),
        }
    }
}

/// Subscription handle - dropping this unsubscribes
pub struct Subscription {
    id: usize,
    bus: Arc<EventBusInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut subs) = self.bus.subscriptions.write() {
            subs.remove(&self.id);
        }
    }
}

struct EventBusInner {
    subscriptions: RwLock<HashMap<usize, (String, Sender<BusEvent>)>>,
    next_id: std::sync::atomic::AtomicUsize,
}

/// Topic-based pub/sub over crossbeam channels.
///
/// Patterns are either an exact topic ("tool.timer.finished") or a prefix
/// ending in ".*" ("tool.*"); the bare "*" matches everything.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EventBusInner {
                subscriptions: RwLock::new(HashMap::new()),
                next_id: std::sync::atomic::AtomicUsize::new(0),
            }),
        }
    }

    /// Publish an event to all matching subscribers
    pub fn publish(&self, event: BusEvent) {
        let Ok(subs) = self.inner.subscriptions.read() else {
            return;
        };

        for (pattern, tx) in subs.values() {
            if Self::topic_matches(&event.topic, pattern) {
                // Ignore send errors (subscriber dropped)
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Subscribe to a topic or "prefix.*" pattern.
    /// Returns (Subscription, Receiver) - drop Subscription to unsubscribe
    pub fn subscribe(&self, pattern: impl Into<String>) -> (Subscription, Receiver<BusEvent>) {
        let (tx, rx) = unbounded();
        let pattern = pattern.into();

        let id = self
            .inner
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if let Ok(mut subs) = self.inner.subscriptions.write() {
            subs.insert(id, (pattern, tx));
        }

        let sub = Subscription {
            id,
            bus: self.inner.clone(),
        };

        (sub, rx)
    }

    fn topic_matches(topic: &str, pattern: &str) -> bool {
        if pattern == "*" || topic == pattern {
            return true;
        }
        match pattern.strip_suffix(".*") {
            Some(prefix) => topic
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.')),
            None => false,
        }
    }
}

// Payloads consumed by the CLI status line

/// A countdown reached zero
#[derive(Debug, Clone)]
pub struct TimerFinished {
    pub tool: String,
}

/// A widget copied its output to the system clipboard
#[derive(Debug, Clone)]
pub struct ClipboardCopy {
    pub tool: String,
    pub bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_matching() {
        assert!(EventBus::topic_matches("tool.timer.finished", "tool.timer.finished"));
        assert!(EventBus::topic_matches("tool.timer.finished", "tool.*"));
        assert!(EventBus::topic_matches("tool.clipboard", "tool.*"));
        assert!(!EventBus::topic_matches("app.theme", "tool.*"));
        assert!(!EventBus::topic_matches("toolbox.clipboard", "tool.*"));
        assert!(EventBus::topic_matches("any.thing.here", "*"));
    }

    #[test]
    fn test_pubsub() {
        let bus = EventBus::new();
        let (_sub, rx) = bus.subscribe("tool.*");

        bus.publish(BusEvent::new(
            "tool.timer.finished",
            TimerFinished {
                tool: "Countdown Timer".to_string(),
            },
        ));

        let event = rx.recv().unwrap();
        assert_eq!(event.topic, "tool.timer.finished");

        let received: Arc<TimerFinished> = event.payload.downcast().unwrap();
        assert_eq!(received.tool, "Countdown Timer");
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let (sub, rx) = bus.subscribe("tool.clipboard");

        bus.publish(BusEvent::new(
            "tool.clipboard",
            ClipboardCopy {
                tool: "Password Generator".to_string(),
                bytes: 12,
            },
        ));
        assert!(rx.recv().is_ok());

        drop(sub); // Unsubscribe

        bus.publish(BusEvent::new(
            "tool.clipboard",
            ClipboardCopy {
                tool: "Password Generator".to_string(),
                bytes: 12,
            },
        ));
        assert!(rx.recv().is_err()); // Channel closed
    }
}
