//! Synchronous notifications from a [`Session`](crate::Session).

use std::fmt;

/// Which store finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Coder,
    Arbitrator,
}

/// Something views of the session may need to refresh for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An import or project load completed.
    DataLoaded { source: DataSource },
    /// A question was renamed across all stores.
    QuestionRenamed { old: String, new: String },
    /// Arbitration or annotations of one case changed.
    CaseChanged { case_id: String },
}

type Subscriber = Box<dyn FnMut(&SessionEvent)>;

/// Delivers events to every subscriber, in subscription order, before
/// `publish` returns.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for all future events.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Deliver an event.
    pub fn publish(&mut self, event: SessionEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// True when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
