use goalwise_core::events::{DomainEvent, DomainEventSink};
use tokio::sync::broadcast;

/// Lightweight broadcast bus that fans domain events out to stream subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: DomainEvent) {
        tracing::debug!("Publishing {} for user {}", event.name(), event.user_id());
        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }
}

impl DomainEventSink for EventBus {
    fn emit(&self, event: DomainEvent) {
        self.publish(event);
    }
}
