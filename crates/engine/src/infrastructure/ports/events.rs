//! Event delivery port.

use nightfall_domain::DomainEvent;

/// Receives every domain event a session publishes, in order.
pub trait EventSubscriber: Send + Sync {
    fn on_event(&self, event: &DomainEvent);
}
