//! In-process event bus
//!
//! Every published event goes to each registered subscriber, in registration
//! order, and is also queued in an outbox the host can drain at its own pace.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use nightfall_domain::DomainEvent;

use crate::infrastructure::ports::EventSubscriber;

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Arc<dyn EventSubscriber>>,
    outbox: VecDeque<DomainEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: DomainEvent) {
        for subscriber in &self.subscribers {
            subscriber.on_event(&event);
        }
        self.outbox.push_back(event);
    }

    /// Take every pending outbox event, oldest first.
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        self.outbox.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    /// Drop pending outbox events; subscribers stay registered.
    pub fn clear_outbox(&mut self) {
        self.outbox.clear();
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSubscriber;

impl EventSubscriber for TracingEventSubscriber {
    fn on_event(&self, event: &DomainEvent) {
        match event {
            DomainEvent::CompanionDeparted {
                companion_name,
                reason,
            } => {
                tracing::warn!(
                    companion = %companion_name,
                    reason = reason.as_str(),
                    "Companion left the coterie"
                );
            }
            DomainEvent::NightlyEventFired {
                day,
                stat,
                delta,
                message,
                ..
            } => {
                tracing::info!(day, stat = %stat, delta, "{}", message);
            }
            other => {
                tracing::info!(event_type = other.event_type(), event = ?other, "Domain event");
            }
        }
    }
}

/// Keeps a copy of every event it receives.
#[derive(Debug, Default)]
pub struct RecordingEventSubscriber {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn departures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DomainEvent::CompanionDeparted { companion_name, .. } => Some(companion_name),
                _ => None,
            })
            .collect()
    }
}

impl EventSubscriber for RecordingEventSubscriber {
    fn on_event(&self, event: &DomainEvent) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.clone());
    }
}
