//! The table of random events that may fire when a new night begins.

use serde::{Deserialize, Serialize};

use super::stat::StatKind;
use crate::error::DomainError;

/// One row of the nightly event table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightlyEvent {
    pub stat: StatKind,
    pub delta: i64,
    /// Opaque display text handed to the host
    pub message: String,
}

impl NightlyEvent {
    pub fn new(stat: StatKind, delta: i64, message: impl Into<String>) -> Self {
        Self {
            stat,
            delta,
            message: message.into(),
        }
    }
}

/// Uniformly-sampled event table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NightlyEventTable(Vec<NightlyEvent>);

impl Default for NightlyEventTable {
    fn default() -> Self {
        Self(vec![
            NightlyEvent::new(StatKind::Influence, 1, "Your network grows stronger"),
            NightlyEvent::new(StatKind::Resources, 5_000, "Business ventures prove profitable"),
            NightlyEvent::new(StatKind::Contacts, 1, "New ally joins your circle"),
            NightlyEvent::new(StatKind::Humanity, -1, "The Beast stirs within"),
        ])
    }
}

impl NightlyEventTable {
    pub fn new(events: Vec<NightlyEvent>) -> Result<Self, DomainError> {
        if events.is_empty() {
            return Err(DomainError::validation("Nightly event table cannot be empty"));
        }
        Ok(Self(events))
    }

    pub fn events(&self) -> &[NightlyEvent] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NightlyEvent> {
        self.0.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_four_entries() {
        let table = NightlyEventTable::default();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(1).map(|e| e.delta), Some(5_000));
        assert_eq!(table.get(3).map(|e| e.stat), Some(StatKind::Humanity));
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(NightlyEventTable::new(Vec::new()).is_err());
    }
}
