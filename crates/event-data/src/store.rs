//! EventStore: an ordered batch of events loaded from disk.
//!
//! The store keeps events in file order. Evaluation order does not matter
//! to the filters, but reports and diffs are easier to read when they follow
//! the input.

use crate::error::{EventDataError, Result};
use crate::parser;
use crate::types::{Event, EventId};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Ordered collection of events.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Load and validate every event in a JSON-lines file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading events from {:?}", path);

        let events = parser::parse_events(path)?;
        let store = Self { events };
        store.validate()?;

        info!("Loaded {} events", store.len());
        Ok(store)
    }

    /// Append an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of candidates stored under `tag` across all events.
    ///
    /// Events without that collection contribute zero.
    pub fn candidate_count(&self, tag: &str) -> usize {
        self.events
            .iter()
            .filter_map(|e| e.get_by_label(tag).ok())
            .map(|c| c.len())
            .sum()
    }

    /// Check that no two events share an id.
    ///
    /// Candidate values are deliberately not checked here: NaN or negative
    /// hit counts are valid inputs and simply fail cuts downstream.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.events.len());
        for event in &self.events {
            if !seen.insert(event.id) {
                return Err(EventDataError::DuplicateEvent(event.id.to_string()));
            }
        }
        Ok(())
    }
}

impl From<Vec<Event>> for EventStore {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}
