//! Core trait for event filters.
//!
//! This module defines the EventFilter trait that lets filters be chained
//! into a [`FilterPath`](crate::FilterPath).

use crate::decision::FilterOutput;
use anyhow::Result;
use event_data::Event;

/// Core trait for per-event trigger filters.
///
/// ## Design Note
/// - `Send + Sync` so one filter instance can serve events on many threads
/// - Filters borrow the event; they never take ownership of its collections
/// - An `Err` means the event could not be evaluated at all (for example a
///   missing input collection). A rejected event is `Ok` with `accept == false`.
pub trait EventFilter: Send + Sync {
    /// Module label of this filter (for logging and product identity)
    fn name(&self) -> &str;

    /// Evaluate one event.
    fn filter(&self, event: &Event) -> Result<FilterOutput>;
}
