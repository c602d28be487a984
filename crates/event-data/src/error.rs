//! Error types for the event-data crate.
//!
//! Reading events from disk can fail in a handful of well-defined ways.
//! Retrieving a candidate collection from an event can fail in exactly one:
//! the collection is not there. Callers treat that as fatal for the event.

use thiserror::Error;

/// Errors that can occur while loading events or looking up collections
#[derive(Error, Debug)]
pub enum EventDataError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in an event file couldn't be parsed
    ///
    /// `line` is 1-based, matching what an editor shows.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The event does not hold a candidate collection under this tag
    #[error("No candidate collection '{tag}' in event {event}")]
    MissingCollection { tag: String, event: String },

    /// Two events in one store share the same (run, event) id
    #[error("Duplicate event id {0}")]
    DuplicateEvent(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EventDataError>;
