//! # Event Data Crate
//!
//! Types and I/O for reconstructed events fed to the trigger filters.
//!
//! ## Main Components
//!
//! - **types**: Candidate and event types (CandidateRecord, Vector3, Charge, Event)
//! - **parser**: Read and write JSON-lines event files
//! - **store**: EventStore, an ordered and validated batch of events
//! - **error**: Error types for loading and collection lookup
//!
//! ## Example Usage
//!
//! ```ignore
//! use event_data::EventStore;
//! use std::path::Path;
//!
//! let store = EventStore::load_from_file(Path::new("events.jsonl"))?;
//! for event in store.events() {
//!     let muons = event.get_by_label("hltL3MuonCandidates")?;
//!     println!("{}: {} candidates", event.id, muons.len());
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{EventDataError, Result};
pub use store::EventStore;
pub use types::{
    // Type aliases
    CandidateIndex,
    EventNumber,
    RunNumber,
    // Core types
    CandidateRecord,
    Charge,
    Event,
    EventId,
    Vector3,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn muon(pt: f64, charge: Charge) -> CandidateRecord {
        CandidateRecord {
            pt,
            eta: 0.0,
            phi: 0.0,
            charge,
            d0: 0.0,
            dz: 0.0,
            valid_hits: 10,
            curvature_error: 0.0,
            curvature: 0.0,
            momentum: Vector3::new(pt, 0.0, 0.0),
        }
    }

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventId::new(1, 100));
        assert!(event.tags().is_empty());
        assert_eq!(event.id.to_string(), "1:100");
    }

    #[test]
    fn test_get_by_label() {
        let event = Event::new(EventId::new(1, 1)).with_collection(
            "muons",
            vec![muon(10.0, Charge::Negative), muon(8.0, Charge::Positive)],
        );

        let muons = event.get_by_label("muons").unwrap();
        assert_eq!(muons.len(), 2);
        assert_eq!(muons[1].charge, Charge::Positive);
    }

    #[test]
    fn test_missing_collection_is_error() {
        let event = Event::new(EventId::new(3, 7));

        let err = event.get_by_label("muons").unwrap_err();
        match err {
            EventDataError::MissingCollection { tag, event } => {
                assert_eq!(tag, "muons");
                assert_eq!(event, "3:7");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_charge_values() {
        assert_eq!(Charge::Negative.value(), -1);
        assert_eq!(Charge::Neutral.value(), 0);
        assert_eq!(Charge::Positive.value(), 1);
        assert!(Charge::try_from(3).is_err());
    }

    #[test]
    fn test_vector3() {
        let v = Vector3::new(3.0, 4.0, 12.0);
        assert_eq!(v.mag2(), 169.0);
        assert_eq!(v.perp(), 5.0);
    }
}
