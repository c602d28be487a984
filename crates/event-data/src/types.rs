//! Core domain types for reconstructed events.
//!
//! A candidate is a snapshot of one reconstructed track. An event owns any
//! number of candidate collections, each stored under an input tag.
//! Nothing in this module mutates a candidate after it has been built.

use crate::error::{EventDataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a candidate inside its collection.
///
/// Candidate identity is this index, never value equality: two candidates
/// with identical kinematics are still two different candidates.
pub type CandidateIndex = usize;

/// Run number as written by the data acquisition.
pub type RunNumber = u32;

/// Event number, unique within a run.
pub type EventNumber = u64;

// =============================================================================
// Candidate Types
// =============================================================================

/// Cartesian three-momentum in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude.
    pub fn mag2(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Transverse component (perpendicular to the beam axis).
    pub fn perp(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Build a momentum vector from (pt, eta, phi).
    pub fn from_pt_eta_phi(pt: f64, eta: f64, phi: f64) -> Self {
        Self {
            x: pt * phi.cos(),
            y: pt * phi.sin(),
            z: pt * eta.sinh(),
        }
    }
}

/// Electric charge of a candidate in units of e.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Charge {
    Negative,
    Neutral,
    Positive,
}

impl Charge {
    pub fn value(self) -> i32 {
        match self {
            Charge::Negative => -1,
            Charge::Neutral => 0,
            Charge::Positive => 1,
        }
    }
}

impl TryFrom<i8> for Charge {
    type Error = EventDataError;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(Charge::Negative),
            0 => Ok(Charge::Neutral),
            1 => Ok(Charge::Positive),
            _ => Err(EventDataError::InvalidValue {
                field: "charge".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

impl From<Charge> for i8 {
    fn from(charge: Charge) -> i8 {
        charge.value() as i8
    }
}

/// One reconstructed track-like candidate.
///
/// Field names follow the usual track parameterisation:
/// - `d0` / `dz`: transverse and longitudinal impact parameters
/// - `curvature`: first track parameter (q/p); only its magnitude is used
/// - `curvature_error`: uncertainty on that parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub charge: Charge,
    pub d0: f64,
    pub dz: f64,
    /// Signed on purpose: whatever reconstruction wrote is kept as-is.
    pub valid_hits: i32,
    pub curvature_error: f64,
    pub curvature: f64,
    pub momentum: Vector3,
}

// =============================================================================
// Event Types
// =============================================================================

/// (run, event) pair identifying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId {
    pub run: RunNumber,
    pub event: EventNumber,
}

impl EventId {
    pub const fn new(run: RunNumber, event: EventNumber) -> Self {
        Self { run, event }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.run, self.event)
    }
}

/// One event: candidate collections keyed by their input tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub(crate) collections: HashMap<String, Vec<CandidateRecord>>,
}

impl Event {
    /// Creates an event with no collections
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            collections: HashMap::new(),
        }
    }

    /// Store a collection under `tag`, replacing any previous one.
    pub fn insert_collection(&mut self, tag: impl Into<String>, candidates: Vec<CandidateRecord>) {
        self.collections.insert(tag.into(), candidates);
    }

    /// Builder-style variant of [`Event::insert_collection`].
    pub fn with_collection(mut self, tag: impl Into<String>, candidates: Vec<CandidateRecord>) -> Self {
        self.insert_collection(tag, candidates);
        self
    }

    /// Retrieve the candidate collection stored under `tag`.
    ///
    /// A missing collection is an error, not an empty slice: the caller
    /// asked for a product that was never produced.
    pub fn get_by_label(&self, tag: &str) -> Result<&[CandidateRecord]> {
        self.collections
            .get(tag)
            .map(|v| v.as_slice())
            .ok_or_else(|| EventDataError::MissingCollection {
                tag: tag.to_string(),
                event: self.id.to_string(),
            })
    }

    /// Tags of every collection held by this event, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.collections.keys().map(|k| k.as_str()).collect();
        tags.sort_unstable();
        tags
    }
}
