//! Dimuon pair trigger filter.
//!
//! This crate provides:
//! - CandidateQualityGate: single-candidate admissibility and corrected pt threshold
//! - PairCut: the ordered pair-level cut cascade
//! - PairEvaluator: combinatorial pairing over one event's candidates
//! - CandidateAccumulator: deduplicated, first-seen-ordered selection
//! - DimuonFilter and FilterPath for running filters on events
//!
//! ## Architecture
//! Each event is processed in stages:
//! 1. The filter looks up its candidate collection by tag
//! 2. PairEvaluator gates candidates and runs every pair through the cascade
//! 3. Accepted pairs feed the accumulator, which yields the FilterOutput
//! 4. The path publishes the output and stops on the first rejection
//!
//! The core never performs I/O and keeps no state between events, so one
//! filter can evaluate many events concurrently.
//!
//! ## Example Usage
//! ```ignore
//! use dimuon_filter::{DimuonFilter, FilterConfig, FilterPath};
//!
//! let config = FilterConfig::load(Path::new("jpsi.json"))?;
//! let path = FilterPath::new("HLT_DoubleMu3_JPsi")
//!     .add_filter(DimuonFilter::from_config("hltJpsiMuMuFilter", &config));
//!
//! let result = path.run(&event)?;
//! ```

pub mod accumulator;
pub mod config;
pub mod cuts;
pub mod decision;
pub mod dimuon;
pub mod error;
pub mod evaluator;
pub mod filter_path;
pub mod kinematics;
pub mod quality;
pub mod traits;

// Re-export main types
pub use accumulator::CandidateAccumulator;
pub use config::{ChargeMode, CutConfiguration, FilterConfig};
pub use cuts::{PairCut, PairResult};
pub use decision::{CutFlow, FilterOutput, PairRejection};
pub use dimuon::DimuonFilter;
pub use error::ConfigError;
pub use evaluator::PairEvaluator;
pub use filter_path::{FilterPath, FilterProduct, PathResult};
pub use quality::{CandidateQualityGate, GateRejection};
pub use traits::EventFilter;
