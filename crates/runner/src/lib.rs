//! Runner crate for the dimuon trigger.
//!
//! This crate drives a trigger path over a batch of events and collects
//! the per-event outcomes together with a run summary.

pub mod runner;

pub use runner::{EventOutcome, RunReport, RunSummary, TriggerRunner};
