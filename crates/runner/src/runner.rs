//! # Trigger Runner
//!
//! Drives one trigger path over a batch of events:
//! 1. Evaluate every event through the path, in parallel
//! 2. Keep the outcomes in input order
//! 3. Fold the outcomes into a run summary
//!
//! The path holds no per-event state, so a single instance is shared by all
//! worker threads.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use dimuon_filter::{CutFlow, FilterPath, PathResult};
use event_data::{Event, EventId};

/// The path decision for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventOutcome {
    pub id: EventId,
    pub result: PathResult,
}

impl EventOutcome {
    pub fn accept(&self) -> bool {
        self.result.accept
    }

    /// Candidate indices selected by the last filter that ran.
    pub fn selected(&self) -> &[usize] {
        self.result
            .products
            .last()
            .map(|p| p.output.selected.as_slice())
            .unwrap_or(&[])
    }
}

/// Totals over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub path: String,
    pub events: usize,
    pub accepted: usize,
    pub accept_fraction: f64,
    /// Accepted pairs summed over every filter that ran.
    pub accepted_pairs: usize,
    pub cut_flow: CutFlow,
}

impl RunSummary {
    /// Fold per-event outcomes into totals.
    pub fn from_outcomes(path: impl Into<String>, outcomes: &[EventOutcome]) -> Self {
        let mut summary = RunSummary {
            path: path.into(),
            events: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            if outcome.accept() {
                summary.accepted += 1;
            }
            for product in &outcome.result.products {
                summary.accepted_pairs += product.output.accepted_pairs;
                summary.cut_flow.merge(&product.output.cut_flow);
            }
        }

        summary.accept_fraction = if summary.events == 0 {
            0.0
        } else {
            summary.accepted as f64 / summary.events as f64
        };
        summary
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// One outcome per input event, in input order.
    pub outcomes: Vec<EventOutcome>,
    pub summary: RunSummary,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Runs a trigger path over batches of events.
#[derive(Clone)]
pub struct TriggerRunner {
    path: Arc<FilterPath>,
}

impl TriggerRunner {
    pub fn new(path: FilterPath) -> Self {
        Self {
            path: Arc::new(path),
        }
    }

    /// Share an already wrapped path with other runners.
    pub fn from_shared(path: Arc<FilterPath>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &FilterPath {
        &self.path
    }

    /// Evaluate every event through the path.
    ///
    /// # Returns
    /// * `Ok(RunReport)` - Outcomes in input order plus the run summary
    /// * `Err` - The first failure rayon observed, naming the event; a
    ///   missing candidate collection aborts the whole run
    pub fn run(&self, events: &[Event]) -> Result<RunReport> {
        let start_time = Instant::now();
        info!(
            "Running path {} over {} events",
            self.path.name(),
            events.len()
        );

        let outcomes: Vec<EventOutcome> = events
            .par_iter()
            .map(|event| self.run_event(event))
            .collect::<Result<_>>()?;

        let summary = RunSummary::from_outcomes(self.path.name(), &outcomes);
        let elapsed = start_time.elapsed();
        info!(
            "Path {}: accepted {}/{} events ({:.2}%), {} pairs, in {:.2?}",
            summary.path,
            summary.accepted,
            summary.events,
            summary.accept_fraction * 100.0,
            summary.accepted_pairs,
            elapsed
        );

        Ok(RunReport {
            outcomes,
            summary,
            elapsed,
        })
    }

    /// Evaluate a single event.
    pub fn run_event(&self, event: &Event) -> Result<EventOutcome> {
        let result = self
            .path
            .run(event)
            .with_context(|| format!("Path {} failed on event {}", self.path.name(), event.id))?;
        debug!("Event {}: accept = {}", event.id, result.accept);
        Ok(EventOutcome {
            id: event.id,
            result,
        })
    }
}
