//! The FilterPath chains event filters.
//!
//! A path runs its filters in order and accepts an event only if every
//! filter accepts it. The first rejecting filter ends the path: later
//! filters are not run. Every filter that did run publishes its output as a
//! [`FilterProduct`] labelled with the path and module names.

use crate::decision::FilterOutput;
use crate::traits::EventFilter;
use anyhow::Result;
use event_data::Event;
use serde::Serialize;
use tracing;

/// A filter's output together with the identity it is published under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterProduct {
    pub path: String,
    pub module: String,
    pub output: FilterOutput,
}

/// Outcome of running a path on one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub accept: bool,
    /// One product per filter that ran, in path order.
    pub products: Vec<FilterProduct>,
}

impl PathResult {
    /// Product of the named module, if it ran.
    pub fn product(&self, module: &str) -> Option<&FilterProduct> {
        self.products.iter().find(|p| p.module == module)
    }
}

/// Chains multiple filters together into a trigger path.
///
/// ## Usage
/// ```ignore
/// let path = FilterPath::new("HLT_DoubleMu3_JPsi")
///     .add_filter(DimuonFilter::from_config("hltJpsiMuMuFilter", &config));
///
/// let result = path.run(&event)?;
/// ```
pub struct FilterPath {
    name: String,
    filters: Vec<Box<dyn EventFilter>>,
}

impl FilterPath {
    /// Create a new empty FilterPath.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filters: Vec::new(),
        }
    }

    /// Add a filter to the path (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the EventFilter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl EventFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run the filters in order on one event.
    ///
    /// ## Algorithm
    /// 1. For each filter in order:
    ///    a. Apply the filter
    ///    b. Publish its output under (path, module)
    ///    c. Stop if it rejected the event
    /// 2. The path accepts iff no filter rejected
    ///
    /// An empty path accepts every event.
    ///
    /// # Returns
    /// * `Ok(PathResult)` - The decision and the products of the filters that ran
    /// * `Err` - If any filter could not evaluate the event
    pub fn run(&self, event: &Event) -> Result<PathResult> {
        let mut products = Vec::with_capacity(self.filters.len());
        let mut accept = true;

        for filter in &self.filters {
            let output = filter.filter(event)?;
            tracing::debug!(
                "Filter {} on event {}: accept = {} (pairs: {})",
                filter.name(),
                event.id,
                output.accept,
                output.accepted_pairs
            );
            accept = output.accept;
            products.push(FilterProduct {
                path: self.name.clone(),
                module: filter.name().to_string(),
                output,
            });
            if !accept {
                break;
            }
        }

        Ok(PathResult { accept, products })
    }
}
