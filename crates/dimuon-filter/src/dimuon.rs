//! The dimuon trigger filter module.
//!
//! Binds a candidate collection tag to a [`CutConfiguration`] and runs the
//! [`PairEvaluator`] on every event it is given.

use crate::config::{CutConfiguration, FilterConfig};
use crate::decision::FilterOutput;
use crate::evaluator::PairEvaluator;
use crate::traits::EventFilter;
use anyhow::{Context, Result};
use event_data::Event;
use tracing::{debug, instrument};

/// Accepts events holding at least one candidate pair that passes all cuts.
#[derive(Debug, Clone)]
pub struct DimuonFilter {
    name: String,
    cand_tag: String,
    cuts: CutConfiguration,
}

impl DimuonFilter {
    /// Create a new DimuonFilter.
    ///
    /// # Arguments
    /// * `name` - Module label, used in logs and on published products
    /// * `cand_tag` - Tag of the candidate collection to read from each event
    /// * `cuts` - Selection thresholds, fixed for the lifetime of the filter
    pub fn new(name: impl Into<String>, cand_tag: impl Into<String>, cuts: CutConfiguration) -> Self {
        let filter = Self {
            name: name.into(),
            cand_tag: cand_tag.into(),
            cuts,
        };
        debug!(
            module = %filter.name,
            cand_tag = %filter.cand_tag,
            cuts = ?filter.cuts,
            "dimuon filter configured"
        );
        filter
    }

    /// Build from a parsed configuration file.
    pub fn from_config(name: impl Into<String>, config: &FilterConfig) -> Self {
        Self::new(name, config.cand_tag.clone(), config.cuts())
    }

    pub fn cand_tag(&self) -> &str {
        &self.cand_tag
    }

    pub fn cuts(&self) -> &CutConfiguration {
        &self.cuts
    }
}

impl EventFilter for DimuonFilter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(level = "debug", skip_all, fields(module = %self.name, event = %event.id))]
    fn filter(&self, event: &Event) -> Result<FilterOutput> {
        let candidates = event
            .get_by_label(&self.cand_tag)
            .with_context(|| format!("{} cannot read its input collection", self.name))?;

        let output = PairEvaluator::new(&self.cuts).evaluate(candidates);
        debug!(
            "Result of {} is {}, number of pairs passing thresholds = {}",
            self.name, output.accept, output.accepted_pairs
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChargeMode;
    use event_data::{CandidateRecord, Charge, EventId, Vector3};
    use std::f64::consts::PI;

    fn cuts() -> CutConfiguration {
        CutConfiguration {
            max_abs_eta: 2.5,
            min_valid_hits: 0,
            max_abs_d0: 2.0,
            max_abs_dz: 20.0,
            charge_mode: ChargeMode::Any,
            min_pair_pt: 0.0,
            min_leading_threshold: 3.0,
            min_trailing_threshold: 3.0,
            min_invariant_mass: 1.0,
            max_invariant_mass: 100.0,
            min_acoplanarity: -1.0,
            max_acoplanarity: 4.0,
            sigma_multiplier: 0.0,
            fast_accept: false,
        }
    }

    fn muon(pt: f64, phi: f64) -> CandidateRecord {
        CandidateRecord {
            pt,
            eta: 0.0,
            phi,
            charge: Charge::Negative,
            d0: 0.0,
            dz: 0.0,
            valid_hits: 12,
            curvature_error: 0.0,
            curvature: 0.0,
            momentum: Vector3::from_pt_eta_phi(pt, 0.0, phi),
        }
    }

    #[test]
    fn test_filter_reads_tagged_collection() {
        let filter = DimuonFilter::new("hltDiMuonFilter", "muons", cuts());
        let event = Event::new(EventId::new(1, 1))
            .with_collection("muons", vec![muon(10.0, 0.0), muon(10.0, PI)])
            .with_collection("other", Vec::new());

        let output = filter.filter(&event).unwrap();
        assert!(output.accept);
        assert_eq!(filter.name(), "hltDiMuonFilter");
    }

    #[test]
    fn test_missing_collection_is_fatal() {
        let filter = DimuonFilter::new("hltDiMuonFilter", "muons", cuts());
        let event = Event::new(EventId::new(1, 2)).with_collection("other", vec![muon(10.0, 0.0)]);

        let err = filter.filter(&event).unwrap_err();
        assert!(format!("{err:#}").contains("muons"));
    }
}
