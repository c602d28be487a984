//! Single-candidate quality gate and corrected momentum threshold.
//!
//! The gate only rejects on explicit comparisons. Nothing is validated: a
//! NaN eta compares false against the bound and is admitted, and a negative
//! hit count is compared like any other integer.

use crate::config::CutConfiguration;
use event_data::CandidateRecord;
use std::fmt;

/// Why a candidate failed the gate. Checks run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateRejection {
    Eta,
    ValidHits,
    TransverseImpact,
    LongitudinalImpact,
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateRejection::Eta => "eta",
            GateRejection::ValidHits => "valid_hits",
            GateRejection::TransverseImpact => "d0",
            GateRejection::LongitudinalImpact => "dz",
        };
        f.write_str(name)
    }
}

/// Admissibility test and threshold computation for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateQualityGate {
    max_abs_eta: f64,
    min_valid_hits: i32,
    max_abs_d0: f64,
    max_abs_dz: f64,
    sigma_multiplier: f64,
}

impl CandidateQualityGate {
    pub fn new(cuts: &CutConfiguration) -> Self {
        Self {
            max_abs_eta: cuts.max_abs_eta,
            min_valid_hits: cuts.min_valid_hits,
            max_abs_d0: cuts.max_abs_d0,
            max_abs_dz: cuts.max_abs_dz,
            sigma_multiplier: cuts.sigma_multiplier,
        }
    }

    /// First failing check, or `None` if the candidate is admissible.
    pub fn rejection(&self, candidate: &CandidateRecord) -> Option<GateRejection> {
        if candidate.eta.abs() > self.max_abs_eta {
            return Some(GateRejection::Eta);
        }
        if candidate.valid_hits < self.min_valid_hits {
            return Some(GateRejection::ValidHits);
        }
        if candidate.d0.abs() > self.max_abs_d0 {
            return Some(GateRejection::TransverseImpact);
        }
        if candidate.dz.abs() > self.max_abs_dz {
            return Some(GateRejection::LongitudinalImpact);
        }
        None
    }

    pub fn admits(&self, candidate: &CandidateRecord) -> bool {
        self.rejection(candidate).is_none()
    }

    /// Bias-corrected pt threshold.
    ///
    /// Turns the 50%-efficiency point estimate into roughly the 90% point by
    /// adding `sigma_multiplier` relative curvature errors, scaled by the raw
    /// pt. Candidates with zero curvature keep their raw pt. Only the
    /// magnitude of `curvature` is used, so a signed q/p works as well.
    pub fn threshold(&self, candidate: &CandidateRecord) -> f64 {
        let mut corrected = candidate.pt;
        let curvature = candidate.curvature.abs();
        if curvature > 0.0 {
            corrected += self.sigma_multiplier * candidate.curvature_error / curvature * candidate.pt;
        }
        corrected
    }
}
