//! The ordered pair-level cut cascade.
//!
//! Each cut is a named variant of [`PairCut`]. The evaluator walks
//! [`PairCut::CASCADE`] in order and stops at the first cut that fails, so a
//! rejected pair always has exactly one cut to blame.
//!
//! Every comparison is phrased as a requirement: a NaN reaching a cut makes
//! that cut fail.

use crate::config::{ChargeMode, CutConfiguration};
use crate::kinematics::{self, LorentzVector, MUON_MASS2};
use event_data::{CandidateIndex, CandidateRecord};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Number of cuts in the cascade.
pub const CUT_COUNT: usize = 5;

/// One stage of the pair cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PairCut {
    Thresholds,
    Charge,
    Acoplanarity,
    PairPt,
    InvariantMass,
}

impl PairCut {
    /// Evaluation order.
    pub const CASCADE: [PairCut; CUT_COUNT] = [
        PairCut::Thresholds,
        PairCut::Charge,
        PairCut::Acoplanarity,
        PairCut::PairPt,
        PairCut::InvariantMass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PairCut::Thresholds => "thresholds",
            PairCut::Charge => "charge",
            PairCut::Acoplanarity => "acoplanarity",
            PairCut::PairPt => "pair_pt",
            PairCut::InvariantMass => "invariant_mass",
        }
    }

    /// Position in [`PairCut::CASCADE`].
    pub fn position(self) -> usize {
        self as usize
    }

    /// Apply this cut. Quantities computed along the way are cached in `pair`.
    pub fn passes(self, cuts: &CutConfiguration, pair: &mut PairState<'_>) -> bool {
        match self {
            PairCut::Thresholds => {
                let (larger, smaller) = if pair.threshold_first > pair.threshold_second {
                    (pair.threshold_first, pair.threshold_second)
                } else {
                    (pair.threshold_second, pair.threshold_first)
                };
                larger >= cuts.min_leading_threshold && smaller >= cuts.min_trailing_threshold
            }
            PairCut::Charge => {
                let product = pair.first.charge.value() * pair.second.charge.value();
                match cuts.charge_mode {
                    ChargeMode::OppositeSign => product < 0,
                    ChargeMode::SameSign => product > 0,
                    ChargeMode::Any => true,
                }
            }
            PairCut::Acoplanarity => {
                let acop = pair.acoplanarity();
                trace!(acoplanarity = acop, "pair acoplanarity");
                cuts.min_acoplanarity <= acop && acop <= cuts.max_acoplanarity
            }
            PairCut::PairPt => {
                let pt = pair.four_momentum().pt();
                trace!(pair_pt = pt, "pair transverse momentum");
                pt >= cuts.min_pair_pt
            }
            PairCut::InvariantMass => {
                let mass = pair.invariant_mass();
                trace!(invariant_mass = mass, "pair invariant mass");
                cuts.min_invariant_mass <= mass && mass <= cuts.max_invariant_mass
            }
        }
    }
}

impl fmt::Display for PairCut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Working state for one candidate pair while it moves through the cascade.
#[derive(Debug, Clone)]
pub struct PairState<'a> {
    pub first: &'a CandidateRecord,
    pub second: &'a CandidateRecord,
    pub threshold_first: f64,
    pub threshold_second: f64,
    acoplanarity: Option<f64>,
    four_momentum: Option<LorentzVector>,
}

impl<'a> PairState<'a> {
    pub fn new(
        first: &'a CandidateRecord,
        second: &'a CandidateRecord,
        threshold_first: f64,
        threshold_second: f64,
    ) -> Self {
        Self {
            first,
            second,
            threshold_first,
            threshold_second,
            acoplanarity: None,
            four_momentum: None,
        }
    }

    pub fn acoplanarity(&mut self) -> f64 {
        let (first, second) = (self.first, self.second);
        *self
            .acoplanarity
            .get_or_insert_with(|| kinematics::acoplanarity(first.phi, second.phi))
    }

    /// Sum of the two four-momenta under the muon mass hypothesis.
    pub fn four_momentum(&mut self) -> LorentzVector {
        let (first, second) = (self.first, self.second);
        *self.four_momentum.get_or_insert_with(|| {
            LorentzVector::from_momentum(&first.momentum, MUON_MASS2)
                + LorentzVector::from_momentum(&second.momentum, MUON_MASS2)
        })
    }

    pub fn invariant_mass(&mut self) -> f64 {
        self.four_momentum().mass().abs()
    }

    /// Freeze into a [`PairResult`] for the given indices.
    pub fn into_result(mut self, first: CandidateIndex, second: CandidateIndex) -> PairResult {
        PairResult {
            first,
            second,
            invariant_mass: self.invariant_mass(),
            acoplanarity: self.acoplanarity(),
            pair_pt: self.four_momentum().pt(),
        }
    }
}

/// An accepted pair and the quantities it was accepted on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairResult {
    pub first: CandidateIndex,
    pub second: CandidateIndex,
    pub invariant_mass: f64,
    pub acoplanarity: f64,
    pub pair_pt: f64,
}
