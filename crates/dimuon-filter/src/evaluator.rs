//! Combinatorial pair evaluation.
//!
//! ## Algorithm
//! 1. For each candidate `i`, apply the quality gate and compute its
//!    corrected threshold once, before pairing it.
//! 2. For each later candidate `j` (strict upper triangle, input order):
//!    a. apply the gate to `j` and compute its threshold
//!    b. run the cut cascade, stopping at the first failing cut
//!    c. hand accepted pairs to the accumulator
//! 3. With `fast_accept`, leave the inner loop after the first accepted pair
//!    for the current `i`; the outer loop carries on.
//!
//! Quadratic in the number of candidates and fully deterministic for a
//! fixed input order.

use crate::accumulator::CandidateAccumulator;
use crate::config::CutConfiguration;
use crate::cuts::{PairCut, PairResult, PairState};
use crate::decision::{CutFlow, FilterOutput, PairRejection};
use crate::quality::CandidateQualityGate;
use event_data::{CandidateIndex, CandidateRecord};
use tracing::{debug, instrument, trace};

/// Applies the gate and the cut cascade to every candidate pair of an event.
#[derive(Debug, Clone, Copy)]
pub struct PairEvaluator<'a> {
    cuts: &'a CutConfiguration,
    gate: CandidateQualityGate,
}

impl<'a> PairEvaluator<'a> {
    pub fn new(cuts: &'a CutConfiguration) -> Self {
        Self {
            cuts,
            gate: CandidateQualityGate::new(cuts),
        }
    }

    pub fn gate(&self) -> &CandidateQualityGate {
        &self.gate
    }

    /// Run the whole selection over one event's candidates.
    #[instrument(level = "trace", skip_all, fields(candidates = candidates.len()))]
    pub fn evaluate(&self, candidates: &[CandidateRecord]) -> FilterOutput {
        let mut accumulator = CandidateAccumulator::new();
        let mut cut_flow = CutFlow::default();

        for (i, first) in candidates.iter().enumerate() {
            trace!(
                index = i,
                pt = first.pt,
                eta = first.eta,
                hits = first.valid_hits,
                "1st candidate in loop"
            );
            if let Some(reason) = self.gate.rejection(first) {
                trace!(index = i, %reason, "1st candidate rejected");
                cut_flow.leading_rejected += 1;
                continue;
            }
            let threshold_first = self.gate.threshold(first);
            trace!(index = i, pt = first.pt, threshold = threshold_first, "1st candidate admitted");

            for (j, second) in candidates.iter().enumerate().skip(i + 1) {
                match self.cascade(i, first, threshold_first, j, second) {
                    Ok(pair) => {
                        trace!(
                            first = i,
                            second = j,
                            invariant_mass = pair.invariant_mass,
                            "pair accepted"
                        );
                        accumulator.add_pair(&pair);
                        cut_flow.accepted += 1;
                        if self.cuts.fast_accept {
                            break;
                        }
                    }
                    Err(PairRejection::Inadmissible { .. }) => cut_flow.partner_rejected += 1,
                    Err(PairRejection::Cut(cut)) => cut_flow.record_cut(cut),
                }
            }
        }

        let output = accumulator.finish(cut_flow);
        debug!(
            accept = output.accept,
            accepted_pairs = output.accepted_pairs,
            selected = output.selected.len(),
            "dimuon selection result"
        );
        output
    }

    /// Evaluate a single pair on its own, gating both candidates.
    ///
    /// Same verdict the full scan would reach for this pair, ignoring
    /// `fast_accept`.
    pub fn evaluate_pair(
        &self,
        first: CandidateIndex,
        first_record: &CandidateRecord,
        second: CandidateIndex,
        second_record: &CandidateRecord,
    ) -> Result<PairResult, PairRejection> {
        if let Some(reason) = self.gate.rejection(first_record) {
            return Err(PairRejection::Inadmissible {
                candidate: first,
                reason,
            });
        }
        let threshold_first = self.gate.threshold(first_record);
        self.cascade(first, first_record, threshold_first, second, second_record)
    }

    /// Gate the partner, then walk the cut cascade.
    fn cascade(
        &self,
        first: CandidateIndex,
        first_record: &CandidateRecord,
        threshold_first: f64,
        second: CandidateIndex,
        second_record: &CandidateRecord,
    ) -> Result<PairResult, PairRejection> {
        trace!(
            index = second,
            pt = second_record.pt,
            eta = second_record.eta,
            hits = second_record.valid_hits,
            d0 = second_record.d0,
            "2nd candidate in loop"
        );
        if let Some(reason) = self.gate.rejection(second_record) {
            return Err(PairRejection::Inadmissible {
                candidate: second,
                reason,
            });
        }
        let threshold_second = self.gate.threshold(second_record);
        trace!(
            index = second,
            pt = second_record.pt,
            threshold = threshold_second,
            "2nd candidate admitted"
        );

        let mut pair = PairState::new(first_record, second_record, threshold_first, threshold_second);
        for cut in PairCut::CASCADE {
            if !cut.passes(self.cuts, &mut pair) {
                trace!(first, second, cut = cut.name(), "pair rejected");
                return Err(PairRejection::Cut(cut));
            }
        }
        Ok(pair.into_result(first, second))
    }
}
