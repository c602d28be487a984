//! Per-event filter result and cut-flow bookkeeping.

use crate::cuts::{CUT_COUNT, PairCut};
use crate::quality::GateRejection;
use event_data::CandidateIndex;
use serde::Serialize;

/// Why a pair (or a leading candidate) did not make it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRejection {
    /// A candidate failed the quality gate.
    Inadmissible {
        candidate: CandidateIndex,
        reason: GateRejection,
    },
    /// The pair failed a cascade cut.
    Cut(PairCut),
}

/// Counts of where candidates and pairs were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CutFlow {
    /// Candidates rejected by the gate before their inner loop.
    pub leading_rejected: usize,
    /// Pairs whose second candidate failed the gate.
    pub partner_rejected: usize,
    /// Pairs rejected at each cascade cut, indexed by [`PairCut::position`].
    pub rejected_at: [usize; CUT_COUNT],
    pub accepted: usize,
}

impl CutFlow {
    pub fn rejected_by(&self, cut: PairCut) -> usize {
        self.rejected_at[cut.position()]
    }

    pub fn record_cut(&mut self, cut: PairCut) {
        self.rejected_at[cut.position()] += 1;
    }

    /// Pairs that reached the cascade (partner admitted).
    pub fn pairs_evaluated(&self) -> usize {
        self.rejected_at.iter().sum::<usize>() + self.accepted
    }

    /// Add another event's counts into this one.
    pub fn merge(&mut self, other: &CutFlow) {
        self.leading_rejected += other.leading_rejected;
        self.partner_rejected += other.partner_rejected;
        for (mine, theirs) in self.rejected_at.iter_mut().zip(other.rejected_at.iter()) {
            *mine += theirs;
        }
        self.accepted += other.accepted;
    }
}

/// Result of running the filter on one event.
///
/// `selected` holds every candidate that took part in an accepted pair, in
/// the order it was first selected, without duplicates. It is empty exactly
/// when no pair was accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutput {
    pub selected: Vec<CandidateIndex>,
    pub accepted_pairs: usize,
    pub accept: bool,
    pub cut_flow: CutFlow,
}

impl FilterOutput {
    /// Build the output; the decision is derived from the pair count.
    pub fn new(selected: Vec<CandidateIndex>, accepted_pairs: usize, cut_flow: CutFlow) -> Self {
        Self {
            selected,
            accepted_pairs,
            accept: accepted_pairs >= 1,
            cut_flow,
        }
    }

    /// Output for an event in which nothing was accepted.
    pub fn rejected(cut_flow: CutFlow) -> Self {
        Self::new(Vec::new(), 0, cut_flow)
    }
}
