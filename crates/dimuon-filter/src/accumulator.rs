//! Deduplicating collector for candidates behind accepted pairs.

use crate::cuts::PairResult;
use crate::decision::{CutFlow, FilterOutput};
use event_data::CandidateIndex;

/// Builds the selected-candidate list for one event.
///
/// Local to a single evaluation and consumed by [`CandidateAccumulator::finish`].
#[derive(Debug, Default)]
pub struct CandidateAccumulator {
    selected: Vec<CandidateIndex>,
    accepted_pairs: usize,
}

impl CandidateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted pair.
    ///
    /// One pass over the current selection finds both members (stopping as
    /// soon as both are seen); the first is appended before the second.
    pub fn add_pair(&mut self, pair: &PairResult) {
        let (first, second) = (pair.first, pair.second);
        let mut first_seen = false;
        let mut second_seen = false;
        for &index in &self.selected {
            if index == first {
                first_seen = true;
            } else if index == second {
                second_seen = true;
            }
            if first_seen && second_seen {
                break;
            }
        }

        if !first_seen {
            self.selected.push(first);
        }
        if !second_seen {
            self.selected.push(second);
        }
        self.accepted_pairs += 1;
    }

    pub fn accepted_pairs(&self) -> usize {
        self.accepted_pairs
    }

    pub fn selected(&self) -> &[CandidateIndex] {
        &self.selected
    }

    pub fn finish(self, cut_flow: CutFlow) -> FilterOutput {
        FilterOutput::new(self.selected, self.accepted_pairs, cut_flow)
    }
}
