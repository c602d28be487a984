//! Property tests for the pair selection.

use dimuon_filter::kinematics::acoplanarity;
use dimuon_filter::{CandidateQualityGate, ChargeMode, CutConfiguration, PairEvaluator};
use event_data::{CandidateRecord, Charge, Vector3};
use proptest::prelude::*;
use std::collections::HashSet;
use std::f64::consts::PI;

fn cuts(fast_accept: bool, sigma_multiplier: f64) -> CutConfiguration {
    CutConfiguration {
        max_abs_eta: 2.4,
        min_valid_hits: 5,
        max_abs_d0: 2.0,
        max_abs_dz: 15.0,
        charge_mode: ChargeMode::OppositeSign,
        min_pair_pt: 1.0,
        min_leading_threshold: 5.0,
        min_trailing_threshold: 3.0,
        min_invariant_mass: 2.0,
        max_invariant_mass: 60.0,
        min_acoplanarity: 0.0,
        max_acoplanarity: 3.0,
        sigma_multiplier,
        fast_accept,
    }
}

fn charge() -> impl Strategy<Value = Charge> {
    prop_oneof![Just(Charge::Negative), Just(Charge::Neutral), Just(Charge::Positive)]
}

prop_compose! {
    fn candidate()(
        pt in 0.5f64..40.0,
        eta in -3.0f64..3.0,
        phi in -PI..PI,
        charge in charge(),
        d0 in -3.0f64..3.0,
        dz in -20.0f64..20.0,
        valid_hits in -2i32..25,
        curvature_error in 0.0f64..0.05,
        curvature in prop_oneof![Just(0.0), 0.01f64..1.0, -1.0f64..-0.01],
    ) -> CandidateRecord {
        CandidateRecord {
            pt,
            eta,
            phi,
            charge,
            d0,
            dz,
            valid_hits,
            curvature_error,
            curvature,
            momentum: Vector3::from_pt_eta_phi(pt, eta, phi),
        }
    }
}

fn candidates() -> impl Strategy<Value = Vec<CandidateRecord>> {
    prop::collection::vec(candidate(), 0..9)
}

/// Pair verdict written straight from the selection formulas, without going
/// through the evaluator.
fn reference_pass(config: &CutConfiguration, a: &CandidateRecord, b: &CandidateRecord) -> bool {
    let admitted = |c: &CandidateRecord| {
        c.eta.abs() <= config.max_abs_eta
            && c.valid_hits >= config.min_valid_hits
            && c.d0.abs() <= config.max_abs_d0
            && c.dz.abs() <= config.max_abs_dz
    };
    if !admitted(a) || !admitted(b) {
        return false;
    }

    let corrected = |c: &CandidateRecord| {
        let k = c.curvature.abs();
        if k > 0.0 {
            c.pt + config.sigma_multiplier * c.curvature_error / k * c.pt
        } else {
            c.pt
        }
    };
    let (ta, tb) = (corrected(a), corrected(b));
    if ta.max(tb) < config.min_leading_threshold || ta.min(tb) < config.min_trailing_threshold {
        return false;
    }

    let product = a.charge.value() * b.charge.value();
    let charge_ok = match config.charge_mode {
        ChargeMode::OppositeSign => product < 0,
        ChargeMode::SameSign => product > 0,
        ChargeMode::Any => true,
    };
    if !charge_ok {
        return false;
    }

    let mut delta = (a.phi - b.phi).abs();
    if delta > PI {
        delta = 2.0 * PI - delta;
    }
    let acop = PI - delta;
    if acop < config.min_acoplanarity || acop > config.max_acoplanarity {
        return false;
    }

    let energy = |c: &CandidateRecord| (c.momentum.mag2() + 0.106 * 0.106).sqrt();
    let px = a.momentum.x + b.momentum.x;
    let py = a.momentum.y + b.momentum.y;
    let pz = a.momentum.z + b.momentum.z;
    let e = energy(a) + energy(b);
    if px.hypot(py) < config.min_pair_pt {
        return false;
    }

    let mass = (e * e - (px * px + py * py + pz * pz)).abs().sqrt();
    config.min_invariant_mass <= mass && mass <= config.max_invariant_mass
}

/// Every pair `i < j` that passes on its own, in scan order.
fn passing_pairs(config: &CutConfiguration, candidates: &[CandidateRecord]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..candidates.len() {
        for j in i + 1..candidates.len() {
            if reference_pass(config, &candidates[i], &candidates[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

proptest! {
    #[test]
    fn decision_matches_brute_force(candidates in candidates(), sigma in 0.0f64..3.0) {
        let config = cuts(false, sigma);
        let output = PairEvaluator::new(&config).evaluate(&candidates);
        let pairs = passing_pairs(&config, &candidates);

        prop_assert_eq!(output.accept, !pairs.is_empty());
        prop_assert_eq!(output.accepted_pairs, pairs.len());
        prop_assert_eq!(output.cut_flow.accepted, pairs.len());

        let mut expected = Vec::new();
        for (i, j) in pairs {
            for k in [i, j] {
                if !expected.contains(&k) {
                    expected.push(k);
                }
            }
        }
        prop_assert_eq!(output.selected, expected);
    }

    #[test]
    fn selection_has_no_duplicates(candidates in candidates(), fast in any::<bool>()) {
        let config = cuts(fast, 1.0);
        let output = PairEvaluator::new(&config).evaluate(&candidates);

        let unique: HashSet<_> = output.selected.iter().copied().collect();
        prop_assert_eq!(unique.len(), output.selected.len());
        prop_assert!(output.selected.iter().all(|&i| i < candidates.len()));
        prop_assert_eq!(output.selected.is_empty(), !output.accept);
    }

    #[test]
    fn acoplanarity_is_symmetric_and_bounded(phi1 in -PI..=PI, phi2 in -PI..=PI) {
        let forward = acoplanarity(phi1, phi2);
        let backward = acoplanarity(phi2, phi1);

        prop_assert_eq!(forward, backward);
        prop_assert!((0.0..=PI).contains(&forward));
    }

    #[test]
    fn threshold_grows_with_sigma(
        candidate in candidate(),
        low in 0.0f64..5.0,
        extra in 0.0f64..5.0,
    ) {
        let gate_low = CandidateQualityGate::new(&cuts(false, low));
        let gate_high = CandidateQualityGate::new(&cuts(false, low + extra));

        prop_assert!(gate_low.threshold(&candidate) <= gate_high.threshold(&candidate));
    }

    #[test]
    fn fast_accept_only_trims_pairs(candidates in candidates()) {
        let full = PairEvaluator::new(&cuts(false, 1.0)).evaluate(&candidates);
        let fast = PairEvaluator::new(&cuts(true, 1.0)).evaluate(&candidates);

        prop_assert!(fast.accepted_pairs <= full.accepted_pairs);
        prop_assert_eq!(fast.accept, full.accept);
        prop_assert!(fast.selected.iter().all(|i| full.selected.contains(i)));
    }
}
