//! Seeded synthetic muon events for the `generate` and `benchmark` commands.

use std::f64::consts::PI;

use event_data::{CandidateRecord, Charge, Event, EventId, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Run number stamped on every generated event.
pub const SYNTHETIC_RUN: u32 = 1;

/// Generate `count` events, each with up to `max_candidates` candidates
/// stored under `tag`. The same seed always yields the same events.
pub fn generate_events(count: u64, max_candidates: usize, tag: &str, seed: u64) -> Vec<Event> {
    debug!("Generating {} events (seed {}, up to {} candidates)", count, seed, max_candidates);
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|n| {
            let multiplicity = rng.random_range(0..=max_candidates);
            let candidates = (0..multiplicity).map(|_| random_candidate(&mut rng)).collect();
            Event::new(EventId::new(SYNTHETIC_RUN, n)).with_collection(tag, candidates)
        })
        .collect()
}

/// A muon-like candidate. Acceptance and impact ranges reach slightly past
/// typical cut values so that the gate has something to reject.
fn random_candidate(rng: &mut StdRng) -> CandidateRecord {
    let pt = rng.random_range(1.0..40.0);
    let eta = rng.random_range(-2.7..2.7);
    let phi = rng.random_range(-PI..PI);
    let charge = if rng.random_bool(0.5) {
        Charge::Positive
    } else {
        Charge::Negative
    };
    let curvature = 1.0 / pt;

    CandidateRecord {
        pt,
        eta,
        phi,
        charge,
        d0: rng.random_range(-2.5..2.5),
        dz: rng.random_range(-20.0..20.0),
        valid_hits: rng.random_range(0..25),
        curvature_error: curvature * rng.random_range(0.005..0.05),
        curvature,
        momentum: Vector3::from_pt_eta_phi(pt, eta, phi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_events() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
        let a = generate_events(20, 6, "muons", 42);
        let b = generate_events(20, 6, "muons", 42);

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.get_by_label("muons").unwrap(), y.get_by_label("muons").unwrap());
        }
    }

    #[test]
    fn test_multiplicity_bound() {
        let events = generate_events(50, 3, "muons", 7);

        assert_eq!(events.len(), 50);
        assert!(events.iter().all(|e| e.get_by_label("muons").unwrap().len() <= 3));
        assert_eq!(events[49].id, EventId::new(SYNTHETIC_RUN, 49));
    }

    #[test]
    fn test_candidates_are_consistent() {
        for event in generate_events(10, 5, "muons", 3) {
            for c in event.get_by_label("muons").unwrap() {
                assert!((c.momentum.perp() - c.pt).abs() < 1e-9);
                assert_ne!(c.charge, Charge::Neutral);
                assert!(c.curvature > 0.0);
            }
        }
    }
}
