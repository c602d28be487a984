//! Four-vector arithmetic for pair reconstruction.

use event_data::Vector3;
use std::f64::consts::PI;
use std::ops::Add;

/// Rest mass assumed for every candidate (GeV).
pub const MUON_MASS: f64 = 0.106;

/// `MUON_MASS` squared.
pub const MUON_MASS2: f64 = MUON_MASS * MUON_MASS;

/// Minkowski four-vector (px, py, pz, E).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LorentzVector {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl LorentzVector {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// On-shell four-vector for a three-momentum and a squared rest mass.
    pub fn from_momentum(p: &Vector3, mass2: f64) -> Self {
        let e = (p.mag2() + mass2).sqrt();
        Self::new(p.x, p.y, p.z, e)
    }

    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    pub fn mass2(&self) -> f64 {
        self.e * self.e - (self.px * self.px + self.py * self.py + self.pz * self.pz)
    }

    /// Signed mass: `-sqrt(-m2)` for space-like vectors.
    pub fn mass(&self) -> f64 {
        let m2 = self.mass2();
        if m2 < 0.0 { -(-m2).sqrt() } else { m2.sqrt() }
    }
}

impl Add for LorentzVector {
    type Output = LorentzVector;

    fn add(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector::new(
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
            self.e + rhs.e,
        )
    }
}

/// Deviation of two azimuths from back-to-back, in `[0, pi]`.
///
/// 0 means exactly back-to-back, pi means collinear. Inputs are expected in
/// `[-pi, pi]`, which is what track reconstruction produces.
pub fn acoplanarity(phi1: f64, phi2: f64) -> f64 {
    let mut delta = (phi1 - phi2).abs();
    if delta > PI {
        delta = 2.0 * PI - delta;
    }
    PI - delta
}
