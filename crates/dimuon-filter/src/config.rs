//! Filter configuration.
//!
//! The on-disk format is a flat JSON object keyed by the trigger parameter
//! names (`MaxEta`, `MinNhits`, `ChargeOpt`, ...). Every key is required and
//! unknown keys are rejected: a typo in a trigger menu should fail loudly
//! rather than silently fall back to a default.
//!
//! [`FilterConfig`] is the file shape. [`CutConfiguration`] is what the
//! evaluator actually consumes; it carries no input tag and no I/O concerns.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Charge requirement on a candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChargeMode {
    /// Product of charges must be negative.
    OppositeSign,
    /// Product of charges must be positive.
    SameSign,
    /// No requirement.
    Any,
}

impl From<i32> for ChargeMode {
    /// Integer convention of the `ChargeOpt` parameter: negative selects
    /// opposite-sign pairs, positive same-sign pairs, zero disables the cut.
    fn from(opt: i32) -> Self {
        match opt {
            o if o < 0 => ChargeMode::OppositeSign,
            o if o > 0 => ChargeMode::SameSign,
            _ => ChargeMode::Any,
        }
    }
}

impl From<ChargeMode> for i32 {
    fn from(mode: ChargeMode) -> i32 {
        match mode {
            ChargeMode::OppositeSign => -1,
            ChargeMode::SameSign => 1,
            ChargeMode::Any => 0,
        }
    }
}

/// Thresholds controlling the pair selection.
///
/// Immutable once a filter is built. Windows are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutConfiguration {
    pub max_abs_eta: f64,
    pub min_valid_hits: i32,
    pub max_abs_d0: f64,
    pub max_abs_dz: f64,
    pub charge_mode: ChargeMode,
    pub min_pair_pt: f64,
    /// Applied to the larger of the two corrected thresholds.
    pub min_leading_threshold: f64,
    /// Applied to the smaller of the two corrected thresholds.
    pub min_trailing_threshold: f64,
    pub min_invariant_mass: f64,
    pub max_invariant_mass: f64,
    pub min_acoplanarity: f64,
    pub max_acoplanarity: f64,
    /// Number of sigmas added to pt when building the corrected threshold.
    pub sigma_multiplier: f64,
    /// Stop pairing a leading candidate after its first accepted pair.
    pub fast_accept: bool,
}

/// Configuration file for one dimuon filter module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(rename = "CandTag")]
    pub cand_tag: String,
    #[serde(rename = "FastAccept")]
    pub fast_accept: bool,
    #[serde(rename = "MaxEta")]
    pub max_eta: f64,
    #[serde(rename = "MinNhits")]
    pub min_nhits: i32,
    #[serde(rename = "MaxDr")]
    pub max_dr: f64,
    #[serde(rename = "MaxDz")]
    pub max_dz: f64,
    #[serde(rename = "ChargeOpt")]
    pub charge_opt: i32,
    #[serde(rename = "MinPtPair")]
    pub min_pt_pair: f64,
    #[serde(rename = "MinPtMax")]
    pub min_pt_max: f64,
    #[serde(rename = "MinPtMin")]
    pub min_pt_min: f64,
    #[serde(rename = "MinInvMass")]
    pub min_inv_mass: f64,
    #[serde(rename = "MaxInvMass")]
    pub max_inv_mass: f64,
    #[serde(rename = "MinAcop")]
    pub min_acop: f64,
    #[serde(rename = "MaxAcop")]
    pub max_acop: f64,
    #[serde(rename = "NSigmaPt")]
    pub nsigma_pt: f64,
}

impl FilterConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|e| match e {
            ConfigError::Json { source, .. } => ConfigError::Json {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: "<inline>".to_string(),
            source,
        })
    }

    /// The cut values, detached from the input tag.
    pub fn cuts(&self) -> CutConfiguration {
        CutConfiguration {
            max_abs_eta: self.max_eta,
            min_valid_hits: self.min_nhits,
            max_abs_d0: self.max_dr,
            max_abs_dz: self.max_dz,
            charge_mode: ChargeMode::from(self.charge_opt),
            min_pair_pt: self.min_pt_pair,
            min_leading_threshold: self.min_pt_max,
            min_trailing_threshold: self.min_pt_min,
            min_invariant_mass: self.min_inv_mass,
            max_invariant_mass: self.max_inv_mass,
            min_acoplanarity: self.min_acop,
            max_acoplanarity: self.max_acop,
            sigma_multiplier: self.nsigma_pt,
            fast_accept: self.fast_accept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPSI: &str = r#"{
        "CandTag": "hltL3MuonCandidates",
        "FastAccept": false,
        "MaxEta": 2.5,
        "MinNhits": 0,
        "MaxDr": 2.0,
        "MaxDz": 9999.0,
        "ChargeOpt": -1,
        "MinPtPair": 0.0,
        "MinPtMax": 3.0,
        "MinPtMin": 3.0,
        "MinInvMass": 2.8,
        "MaxInvMass": 3.4,
        "MinAcop": -1.0,
        "MaxAcop": 3.15,
        "NSigmaPt": 0.0
    }"#;

    #[test]
    fn test_parse_config() {
        let config = FilterConfig::from_json(JPSI).unwrap();
        assert_eq!(config.cand_tag, "hltL3MuonCandidates");

        let cuts = config.cuts();
        assert_eq!(cuts.charge_mode, ChargeMode::OppositeSign);
        assert_eq!(cuts.max_abs_d0, 2.0);
        assert_eq!(cuts.min_leading_threshold, 3.0);
        assert_eq!(cuts.min_invariant_mass, 2.8);
        assert!(!cuts.fast_accept);
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let partial = JPSI.replace(r#""NSigmaPt": 0.0"#, r#""Unused": 0"#);
        assert!(FilterConfig::from_json(&partial).is_err());
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let extra = JPSI.replace(r#""NSigmaPt": 0.0"#, r#""NSigmaPt": 0.0, "MinN": 1"#);
        assert!(FilterConfig::from_json(&extra).is_err());
    }

    #[test]
    fn test_charge_opt_mapping() {
        assert_eq!(ChargeMode::from(-3), ChargeMode::OppositeSign);
        assert_eq!(ChargeMode::from(0), ChargeMode::Any);
        assert_eq!(ChargeMode::from(2), ChargeMode::SameSign);
        assert_eq!(i32::from(ChargeMode::OppositeSign), -1);
    }

    #[test]
    fn test_cut_field_names_are_not_a_config_file() {
        let cuts = FilterConfig::from_json(JPSI).unwrap().cuts();
        let as_json = serde_json::to_string(&cuts).unwrap();

        assert!(as_json.contains("max_abs_eta"));
        assert!(FilterConfig::from_json(&as_json).is_err());
    }
}
