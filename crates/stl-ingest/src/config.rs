//! Configuration for the ingestion engine.
//!
//! The host owns these values and passes them in per call; the engine keeps
//! no global state.

use serde::{Deserialize, Serialize};

/// 100 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;

/// Upper bounds enforced before any decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeLimits {
    /// Largest accepted buffer, in bytes (inclusive).
    pub max_bytes: u64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Which area/volume estimator the accumulator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorMode {
    /// Facet-count area and shape-factor volume. Matches previously stored results.
    #[default]
    Heuristic,
    /// Per-facet triangle area and signed-tetrahedron volume.
    Exact,
}

/// What the ASCII reader does with a coordinate token that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericPolicy {
    /// Substitute NaN and keep going. NaN then shows up in the bounding box.
    #[default]
    FailSoft,
    /// Abort with `MalformedNumeric`.
    Strict,
}

/// Full engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub limits: SizeLimits,
    pub estimator: EstimatorMode,
    pub numeric_policy: NumericPolicy,
}

impl AnalysisConfig {
    /// Heuristic estimators, fail-soft numbers (the defaults).
    pub fn heuristic() -> Self {
        Self::default()
    }

    /// Exact triangle integration.
    pub fn exact() -> Self {
        Self {
            estimator: EstimatorMode::Exact,
            ..Self::default()
        }
    }

    /// Malformed numeric tokens abort the parse.
    pub fn strict() -> Self {
        Self {
            numeric_policy: NumericPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_behavior() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.limits.max_bytes, 104_857_600);
        assert_eq!(cfg.estimator, EstimatorMode::Heuristic);
        assert_eq!(cfg.numeric_policy, NumericPolicy::FailSoft);
    }

    #[test]
    fn presets_change_one_knob() {
        assert_eq!(AnalysisConfig::exact().estimator, EstimatorMode::Exact);
        assert_eq!(AnalysisConfig::exact().numeric_policy, NumericPolicy::FailSoft);
        assert_eq!(AnalysisConfig::strict().numeric_policy, NumericPolicy::Strict);
        assert_eq!(AnalysisConfig::strict().estimator, EstimatorMode::Heuristic);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str(r#"{"estimator":"exact"}"#).unwrap();
        assert_eq!(cfg.estimator, EstimatorMode::Exact);
        assert_eq!(cfg.limits, SizeLimits::default());

        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{"limits":{"maxBytes":1024},"numericPolicy":"strict"}"#)
                .unwrap();
        assert_eq!(cfg.limits.max_bytes, 1024);
        assert_eq!(cfg.numeric_policy, NumericPolicy::Strict);
    }
}
