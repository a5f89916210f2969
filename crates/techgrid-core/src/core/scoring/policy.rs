use crate::core::models::module::AdjacencyKind;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse policy file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid policy value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Fixed scoring constants for one solve.
///
/// The supercharge multiplier and the adjacency tier weights are policy
/// constants rather than hard-coded values: reference outputs from different
/// game revisions disagree on the exact numbers, so deployments pin them via
/// a TOML file validated against golden fixtures. The defaults reproduce the
/// documented reference scenario (multiplier 1.5, lesser weight 1.0).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringPolicy {
    /// Multiplier applied to an eligible module's whole contribution when it
    /// sits on a supercharged cell.
    pub supercharge_multiplier: f64,
    /// Weight applied to the per-neighbor adjacency bonus of `Lesser` modules.
    pub lesser_weight: f64,
    /// Weight applied to the per-neighbor adjacency bonus of `Greater` modules.
    pub greater_weight: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            supercharge_multiplier: 1.5,
            lesser_weight: 1.0,
            greater_weight: 2.0,
        }
    }
}

impl ScoringPolicy {
    /// Loads a policy from a TOML file, then validates it.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path)?;
        let policy: ScoringPolicy = toml::from_str(&content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// The tier weight for an adjacency kind. `None` earns nothing.
    #[inline]
    pub fn adjacency_weight(&self, kind: AdjacencyKind) -> f64 {
        match kind {
            AdjacencyKind::None => 0.0,
            AdjacencyKind::Lesser => self.lesser_weight,
            AdjacencyKind::Greater => self.greater_weight,
        }
    }

    /// Checks that all constants are finite and non-negative, and that the
    /// supercharge multiplier is at least 1.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.supercharge_multiplier.is_finite() || self.supercharge_multiplier < 1.0 {
            return Err(PolicyError::InvalidValue {
                name: "supercharge_multiplier",
                reason: format!("must be >= 1.0, got {}", self.supercharge_multiplier),
            });
        }
        for (name, value) in [
            ("lesser_weight", self.lesser_weight),
            ("greater_weight", self.greater_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyError::InvalidValue {
                    name,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}
