use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classifies how strongly a module bonds with same-tech neighbors.
///
/// The adjacency kind selects the weight tier applied to the module's
/// per-neighbor adjacency bonus during scoring. Modules with `None`
/// receive no adjacency credit regardless of their surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjacencyKind {
    /// No adjacency bonding.
    #[default]
    None,
    /// Standard-tier bonding weight.
    Lesser,
    /// High-tier bonding weight, worth more per qualifying neighbor.
    Greater,
}

impl FromStr for AdjacencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(AdjacencyKind::None),
            "lesser" => Ok(AdjacencyKind::Lesser),
            "greater" => Ok(AdjacencyKind::Greater),
            other => Err(format!("unknown adjacency kind '{other}'")),
        }
    }
}

impl fmt::Display for AdjacencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdjacencyKind::None => "none",
            AdjacencyKind::Lesser => "lesser",
            AdjacencyKind::Greater => "greater",
        };
        f.write_str(s)
    }
}

/// Immutable descriptor of a placeable technology module.
///
/// A module belongs to exactly one tech group; only modules of the same
/// group bond with each other for adjacency bonuses. The descriptor never
/// changes during a solve; all placement state lives on the [`Grid`].
///
/// [`Grid`]: super::grid::Grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Host-assigned identifier, unique within a catalog (e.g. "pulse-engine").
    pub id: String,
    /// Tech group this module bonds with (e.g. "hyperdrive").
    pub tech: String,
    /// Adjacency bonding tier.
    #[serde(default)]
    pub adjacency: AdjacencyKind,
    /// Flat score contribution when placed on an active cell.
    pub base_bonus: f64,
    /// Score added per qualifying orthogonal neighbor, before tier weighting.
    #[serde(default)]
    pub adjacency_bonus: f64,
    /// Whether a supercharged cell multiplies this module's contribution.
    #[serde(default)]
    pub sc_eligible: bool,
    /// Whether the module is currently selected for placement.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
