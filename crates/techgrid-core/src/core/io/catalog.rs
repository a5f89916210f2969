use super::IoError;
use crate::core::models::module::{AdjacencyKind, Module};
use serde::Deserialize;
use std::path::Path;

/// One record of a catalog CSV table. Kept separate from [`Module`] so the
/// table format can require every column explicitly.
#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    tech: String,
    adjacency: AdjacencyKind,
    base_bonus: f64,
    adjacency_bonus: f64,
    sc_eligible: bool,
    active: bool,
}

impl From<Row> for Module {
    fn from(row: Row) -> Self {
        Module {
            id: row.id,
            tech: row.tech,
            adjacency: row.adjacency,
            base_bonus: row.base_bonus,
            adjacency_bonus: row.adjacency_bonus,
            sc_eligible: row.sc_eligible,
            active: row.active,
        }
    }
}

/// Loads module descriptors from a CSV table with the header
/// `id,tech,adjacency,base_bonus,adjacency_bonus,sc_eligible,active`.
pub fn load_modules(path: &Path) -> Result<Vec<Module>, IoError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut modules = Vec::new();
    for record in reader.deserialize() {
        let row: Row = record?;
        modules.push(row.into());
    }
    Ok(modules)
}
