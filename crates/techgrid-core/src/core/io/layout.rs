use super::IoError;
use crate::core::models::catalog::ModuleCatalog;
use crate::core::models::grid::Grid;
use crate::core::models::module::Module;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk description of a layout problem: grid shape, cell flags, the
/// module list, and optionally where modules currently sit.
///
/// The same format serves as input (a problem to solve, `placed_at`
/// optional) and output (a solved layout, `placed_at` filled in), so a
/// solved file can be fed back in with `seed_from_current_grid` or
/// re-scored directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub grid: GridSection,
    #[serde(default, rename = "modules")]
    pub modules: Vec<ModuleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSection {
    pub width: usize,
    pub height: usize,
    /// Cells that are unusable, as `[x, y]` pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inactive: Vec<[usize; 2]>,
    /// Cells that grant the supercharge multiplier, as `[x, y]` pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supercharged: Vec<[usize; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    #[serde(flatten)]
    pub module: Module,
    /// Current position of the module on the grid, if placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_at: Option<[usize; 2]>,
}

impl LayoutFile {
    /// Reads and parses a layout file.
    pub fn read_from_path(path: &Path) -> Result<Self, IoError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Serializes this layout to a TOML file.
    pub fn write_to_path(&self, path: &Path) -> Result<(), IoError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Materializes the grid and catalog this file describes.
    ///
    /// Placements recorded via `placed_at` are applied to the grid; the
    /// usual grid rules hold, so a placement on an inactive, out-of-bounds,
    /// or already-occupied cell is rejected.
    pub fn into_problem(self) -> Result<(Grid, ModuleCatalog), IoError> {
        let mut grid = Grid::new(self.grid.width, self.grid.height);
        for &[x, y] in &self.grid.inactive {
            grid.set_cell_properties(x, y, false, false)?;
        }
        for &[x, y] in &self.grid.supercharged {
            let cell = grid.cell(x, y)?;
            if !cell.active {
                return Err(IoError::Layout(format!(
                    "cell ({x}, {y}) is both inactive and supercharged"
                )));
            }
            grid.set_cell_properties(x, y, true, true)?;
        }

        let mut catalog = ModuleCatalog::new();
        for entry in self.modules {
            let placed_at = entry.placed_at;
            let key = catalog.insert(entry.module)?;
            if let Some([x, y]) = placed_at {
                grid.place(x, y, key)?;
            }
        }
        Ok((grid, catalog))
    }

    /// Captures a grid and catalog as a writable layout, recording where
    /// every module ended up.
    pub fn from_solution(grid: &Grid, catalog: &ModuleCatalog) -> Self {
        let mut inactive = Vec::new();
        let mut supercharged = Vec::new();
        let mut placements: Vec<(String, [usize; 2])> = Vec::new();

        for cell in grid.cells() {
            if !cell.active {
                inactive.push([cell.x, cell.y]);
            }
            if cell.supercharged {
                supercharged.push([cell.x, cell.y]);
            }
            if let Some(key) = cell.module {
                if let Some(module) = catalog.get(key) {
                    placements.push((module.id.clone(), [cell.x, cell.y]));
                }
            }
        }

        let mut modules: Vec<ModuleEntry> = catalog
            .iter()
            .map(|(_, m)| ModuleEntry {
                module: m.clone(),
                placed_at: placements
                    .iter()
                    .find(|(id, _)| *id == m.id)
                    .map(|&(_, pos)| pos),
            })
            .collect();
        modules.sort_by(|a, b| a.module.id.cmp(&b.module.id));

        Self {
            grid: GridSection {
                width: grid.width(),
                height: grid.height(),
                inactive,
                supercharged,
            },
            modules,
        }
    }
}
