//! Pure placement scoring: adjacency bonuses and supercharge multipliers.

pub mod policy;

use crate::core::models::catalog::ModuleCatalog;
use crate::core::models::grid::Grid;
use crate::core::models::module::AdjacencyKind;
use policy::ScoringPolicy;

/// Computes the total bonus score of a placement.
///
/// Pure and deterministic: the result depends only on the grid assignment,
/// the catalog, and the policy constants. For every occupied active cell the
/// module's base bonus is accumulated; modules with a non-`None` adjacency
/// kind additionally earn `adjacency_bonus * tier_weight` for each orthogonal
/// neighbor holding a module of the same tech group. If the cell is
/// supercharged and the module is eligible, the module's whole contribution
/// (base + adjacency) is multiplied by the supercharge multiplier.
///
/// Empty grids, inactive cells, and cells without an assignment contribute 0.
pub fn score_grid(grid: &Grid, catalog: &ModuleCatalog, policy: &ScoringPolicy) -> f64 {
    let mut total = 0.0;

    for cell in grid.cells() {
        if !cell.active {
            continue;
        }
        let Some(key) = cell.module else {
            continue;
        };
        let Some(module) = catalog.get(key) else {
            continue;
        };

        let mut contribution = module.base_bonus;

        if module.adjacency != AdjacencyKind::None {
            let per_neighbor = module.adjacency_bonus * policy.adjacency_weight(module.adjacency);
            for neighbor in grid.orthogonal_neighbors(cell.x, cell.y) {
                if !neighbor.active {
                    continue;
                }
                let qualifies = neighbor
                    .module
                    .and_then(|k| catalog.get(k))
                    .is_some_and(|m| m.tech == module.tech);
                if qualifies {
                    contribution += per_neighbor;
                }
            }
        }

        if cell.supercharged && module.sc_eligible {
            contribution *= policy.supercharge_multiplier;
        }

        total += contribution;
    }

    total
}
