use crate::core::models::catalog::ModuleCatalog;
use crate::core::models::grid::Grid;
use crate::core::scoring::policy::ScoringPolicy;
use crate::engine::anneal::Annealer;
use crate::engine::config::SolverParams;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::SolveResult;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tracing::{info, instrument};

/// Runs one complete solve: validate the inputs, build the initial placement,
/// anneal, and return the best layout found together with its score.
///
/// Malformed input is rejected with an `InvalidInput`-class error before any
/// annealing work. The input grid is never mutated; the result owns an
/// independent grid.
#[instrument(skip_all, name = "solve_workflow")]
pub fn run(
    grid: &Grid,
    catalog: &ModuleCatalog,
    params: &SolverParams,
    policy: &ScoringPolicy,
    reporter: &ProgressReporter,
) -> Result<SolveResult, EngineError> {
    // === Phase 1: Validation ===
    reporter.report(Progress::PhaseStart { name: "Validation" });
    validate_inputs(grid, catalog, params, policy)?;
    info!(
        width = grid.width(),
        height = grid.height(),
        modules = catalog.len(),
        "Inputs validated."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Annealing ===
    reporter.report(Progress::PhaseStart { name: "Annealing" });
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let annealer = Annealer::new(catalog, policy, params, reporter);
    let (best, outcome, stats) = annealer.run(grid.clone(), &mut rng)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Finalization ===
    if let Some(key) = best.grid.find_duplicate_assignment() {
        // A broken bijection invalidates confidence in any snapshot, so no
        // partial result is returned.
        let id = catalog
            .get(key)
            .map(|m| m.id.clone())
            .unwrap_or_else(|| "<unknown>".to_string());
        return Err(EngineError::Internal(format!(
            "module '{id}' occupies more than one cell after annealing"
        )));
    }

    info!(
        score = best.score,
        ?outcome,
        iterations = stats.iterations,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "Solve complete."
    );
    reporter.report(Progress::Message(format!(
        "Best score {:.3} ({} iterations)",
        best.score, stats.iterations
    )));

    Ok(SolveResult {
        grid: best.grid,
        score: best.score,
        outcome,
        stats,
    })
}

fn validate_inputs(
    grid: &Grid,
    catalog: &ModuleCatalog,
    params: &SolverParams,
    policy: &ScoringPolicy,
) -> Result<(), EngineError> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(EngineError::InvalidGrid {
            reason: format!("zero-size grid ({}x{})", grid.width(), grid.height()),
        });
    }

    params.validate()?;
    policy
        .validate()
        .map_err(|e| EngineError::InvalidPolicy(e.to_string()))?;

    let mut seen = HashSet::new();
    for cell in grid.cells() {
        if cell.supercharged && !cell.active {
            return Err(EngineError::ContradictoryCell {
                x: cell.x,
                y: cell.y,
            });
        }
        if let Some(key) = cell.module {
            let Some(module) = catalog.get(key) else {
                return Err(EngineError::UnknownModule {
                    x: cell.x,
                    y: cell.y,
                });
            };
            if !seen.insert(key) {
                return Err(EngineError::DuplicatePlacement {
                    id: module.id.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::module::{AdjacencyKind, Module};
    use crate::engine::state::Outcome;

    fn module(id: &str) -> Module {
        Module {
            id: id.to_string(),
            tech: "shield".to_string(),
            adjacency: AdjacencyKind::Greater,
            base_bonus: 2.0,
            adjacency_bonus: 0.5,
            sc_eligible: true,
            active: true,
        }
    }

    fn params() -> SolverParams {
        SolverParams::builder()
            .initial_temperature(20.0)
            .stopping_temperature(0.5)
            .cooling_rate(0.85)
            .iterations_per_temperature(15)
            .seed(17)
            .build()
            .unwrap()
    }

    #[test]
    fn solve_places_modules_and_reports_convergence() {
        let mut catalog = ModuleCatalog::new();
        catalog.insert(module("s1")).unwrap();
        catalog.insert(module("s2")).unwrap();
        let grid = Grid::new(3, 2);

        let result = run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(result.outcome, Outcome::Converged);
        assert_eq!(result.grid.occupied_positions().len(), 2);
        assert!(result.score > 0.0);
    }

    #[test]
    fn input_grid_is_left_untouched() {
        let mut catalog = ModuleCatalog::new();
        catalog.insert(module("s1")).unwrap();
        let grid = Grid::new(2, 2);
        let snapshot = grid.clone();

        run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(grid, snapshot);
    }

    #[test]
    fn zero_size_grid_is_rejected_before_running() {
        let catalog = ModuleCatalog::new();
        let grid = Grid::new(0, 4);

        let err = run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidGrid { .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn contradictory_cell_flags_are_rejected() {
        let mut catalog = ModuleCatalog::new();
        catalog.insert(module("s1")).unwrap();
        let mut grid = Grid::new(2, 2);
        // Bypass set_cell_properties, which would normalize the flags.
        grid.cell_mut(1, 1).unwrap().active = false;
        grid.cell_mut(1, 1).unwrap().supercharged = true;

        let err = run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            EngineError::ContradictoryCell { x: 1, y: 1 }
        ));
    }

    #[test]
    fn unknown_module_reference_is_rejected() {
        let mut foreign = ModuleCatalog::new();
        let key = foreign.insert(module("other")).unwrap();

        let catalog = ModuleCatalog::new();
        let mut grid = Grid::new(2, 2);
        grid.place(0, 0, key).unwrap();

        let err = run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::UnknownModule { x: 0, y: 0 }));
    }

    #[test]
    fn duplicate_seed_placement_is_rejected() {
        let mut catalog = ModuleCatalog::new();
        let key = catalog.insert(module("s1")).unwrap();
        let mut grid = Grid::new(2, 1);
        grid.place(0, 0, key).unwrap();
        grid.place(1, 0, key).unwrap();

        let err = run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::DuplicatePlacement { .. }));
    }

    #[test]
    fn seeding_from_current_grid_respects_the_host_placement() {
        let mut catalog = ModuleCatalog::new();
        let key = catalog.insert(module("s1")).unwrap();
        let mut grid = Grid::new(2, 2);
        grid.place(1, 1, key).unwrap();

        let params = SolverParams::builder()
            .seed_from_current_grid(true)
            .max_processing_time(std::time::Duration::ZERO)
            .seed(0)
            .build()
            .unwrap();

        let result = run(
            &grid,
            &catalog,
            &params,
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(result.outcome, Outcome::TimedOut);
        assert_eq!(result.grid.cell(1, 1).unwrap().module, Some(key));
    }

    #[test]
    fn deterministic_across_full_workflow() {
        let mut catalog = ModuleCatalog::new();
        catalog.insert(module("s1")).unwrap();
        catalog.insert(module("s2")).unwrap();
        catalog.insert(module("s3")).unwrap();
        let grid = Grid::new(4, 3);

        let a = run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        let b = run(
            &grid,
            &catalog,
            &params(),
            &ScoringPolicy::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(a.score, b.score);
        assert_eq!(a.grid, b.grid);
    }
}
