use crate::catalog::TgCatalog;
use crate::grid::TgGrid;
use crate::result::TgResult;
use crate::status::{TG_ERR_INVALID_INPUT, TG_ERR_NULL_POINTER, TG_OK, status_from_engine};
use std::collections::HashMap;
use std::time::Duration;
use techgrid::core::scoring::policy::ScoringPolicy;
use techgrid::engine::config::SolverParams;
use techgrid::engine::progress::ProgressReporter;
use techgrid::workflows;

/// C-compatible solver parameters. Obtain the defaults from
/// [`tg_solver_params_default`] and override fields as needed.
///
/// `seed` is only honored when `has_seed` is true; otherwise entropy is
/// drawn from the OS. `max_iterations` of 0 means unlimited.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TgSolverParams {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub stopping_temperature: f64,
    pub iterations_per_temperature: usize,
    pub initial_swap_probability: f64,
    pub final_swap_probability: f64,
    pub seed_from_current_grid: bool,
    pub max_processing_time_ms: u64,
    pub max_steps_without_improvement: usize,
    pub reheat_factor: f64,
    pub max_iterations: usize,
    pub has_seed: bool,
    pub seed: u64,
}

/// C-compatible scoring constants. Pass null to `tg_solve` for the
/// defaults.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TgScoringPolicy {
    pub supercharge_multiplier: f64,
    pub lesser_weight: f64,
    pub greater_weight: f64,
}

/// Returns the default solver parameters.
#[unsafe(no_mangle)]
pub extern "C" fn tg_solver_params_default() -> TgSolverParams {
    let p = SolverParams::default();
    TgSolverParams {
        initial_temperature: p.initial_temperature,
        cooling_rate: p.cooling_rate,
        stopping_temperature: p.stopping_temperature,
        iterations_per_temperature: p.iterations_per_temperature,
        initial_swap_probability: p.initial_swap_probability,
        final_swap_probability: p.final_swap_probability,
        seed_from_current_grid: p.seed_from_current_grid,
        max_processing_time_ms: p.max_processing_time.as_millis() as u64,
        max_steps_without_improvement: p.max_steps_without_improvement,
        reheat_factor: p.reheat_factor,
        max_iterations: p.max_iterations,
        has_seed: false,
        seed: 0,
    }
}

/// Returns the default scoring policy constants.
#[unsafe(no_mangle)]
pub extern "C" fn tg_scoring_policy_default() -> TgScoringPolicy {
    let p = ScoringPolicy::default();
    TgScoringPolicy {
        supercharge_multiplier: p.supercharge_multiplier,
        lesser_weight: p.lesser_weight,
        greater_weight: p.greater_weight,
    }
}

fn convert_params(p: &TgSolverParams) -> SolverParams {
    let mut params = SolverParams {
        initial_temperature: p.initial_temperature,
        cooling_rate: p.cooling_rate,
        stopping_temperature: p.stopping_temperature,
        iterations_per_temperature: p.iterations_per_temperature,
        initial_swap_probability: p.initial_swap_probability,
        final_swap_probability: p.final_swap_probability,
        seed_from_current_grid: p.seed_from_current_grid,
        max_processing_time: Duration::from_millis(p.max_processing_time_ms),
        max_steps_without_improvement: p.max_steps_without_improvement,
        reheat_factor: p.reheat_factor,
        max_iterations: p.max_iterations,
        seed: None,
    };
    if p.has_seed {
        params.seed = Some(p.seed);
    }
    params
}

/// Runs one solve and writes an opaque result handle to `out_result`.
///
/// The grid handle is not modified; the result owns an independent copy of
/// the best placement found. On any non-`TG_OK` status nothing is written
/// to `out_result`. Parameter and policy validation failures report
/// `TG_ERR_INVALID_INPUT`.
///
/// # Safety
///
/// `grid_ptr`, `catalog_ptr` and `out_result` must be valid pointers;
/// `params_ptr` and `policy_ptr` may be null to use the defaults. The
/// returned handle must be freed with `tg_result_free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_solve(
    grid_ptr: *const TgGrid,
    catalog_ptr: *const TgCatalog,
    params_ptr: *const TgSolverParams,
    policy_ptr: *const TgScoringPolicy,
    out_result: *mut *mut TgResult,
) -> i32 {
    if grid_ptr.is_null() || catalog_ptr.is_null() || out_result.is_null() {
        return TG_ERR_NULL_POINTER;
    }
    let grid = unsafe { &*grid_ptr };
    let catalog = unsafe { &*catalog_ptr };

    let params = if params_ptr.is_null() {
        SolverParams::default()
    } else {
        convert_params(unsafe { &*params_ptr })
    };

    let policy = if policy_ptr.is_null() {
        ScoringPolicy::default()
    } else {
        let p = unsafe { &*policy_ptr };
        ScoringPolicy {
            supercharge_multiplier: p.supercharge_multiplier,
            lesser_weight: p.lesser_weight,
            greater_weight: p.greater_weight,
        }
    };
    if policy.validate().is_err() {
        return TG_ERR_INVALID_INPUT;
    }

    let reporter = ProgressReporter::new();
    match workflows::solve::run(&grid.inner, &catalog.inner, &params, &policy, &reporter) {
        Ok(result) => {
            let index_of: HashMap<_, _> = catalog
                .keys
                .iter()
                .enumerate()
                .map(|(i, &key)| (key, i as i32))
                .collect();
            let handle = Box::new(TgResult { result, index_of });
            unsafe { *out_result = Box::into_raw(handle) };
            TG_OK
        }
        Err(e) => status_from_engine(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{tg_catalog_free, tg_catalog_new, tests::add};
    use crate::grid::{tg_grid_free, tg_grid_new, tg_grid_set_cell};
    use crate::result::{
        tg_result_cell_module, tg_result_free, tg_result_iterations, tg_result_outcome,
        tg_result_score,
    };
    use crate::status::TG_ERR_INVALID_INPUT;
    use std::ptr::{null, null_mut};

    // Two bonding weapon modules on a 2x2 grid with one supercharged cell;
    // the optimum puts the eligible module on the supercharged corner next
    // to its partner.
    unsafe fn build_fixture() -> (*mut TgGrid, *mut TgCatalog) {
        unsafe {
            let grid = tg_grid_new(2, 2);
            assert_eq!(tg_grid_set_cell(grid, 0, 0, true, true), TG_OK);

            let cat = tg_catalog_new();
            assert_eq!(add(cat, "pulse", "weapons", 2, 2.0, 1.0, true), 0);
            assert_eq!(add(cat, "amp", "weapons", 1, 1.0, 0.5, false), 1);
            (grid, cat)
        }
    }

    #[test]
    fn solve_reaches_the_known_optimum() {
        unsafe {
            let (grid, cat) = build_fixture();
            let mut params = tg_solver_params_default();
            params.has_seed = true;
            params.seed = 7;

            let mut result: *mut TgResult = null_mut();
            let status = tg_solve(grid, cat, &params, null(), &mut result);
            assert_eq!(status, TG_OK);
            assert!(!result.is_null());

            assert!((tg_result_score(result) - 7.5).abs() < 1e-9);
            assert_eq!(tg_result_outcome(result), 0);
            assert!(tg_result_iterations(result) > 0);
            // The eligible module sits on the supercharged cell.
            assert_eq!(tg_result_cell_module(result, 0, 0), 0);

            tg_result_free(result);
            tg_catalog_free(cat);
            tg_grid_free(grid);
        }
    }

    #[test]
    fn invalid_parameters_yield_no_result() {
        unsafe {
            let (grid, cat) = build_fixture();
            let mut params = tg_solver_params_default();
            params.cooling_rate = 1.5;

            let mut result: *mut TgResult = null_mut();
            let status = tg_solve(grid, cat, &params, null(), &mut result);
            assert_eq!(status, TG_ERR_INVALID_INPUT);
            assert!(result.is_null());

            tg_catalog_free(cat);
            tg_grid_free(grid);
        }
    }

    #[test]
    fn null_handles_are_reported() {
        unsafe {
            let mut result: *mut TgResult = null_mut();
            assert_eq!(
                tg_solve(null(), null(), null(), null(), &mut result),
                crate::status::TG_ERR_NULL_POINTER
            );
        }
    }

    #[test]
    fn policy_override_changes_the_score() {
        unsafe {
            let (grid, cat) = build_fixture();
            let mut params = tg_solver_params_default();
            params.has_seed = true;
            params.seed = 7;

            let mut policy = tg_scoring_policy_default();
            policy.supercharge_multiplier = 1.0;

            let mut result: *mut TgResult = null_mut();
            assert_eq!(tg_solve(grid, cat, &params, &policy, &mut result), TG_OK);
            assert!(tg_result_score(result) < 7.5);

            tg_result_free(result);
            tg_catalog_free(cat);
            tg_grid_free(grid);
        }
    }
}
