use std::collections::HashMap;
use techgrid::core::models::ids::ModuleKey;
use techgrid::engine::state::{Outcome, SolveResult};

/// Opaque handle to a solve result: the best placement found, its score,
/// the termination outcome, and run statistics.
pub struct TgResult {
    pub(crate) result: SolveResult,
    pub(crate) index_of: HashMap<ModuleKey, i32>,
}

/// Frees a result handle. A null pointer is a no-op.
///
/// # Safety
///
/// The pointer must have been produced by `tg_solve` and must not be used
/// after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_result_free(ptr: *mut TgResult) {
    if !ptr.is_null() {
        drop(unsafe { Box::from_raw(ptr) });
    }
}

/// Returns the score of the best placement found.
///
/// # Panics
///
/// Panics if called with a null pointer.
///
/// # Safety
///
/// The pointer must be a valid handle produced by `tg_solve`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_result_score(ptr: *const TgResult) -> f64 {
    assert!(!ptr.is_null(), "called `tg_result_score` with null pointer");
    unsafe { &*ptr }.result.score
}

/// Returns the termination outcome: 0 for converged, 1 for timed out,
/// 2 for iteration budget exhausted.
///
/// # Panics
///
/// Panics if called with a null pointer.
///
/// # Safety
///
/// The pointer must be a valid handle produced by `tg_solve`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_result_outcome(ptr: *const TgResult) -> i32 {
    assert!(
        !ptr.is_null(),
        "called `tg_result_outcome` with null pointer"
    );
    match unsafe { &*ptr }.result.outcome {
        Outcome::Converged => 0,
        Outcome::TimedOut => 1,
        Outcome::IterationBudgetExhausted => 2,
    }
}

/// Returns the total number of move trials performed.
///
/// # Panics
///
/// Panics if called with a null pointer.
///
/// # Safety
///
/// The pointer must be a valid handle produced by `tg_solve`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_result_iterations(ptr: *const TgResult) -> usize {
    assert!(
        !ptr.is_null(),
        "called `tg_result_iterations` with null pointer"
    );
    unsafe { &*ptr }.result.stats.iterations
}

/// Returns the number of reheats fired during the run.
///
/// # Panics
///
/// Panics if called with a null pointer.
///
/// # Safety
///
/// The pointer must be a valid handle produced by `tg_solve`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_result_reheats(ptr: *const TgResult) -> usize {
    assert!(
        !ptr.is_null(),
        "called `tg_result_reheats` with null pointer"
    );
    unsafe { &*ptr }.result.stats.reheats
}

/// Returns the catalog index of the module on a cell, or -1 if the cell
/// is empty or inactive.
///
/// # Panics
///
/// Panics if called with a null pointer or with coordinates outside the
/// grid.
///
/// # Safety
///
/// The pointer must be a valid handle produced by `tg_solve`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_result_cell_module(ptr: *const TgResult, x: usize, y: usize) -> i32 {
    assert!(
        !ptr.is_null(),
        "called `tg_result_cell_module` with null pointer"
    );
    let handle = unsafe { &*ptr };

    let cell = match handle.result.grid.cell(x, y) {
        Ok(cell) => cell,
        Err(_) => panic!(
            "called `tg_result_cell_module` with coordinates ({x}, {y}) out of bounds: \
             the grid is {}x{}",
            handle.result.grid.width(),
            handle.result.grid.height()
        ),
    };
    cell.module
        .and_then(|key| handle.index_of.get(&key).copied())
        .unwrap_or(-1)
}
