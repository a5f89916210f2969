//! # Foreign Function Interface (FFI) for techgrid
//!
//! A C-compatible API over the layout optimizer, for embedding in host
//! applications (C, C++, Python, JavaScript runtimes, etc.).
//!
//! ## Usage Lifecycle
//!
//! 1. **Grid**: create with `tg_grid_new`, flag cells with
//!    `tg_grid_set_cell`.
//! 2. **Catalog**: create with `tg_catalog_new`, add modules with
//!    `tg_catalog_add_module`; each call returns the module's index, which
//!    identifies the module everywhere else in this API.
//! 3. **Solve**: call `tg_solve` with the grid, the catalog, solver
//!    parameters (`tg_solver_params_default` for the defaults) and an
//!    optional scoring policy. On success an opaque result handle is
//!    written to the out-parameter.
//! 4. **Inspect**: read the score, outcome, statistics, and per-cell
//!    module indices from the result handle.
//! 5. **Cleanup**: every handle must be released exactly once with its
//!    matching `tg_*_free` function.
//!
//! ## Error handling
//!
//! Fallible functions return a status code: `TG_OK` on success,
//! `TG_ERR_INVALID_INPUT` for rejected input, `TG_ERR_INTERNAL` for
//! engine invariant violations, `TG_ERR_NULL_POINTER` for null handles,
//! and `TG_ERR_OUT_OF_BOUNDS` for coordinates outside the grid. A failed
//! `tg_solve` never yields a result handle, not even a partial one.
//! Read-only accessors fail fast: they panic on null pointers and
//! out-of-bounds indices rather than returning garbage.
//!
//! ## Safety
//!
//! Callers must pass only pointers allocated by this library, must not
//! use a handle after freeing it, and must not free a handle twice.

pub mod catalog;
pub mod grid;
pub mod result;
pub mod solve;
pub mod status;
