use crate::catalog::TgCatalog;
use crate::status::{TG_ERR_INVALID_INPUT, TG_ERR_NULL_POINTER, TG_ERR_OUT_OF_BOUNDS, TG_OK};
use techgrid::core::models::grid::{Grid, GridError};

/// Opaque handle to a mutable layout grid.
pub struct TgGrid {
    pub(crate) inner: Grid,
}

pub(crate) fn status_from_grid(err: &GridError) -> i32 {
    match err {
        GridError::OutOfBounds { .. } => TG_ERR_OUT_OF_BOUNDS,
        _ => TG_ERR_INVALID_INPUT,
    }
}

/// Creates a grid of the given dimensions. All cells start active, not
/// supercharged, and empty.
#[unsafe(no_mangle)]
pub extern "C" fn tg_grid_new(width: usize, height: usize) -> *mut TgGrid {
    Box::into_raw(Box::new(TgGrid {
        inner: Grid::new(width, height),
    }))
}

/// Frees a grid handle. A null pointer is a no-op.
///
/// # Safety
///
/// The pointer must have been allocated by `tg_grid_new` and must not be
/// used after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_grid_free(ptr: *mut TgGrid) {
    if !ptr.is_null() {
        drop(unsafe { Box::from_raw(ptr) });
    }
}

/// Sets the active and supercharged flags of one cell. Deactivating a cell
/// evicts any module on it and clears its supercharge flag; requesting an
/// inactive supercharged cell is rejected as invalid input.
///
/// # Safety
///
/// The pointer must be a valid grid handle allocated by `tg_grid_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_grid_set_cell(
    ptr: *mut TgGrid,
    x: usize,
    y: usize,
    active: bool,
    supercharged: bool,
) -> i32 {
    if ptr.is_null() {
        return TG_ERR_NULL_POINTER;
    }
    if !active && supercharged {
        return TG_ERR_INVALID_INPUT;
    }
    let grid = unsafe { &mut *ptr };
    match grid.inner.set_cell_properties(x, y, active, supercharged) {
        Ok(()) => TG_OK,
        Err(e) => status_from_grid(&e),
    }
}

/// Places the module with the given catalog index on a cell. Fails on
/// inactive or occupied cells and on unknown module indices.
///
/// # Safety
///
/// Both pointers must be valid handles allocated by this library.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_grid_place(
    grid_ptr: *mut TgGrid,
    catalog_ptr: *const TgCatalog,
    x: usize,
    y: usize,
    module_index: usize,
) -> i32 {
    if grid_ptr.is_null() || catalog_ptr.is_null() {
        return TG_ERR_NULL_POINTER;
    }
    let grid = unsafe { &mut *grid_ptr };
    let catalog = unsafe { &*catalog_ptr };
    let Some(&key) = catalog.keys.get(module_index) else {
        return TG_ERR_INVALID_INPUT;
    };
    match grid.inner.place(x, y, key) {
        Ok(()) => TG_OK,
        Err(e) => status_from_grid(&e),
    }
}

/// Removes the module on a cell, if any. Removing from an empty cell is
/// not an error.
///
/// # Safety
///
/// The pointer must be a valid grid handle allocated by `tg_grid_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_grid_remove(ptr: *mut TgGrid, x: usize, y: usize) -> i32 {
    if ptr.is_null() {
        return TG_ERR_NULL_POINTER;
    }
    let grid = unsafe { &mut *ptr };
    match grid.inner.remove(x, y) {
        Ok(_) => TG_OK,
        Err(e) => status_from_grid(&e),
    }
}

/// Returns the grid width.
///
/// # Panics
///
/// Panics if called with a null pointer.
///
/// # Safety
///
/// The pointer must be a valid grid handle allocated by `tg_grid_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_grid_width(ptr: *const TgGrid) -> usize {
    assert!(!ptr.is_null(), "called `tg_grid_width` with null pointer");
    unsafe { &*ptr }.inner.width()
}

/// Returns the grid height.
///
/// # Panics
///
/// Panics if called with a null pointer.
///
/// # Safety
///
/// The pointer must be a valid grid handle allocated by `tg_grid_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_grid_height(ptr: *const TgGrid) -> usize {
    assert!(!ptr.is_null(), "called `tg_grid_height` with null pointer");
    unsafe { &*ptr }.inner.height()
}
