use techgrid::engine::error::EngineError;

/// The operation completed successfully.
pub const TG_OK: i32 = 0;
/// The input was rejected before any solving work.
pub const TG_ERR_INVALID_INPUT: i32 = 1;
/// An engine invariant was violated; no result is available.
pub const TG_ERR_INTERNAL: i32 = 2;
/// A required handle was null.
pub const TG_ERR_NULL_POINTER: i32 = 3;
/// A coordinate was outside the grid bounds.
pub const TG_ERR_OUT_OF_BOUNDS: i32 = 4;

pub(crate) fn status_from_engine(err: &EngineError) -> i32 {
    if err.is_invalid_input() {
        TG_ERR_INVALID_INPUT
    } else {
        TG_ERR_INTERNAL
    }
}
