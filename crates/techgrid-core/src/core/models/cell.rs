use super::ids::ModuleKey;

/// A single slot in an inventory grid.
///
/// A cell is either active (usable) or inactive. Only active cells may hold
/// a module, and only active cells may be supercharged. The assigned module
/// is tracked by its catalog key; the cell itself never owns module data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Column coordinate, zero-based from the left.
    pub x: usize,
    /// Row coordinate, zero-based from the top.
    pub y: usize,
    /// Whether this slot is usable at all.
    pub active: bool,
    /// Whether an eligible module placed here gets the supercharge multiplier.
    pub supercharged: bool,
    /// Key of the module occupying this cell, if any.
    pub module: Option<ModuleKey>,
}

impl Cell {
    /// Creates an active, unsupercharged, empty cell at the given position.
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            active: true,
            supercharged: false,
            module: None,
        }
    }

    /// Returns `true` if the cell is active and holds a module.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.active && self.module.is_some()
    }

    /// Returns `true` if the cell is active and holds no module.
    #[inline]
    pub fn is_empty_active(&self) -> bool {
        self.active && self.module.is_none()
    }
}
