use super::cell::Cell;
use super::ids::ModuleKey;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GridError {
    #[error("Coordinates ({x}, {y}) are outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Cannot place a module on inactive cell ({x}, {y})")]
    InactiveCell { x: usize, y: usize },

    #[error("Cell ({x}, {y}) is already occupied")]
    CellOccupied { x: usize, y: usize },
}

/// A bounded 2D inventory grid with exclusive ownership of its cells.
///
/// Cells are stored row-major. Cloning a grid produces fully independent
/// cells; no cell is ever shared between two `Grid` instances, so a clone
/// can be mutated freely as a scratch copy during annealing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the given dimensions with every cell active,
    /// unsupercharged, and empty.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Retrieves an immutable reference to the cell at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        self.index(x, y)
            .map(|i| &self.cells[i])
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    /// Retrieves a mutable reference to the cell at `(x, y)`.
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell, GridError> {
        let (width, height) = (self.width, self.height);
        self.index(x, y)
            .map(|i| &mut self.cells[i])
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
    }

    /// Sets the `active` and `supercharged` flags of a cell.
    ///
    /// Deactivating a cell also evicts any module assigned to it, preserving
    /// the invariant that an inactive cell never holds a module. Deactivating
    /// likewise clears the supercharge flag.
    pub fn set_cell_properties(
        &mut self,
        x: usize,
        y: usize,
        active: bool,
        supercharged: bool,
    ) -> Result<(), GridError> {
        let cell = self.cell_mut(x, y)?;
        cell.active = active;
        cell.supercharged = supercharged && active;
        if !active {
            cell.module = None;
        }
        Ok(())
    }

    /// Assigns a module to the empty active cell at `(x, y)`.
    pub fn place(&mut self, x: usize, y: usize, key: ModuleKey) -> Result<(), GridError> {
        let cell = self.cell_mut(x, y)?;
        if !cell.active {
            return Err(GridError::InactiveCell { x, y });
        }
        if cell.module.is_some() {
            return Err(GridError::CellOccupied { x, y });
        }
        cell.module = Some(key);
        Ok(())
    }

    /// Clears the module assignment at `(x, y)`, returning the evicted key.
    pub fn remove(&mut self, x: usize, y: usize) -> Result<Option<ModuleKey>, GridError> {
        let cell = self.cell_mut(x, y)?;
        Ok(cell.module.take())
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Positions of all occupied cells, in row-major order.
    pub fn occupied_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|c| c.is_occupied())
            .map(|c| (c.x, c.y))
            .collect()
    }

    /// Positions of all empty active cells, in row-major order.
    pub fn empty_active_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|c| c.is_empty_active())
            .map(|c| (c.x, c.y))
            .collect()
    }

    /// Number of active cells.
    pub fn active_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.active).count()
    }

    /// In-bounds orthogonal neighbors (up, down, left, right) of `(x, y)`.
    ///
    /// Diagonal cells never qualify for adjacency bonuses.
    pub fn orthogonal_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = &Cell> {
        const OFFSETS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
        OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.index(nx, ny).map(|i| &self.cells[i])
        })
    }

    /// Removes every module assignment while keeping cell flags intact.
    pub fn clear_placements(&mut self) {
        for cell in &mut self.cells {
            cell.module = None;
        }
    }

    /// Returns the first module key that appears in more than one cell, if any.
    ///
    /// A placement must be bijective onto the placed modules; a duplicate key
    /// indicates a broken invariant.
    pub fn find_duplicate_assignment(&self) -> Option<ModuleKey> {
        let mut seen = std::collections::HashSet::new();
        for cell in &self.cells {
            if let Some(key) = cell.module {
                if !seen.insert(key) {
                    return Some(key);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<ModuleKey> {
        let mut map: SlotMap<ModuleKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn new_grid_is_fully_active_and_empty() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.cells().count(), 6);
        assert!(grid.cells().all(|c| c.active && !c.supercharged));
        assert_eq!(grid.occupied_positions().len(), 0);
        assert_eq!(grid.empty_active_positions().len(), 6);
    }

    #[test]
    fn cell_access_out_of_bounds_fails() {
        let grid = Grid::new(2, 2);
        assert!(matches!(
            grid.cell(2, 0),
            Err(GridError::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(grid.cell(0, 5).is_err());
        assert!(grid.cell(1, 1).is_ok());
    }

    #[test]
    fn deactivating_a_cell_evicts_its_module() {
        let k = keys(1)[0];
        let mut grid = Grid::new(2, 2);
        grid.place(0, 0, k).unwrap();
        grid.set_cell_properties(0, 0, false, true).unwrap();

        let cell = grid.cell(0, 0).unwrap();
        assert!(!cell.active);
        assert!(!cell.supercharged, "inactive cell cannot stay supercharged");
        assert_eq!(cell.module, None);
    }

    #[test]
    fn place_rejects_inactive_and_occupied_cells() {
        let ks = keys(2);
        let mut grid = Grid::new(2, 1);
        grid.set_cell_properties(1, 0, false, false).unwrap();

        assert_eq!(
            grid.place(1, 0, ks[0]),
            Err(GridError::InactiveCell { x: 1, y: 0 })
        );
        grid.place(0, 0, ks[0]).unwrap();
        assert_eq!(
            grid.place(0, 0, ks[1]),
            Err(GridError::CellOccupied { x: 0, y: 0 })
        );
    }

    #[test]
    fn remove_returns_the_evicted_key() {
        let k = keys(1)[0];
        let mut grid = Grid::new(1, 1);
        grid.place(0, 0, k).unwrap();
        assert_eq!(grid.remove(0, 0).unwrap(), Some(k));
        assert_eq!(grid.remove(0, 0).unwrap(), None);
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let ks = keys(2);
        let mut original = Grid::new(2, 2);
        original.place(0, 0, ks[0]).unwrap();

        let mut copy = original.clone();
        copy.remove(0, 0).unwrap();
        copy.place(1, 1, ks[1]).unwrap();

        assert_eq!(original.cell(0, 0).unwrap().module, Some(ks[0]));
        assert_eq!(original.cell(1, 1).unwrap().module, None);
    }

    #[test]
    fn orthogonal_neighbors_exclude_diagonals_and_out_of_bounds() {
        let grid = Grid::new(3, 3);
        let corner: Vec<_> = grid
            .orthogonal_neighbors(0, 0)
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&(1, 0)));
        assert!(corner.contains(&(0, 1)));

        let center: Vec<_> = grid
            .orthogonal_neighbors(1, 1)
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(center.len(), 4);
        assert!(!center.contains(&(0, 0)), "diagonals must not qualify");
    }

    #[test]
    fn find_duplicate_assignment_detects_aliasing() {
        let k = keys(1)[0];
        let mut grid = Grid::new(2, 1);
        grid.place(0, 0, k).unwrap();
        assert_eq!(grid.find_duplicate_assignment(), None);
        grid.place(1, 0, k).unwrap();
        assert_eq!(grid.find_duplicate_assignment(), Some(k));
    }
}
