use crate::core::models::grid::Grid;
use rand::Rng;

/// A candidate placement mutation.
///
/// Moves are described by coordinates only; applying one touches exactly the
/// named cells, so a move can be evaluated on a scratch clone of the grid
/// without aliasing the controller's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange the module assignments of two occupied cells.
    Swap {
        a: (usize, usize),
        b: (usize, usize),
    },
    /// Move a module from an occupied cell to an empty active cell.
    Relocate {
        from: (usize, usize),
        to: (usize, usize),
    },
}

/// Proposes one candidate move, or `None` when the grid admits no move at all.
///
/// Swap vs. relocate is decided by `swap_probability`; the controller
/// interpolates that probability over the run. Degenerate grids fall back to
/// whichever move family remains legal: fewer than two occupied cells forces
/// relocates, no empty active cell forces swaps, and a grid with neither
/// yields `None` (a no-op step that counts toward stagnation).
pub fn propose<R: Rng>(grid: &Grid, swap_probability: f64, rng: &mut R) -> Option<Move> {
    let occupied = grid.occupied_positions();
    if occupied.is_empty() {
        return None;
    }
    let empty = grid.empty_active_positions();

    let can_swap = occupied.len() >= 2;
    let can_relocate = !empty.is_empty();

    let swap = match (can_swap, can_relocate) {
        (false, false) => return None,
        (true, false) => true,
        (false, true) => false,
        (true, true) => rng.random::<f64>() < swap_probability,
    };

    if swap {
        let i = rng.random_range(0..occupied.len());
        let mut j = rng.random_range(0..occupied.len() - 1);
        if j >= i {
            j += 1;
        }
        Some(Move::Swap {
            a: occupied[i],
            b: occupied[j],
        })
    } else {
        let from = occupied[rng.random_range(0..occupied.len())];
        let to = empty[rng.random_range(0..empty.len())];
        Some(Move::Relocate { from, to })
    }
}

/// Applies a move to `grid`. The move must have been proposed against a grid
/// with the same occupancy, which the controller guarantees.
pub fn apply(grid: &mut Grid, mv: Move) {
    match mv {
        Move::Swap { a, b } => {
            let ka = grid.cell(a.0, a.1).map(|c| c.module).unwrap_or(None);
            let kb = grid.cell(b.0, b.1).map(|c| c.module).unwrap_or(None);
            if let Ok(cell) = grid.cell_mut(a.0, a.1) {
                cell.module = kb;
            }
            if let Ok(cell) = grid.cell_mut(b.0, b.1) {
                cell.module = ka;
            }
        }
        Move::Relocate { from, to } => {
            let key = grid.cell_mut(from.0, from.1).ok().and_then(|c| c.module.take());
            if let (Some(key), Ok(cell)) = (key, grid.cell_mut(to.0, to.1)) {
                cell.module = Some(key);
            }
        }
    }
}
