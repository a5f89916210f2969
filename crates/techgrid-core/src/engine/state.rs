use crate::core::models::grid::Grid;
use std::fmt;
use std::time::Duration;

/// Why the annealing controller stopped.
///
/// All three outcomes are normal completions. A timed-out or
/// budget-exhausted run still carries the best placement found so far;
/// the caller may re-invoke with a larger budget if desired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The temperature reached the stopping threshold.
    Converged,
    /// The wall-clock budget ran out.
    TimedOut,
    /// The hard iteration cap was reached.
    IterationBudgetExhausted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Converged => "converged",
            Outcome::TimedOut => "timed out",
            Outcome::IterationBudgetExhausted => "iteration budget exhausted",
        };
        f.write_str(s)
    }
}

/// A scored placement snapshot.
///
/// `best` solutions are only ever replaced wholesale, never mutated in
/// place, so they can never alias the controller's working grid.
#[derive(Debug, Clone)]
pub struct Solution {
    pub score: f64,
    pub grid: Grid,
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Default)]
pub struct SolveStats {
    /// Total move trials, including rejected and no-op steps.
    pub iterations: usize,
    /// Accepted moves (improving or Metropolis-accepted regressions).
    pub accepted_moves: usize,
    /// Moves that strictly improved on the best score.
    pub improving_moves: usize,
    /// Temperature steps completed.
    pub temperature_steps: usize,
    /// Reheats fired after stagnation.
    pub reheats: usize,
    /// Temperature when the run stopped.
    pub final_temperature: f64,
    /// Wall-clock time spent in the controller.
    pub elapsed: Duration,
    /// Best score sampled after each temperature step. Non-decreasing by
    /// construction; kept for diagnostics and regression tests.
    pub best_history: Vec<f64>,
}

/// Final result of a solve: the best placement found, its score, the reason
/// the run ended, and run statistics. Ownership transfers to the caller.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub grid: Grid,
    pub score: f64,
    pub outcome: Outcome,
    pub stats: SolveStats,
}
