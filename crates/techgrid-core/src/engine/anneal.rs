//! The annealing controller.
//!
//! State machine: `Initializing -> Running -> (Converged | TimedOut |
//! IterationBudgetExhausted) -> Done`. Initialization seeds the chain either
//! from the host grid's current placement or from a fresh randomized one;
//! Running repeatedly proposes moves, applies the Metropolis acceptance
//! criterion, cools geometrically, and reheats after stagnation. The exit
//! condition is recorded as the run's [`Outcome`].

use super::config::SolverParams;
use super::error::EngineError;
use super::moves::{self, Move};
use super::progress::{Progress, ProgressReporter};
use super::state::{Outcome, SolveStats, Solution};
use crate::core::models::catalog::ModuleCatalog;
use crate::core::models::grid::Grid;
use crate::core::scoring::policy::ScoringPolicy;
use crate::core::scoring::score_grid;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Instant;
use tracing::{debug, trace};

pub struct Annealer<'a> {
    catalog: &'a ModuleCatalog,
    policy: &'a ScoringPolicy,
    params: &'a SolverParams,
    reporter: &'a ProgressReporter<'a>,
}

impl<'a> Annealer<'a> {
    pub fn new(
        catalog: &'a ModuleCatalog,
        policy: &'a ScoringPolicy,
        params: &'a SolverParams,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            catalog,
            policy,
            params,
            reporter,
        }
    }

    /// Runs one complete annealing chain over `grid`.
    ///
    /// The input grid is consumed as the controller's working state. The
    /// returned solution's grid is an independent snapshot; scratch copies
    /// used for candidate evaluation never alias `current` or `best`.
    pub fn run<R: Rng>(
        &self,
        mut grid: Grid,
        rng: &mut R,
    ) -> Result<(Solution, Outcome, SolveStats), EngineError> {
        // --- Initializing ---
        if !self.params.seed_from_current_grid {
            seed_random_placement(&mut grid, self.catalog, rng);
        }
        let mut current_score = score_grid(&grid, self.catalog, self.policy);
        let mut current = grid;
        let mut best = Solution {
            score: current_score,
            grid: current.clone(),
        };
        debug!(score = current_score, "Initial placement scored.");

        let mut temperature = self.params.initial_temperature;
        let expected_steps = self.params.expected_temperature_steps();
        let started = Instant::now();
        let mut stats = SolveStats::default();
        let mut steps_without_improvement = 0usize;
        let mut step = 0usize;

        // --- Running ---
        let outcome = 'run: loop {
            if temperature <= self.params.stopping_temperature {
                break 'run Outcome::Converged;
            }
            if started.elapsed() >= self.params.max_processing_time {
                break 'run Outcome::TimedOut;
            }

            let swap_probability = self.swap_probability_at(step, expected_steps);
            let mut improved_this_step = false;

            for _ in 0..self.params.iterations_per_temperature {
                if self.params.max_iterations > 0
                    && stats.iterations >= self.params.max_iterations
                {
                    break 'run Outcome::IterationBudgetExhausted;
                }
                stats.iterations += 1;

                let Some(mv) = moves::propose(&current, swap_probability, rng) else {
                    // Occupancy cannot change without a move, so the rest of
                    // this temperature step would be no-ops too. The step
                    // still counts toward stagnation.
                    trace!(step, "No legal move available.");
                    break;
                };

                if let Some(new_score) =
                    self.evaluate(&mut current, mv, current_score, temperature, rng)
                {
                    current_score = new_score;
                    stats.accepted_moves += 1;

                    // Strict improvement only: ties keep the earliest best.
                    if current_score > best.score {
                        best = Solution {
                            score: current_score,
                            grid: current.clone(),
                        };
                        stats.improving_moves += 1;
                        improved_this_step = true;
                    }
                }
            }

            stats.temperature_steps += 1;
            step += 1;
            temperature *= self.params.cooling_rate;
            stats.best_history.push(best.score);

            if improved_this_step {
                steps_without_improvement = 0;
            } else {
                steps_without_improvement += 1;
                if self.params.max_steps_without_improvement > 0
                    && steps_without_improvement >= self.params.max_steps_without_improvement
                {
                    temperature *= self.params.reheat_factor;
                    steps_without_improvement = 0;
                    stats.reheats += 1;
                    debug!(temperature, "Reheated after stagnation.");
                }
            }

            if step % 10 == 0 {
                self.reporter.report(Progress::StatusUpdate {
                    text: format!("T: {:.2}, best: {:.2}", temperature, best.score),
                });
            }
        };

        // --- Done ---
        stats.final_temperature = temperature;
        stats.elapsed = started.elapsed();
        debug!(
            ?outcome,
            best = best.score,
            iterations = stats.iterations,
            reheats = stats.reheats,
            "Annealing finished."
        );
        Ok((best, outcome, stats))
    }

    /// Applies `mv` to a scratch clone and runs the Metropolis acceptance
    /// test. On acceptance, `current` is replaced by the candidate and the
    /// new score is returned.
    fn evaluate<R: Rng>(
        &self,
        current: &mut Grid,
        mv: Move,
        current_score: f64,
        temperature: f64,
        rng: &mut R,
    ) -> Option<f64> {
        let mut candidate = current.clone();
        moves::apply(&mut candidate, mv);
        let candidate_score = score_grid(&candidate, self.catalog, self.policy);

        let accept = if candidate_score >= current_score {
            true
        } else {
            let probability = ((candidate_score - current_score) / temperature).exp();
            rng.random::<f64>() < probability
        };

        if accept {
            *current = candidate;
            Some(candidate_score)
        } else {
            None
        }
    }

    /// Swap-vs-relocate mix, interpolated linearly over the expected cooling
    /// schedule length.
    fn swap_probability_at(&self, step: usize, expected_steps: usize) -> f64 {
        let fraction = (step as f64 / expected_steps as f64).min(1.0);
        self.params.initial_swap_probability
            + (self.params.final_swap_probability - self.params.initial_swap_probability) * fraction
    }
}

/// Clears the grid and places the catalog's active modules into randomly
/// chosen empty active cells. Modules that do not fit stay unplaced.
pub(crate) fn seed_random_placement<R: Rng>(
    grid: &mut Grid,
    catalog: &ModuleCatalog,
    rng: &mut R,
) -> usize {
    grid.clear_placements();
    let mut empty = grid.empty_active_positions();
    empty.shuffle(rng);

    let keys = catalog.active_keys();
    let mut placed = 0;
    for (key, (x, y)) in keys.into_iter().zip(empty) {
        // Both lists were derived from this grid, so placement cannot fail.
        if grid.place(x, y, key).is_ok() {
            placed += 1;
        }
    }
    debug!(placed, "Seeded random placement.");
    placed
}
