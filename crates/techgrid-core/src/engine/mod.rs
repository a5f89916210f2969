//! # Engine Module
//!
//! The stateful optimization core: solver configuration, candidate move
//! generation, and the annealing controller that drives the temperature
//! schedule, acceptance criterion, reheat-on-stagnation logic, and budget
//! enforcement.
//!
//! The engine never touches global state. The grid, the module catalog, the
//! scoring policy, and the random number generator are all passed in
//! explicitly, which keeps every run reproducible under a fixed seed.

pub(crate) mod anneal;
pub mod config;
pub mod error;
pub(crate) mod moves;
pub mod progress;
pub mod state;
