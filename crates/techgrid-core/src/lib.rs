//! # Techgrid Core Library
//!
//! A library for optimizing the placement of technology modules on bounded 2D
//! inventory grids, using simulated annealing over adjacency- and
//! supercharge-aware bonus scoring.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Grid`,
//!   `ModuleCatalog`), the pure scoring function and its policy constants
//!   (`scoring`), and I/O utilities for layout and catalog files.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer drives the optimization.
//!   It includes the solver configuration, the move generator producing candidate
//!   placement mutations, and the annealing controller that owns the temperature
//!   schedule, acceptance criterion, and best-so-far result.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the `engine` and `core` together to execute a complete solve:
//!   input validation, initial placement, annealing, and result finalization.

pub mod core;
pub mod engine;
pub mod workflows;
