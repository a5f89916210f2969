//! Stateless foundation layer: data models, scoring, and file I/O.

pub mod io;
pub mod models;
pub mod scoring;
