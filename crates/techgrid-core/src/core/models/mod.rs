pub mod catalog;
pub mod cell;
pub mod grid;
pub mod ids;
pub mod module;
