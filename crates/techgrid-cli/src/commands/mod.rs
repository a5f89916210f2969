pub mod score;
pub mod solve;
