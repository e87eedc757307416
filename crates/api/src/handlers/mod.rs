pub mod cells;
pub mod seasons;
