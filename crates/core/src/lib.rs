//! Domain logic for the putting-league scoreboard.
//!
//! The season grid is a sparse map of `"row-col"` keys to cells. Rows 0-9
//! hold weekly scores, row 10 the season total and row 11 the total with the
//! two lowest weeks dropped. This crate owns the mapping between that grid
//! and the relational score rows, the aggregate rules, the formula resolver
//! and the batch writer. It has no database or HTTP dependencies; storage is
//! reached through [`store::ScoreStore`].

pub mod aggregate;
pub mod batch;
pub mod cell;
pub mod cell_key;
pub mod error;
pub mod formula;
pub mod leaderboard;
pub mod resolver;
pub mod roster;
pub mod store;
pub mod types;
