//! Row structs for the scoreboard tables.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the table, plus joined read shapes used by the repositories.

pub mod calculated_score;
pub mod player;
pub mod score;
pub mod season;
pub mod stats;
