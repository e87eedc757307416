//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Read-only listings take `&PgPool`; methods used by
//! [`crate::store::PgScoreStore`] take a `&mut PgConnection` so they can run
//! inside the store's transaction.

pub mod calculated_score_repo;
pub mod player_repo;
pub mod score_repo;
pub mod season_repo;
pub mod stats_repo;

pub use calculated_score_repo::CalculatedScoreRepo;
pub use player_repo::PlayerRepo;
pub use score_repo::ScoreRepo;
pub use season_repo::SeasonRepo;
pub use stats_repo::StatsRepo;
