//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?season=` selector. Missing or blank means the configured default season.
#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<String>,
}
