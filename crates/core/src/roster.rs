//! Era rosters and the seeded season catalog.
//!
//! The column order of every season grid is fixed by the roster of the era
//! the season belongs to. Rosters are static league data, not computed, and
//! must match the seed rows in `db/migrations`.

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// Seasons played with the original six-player roster.
pub const EARLY_SEASONS: &[&str] = &["season1", "season2", "season3", "season4"];

/// Roster for seasons 1 through 4.
pub const EARLY_ROSTER: &[&str] = &["Hunter", "Trevor", "Konner", "Silas", "Jason", "Brad"];

/// Roster once Tyler joined (season 5 and any season without its own roster).
pub const LATE_ROSTER: &[&str] = &[
    "Hunter", "Trevor", "Konner", "Silas", "Jason", "Tyler", "Brad",
];

/// Season 6 roster (Graham joined).
pub const SEASON6_ROSTER: &[&str] = &[
    "Hunter", "Trevor", "Konner", "Silas", "Jason", "Graham", "Tyler", "Brad",
];

/// Season used when a request does not name one.
pub const DEFAULT_SEASON: &str = "season6";

/// Return the ordered player names for a season.
///
/// The index of a name is the grid column (and `season_players.display_order`)
/// of that player. Unknown season ids fall back to the late-era roster.
pub fn roster_for_season(season_id: &str) -> &'static [&'static str] {
    if season_id == "season6" {
        SEASON6_ROSTER
    } else if EARLY_SEASONS.contains(&season_id) {
        EARLY_ROSTER
    } else {
        LATE_ROSTER
    }
}

/// Column index of `player_name` in the season's roster.
pub fn column_of(season_id: &str, player_name: &str) -> Option<usize> {
    roster_for_season(season_id)
        .iter()
        .position(|name| *name == player_name)
}

// ---------------------------------------------------------------------------
// Season catalog
// ---------------------------------------------------------------------------

/// A seeded season definition.
pub struct SeasonDef {
    pub season_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// All seasons seeded by the initial migration.
pub const SEASONS: &[SeasonDef] = &[
    SeasonDef {
        season_id: "season1",
        title: "Season 1",
        description: "CHAMP: Hunter Thomas",
    },
    SeasonDef {
        season_id: "season2",
        title: "Season 2",
        description: "CHAMP: Hunter Thomas",
    },
    SeasonDef {
        season_id: "season3",
        title: "Season 3",
        description: "CHAMP: Hunter Thomas",
    },
    SeasonDef {
        season_id: "season4",
        title: "Season 4",
        description: "CHAMP: Trevor Staub",
    },
    SeasonDef {
        season_id: "season5",
        title: "Season 5",
        description: "CHAMP: Trevor Staub",
    },
    SeasonDef {
        season_id: "season6",
        title: "Season 6",
        description: "View Season 6",
    },
];
