//! Cell-key codec.
//!
//! The score grid addresses cells with `"row-col"` keys. Rows 0-9 are weeks
//! 1-10, row 10 is the season total and row 11 is the total with the two
//! lowest weeks dropped. The column is the player's index in the season's
//! era roster (see [`crate::roster`]).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roster::roster_for_season;

// ---------------------------------------------------------------------------
// Grid layout constants
// ---------------------------------------------------------------------------

/// Number of weekly rows in a season grid.
pub const WEEK_ROWS: u32 = 10;

/// Row holding the season total.
pub const TOTAL_ROW: u32 = 10;

/// Row holding the total minus the two lowest weeks.
pub const DROPS_ROW: u32 = 11;

/// Total number of rows rendered for a season.
pub const GRID_ROWS: u32 = 12;

// ---------------------------------------------------------------------------
// Calculation types
// ---------------------------------------------------------------------------

/// The two derived aggregates stored in `calculated_scores`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    Total,
    TotalMinusTwoLowest,
}

impl CalculationType {
    pub const ALL: [CalculationType; 2] =
        [CalculationType::Total, CalculationType::TotalMinusTwoLowest];

    /// Value stored in the `calculation_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::TotalMinusTwoLowest => "total_minus_two_lowest",
        }
    }

    /// Parse a `calculation_type` column value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "total" => Some(Self::Total),
            "total_minus_two_lowest" => Some(Self::TotalMinusTwoLowest),
            _ => None,
        }
    }

    /// Grid row that displays this aggregate.
    pub fn row(self) -> u32 {
        match self {
            Self::Total => TOTAL_ROW,
            Self::TotalMinusTwoLowest => DROPS_ROW,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoded addresses
// ---------------------------------------------------------------------------

/// What a grid row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A weekly score, 1-based week number.
    Week(u8),
    /// The `total` aggregate row.
    Total,
    /// The `total_minus_two_lowest` aggregate row.
    TotalMinusTwoLowest,
    /// Any row past the aggregate rows. Decodes, but maps to nothing stored.
    Unclassified,
}

impl RowKind {
    pub fn from_row(row: u32) -> Self {
        match row {
            r if r < WEEK_ROWS => RowKind::Week((r + 1) as u8),
            TOTAL_ROW => RowKind::Total,
            DROPS_ROW => RowKind::TotalMinusTwoLowest,
            _ => RowKind::Unclassified,
        }
    }

    /// The aggregate this row displays, if any.
    pub fn calculation_type(self) -> Option<CalculationType> {
        match self {
            RowKind::Total => Some(CalculationType::Total),
            RowKind::TotalMinusTwoLowest => Some(CalculationType::TotalMinusTwoLowest),
            _ => None,
        }
    }
}

/// A cell key resolved against a season roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddress {
    pub row: u32,
    pub col: usize,
    pub player_name: &'static str,
    pub kind: RowKind,
}

impl CellAddress {
    pub fn week(&self) -> Option<u8> {
        match self.kind {
            RowKind::Week(w) => Some(w),
            _ => None,
        }
    }

    pub fn is_total(&self) -> bool {
        self.kind == RowKind::Total
    }

    pub fn is_total_minus_two_lowest(&self) -> bool {
        self.kind == RowKind::TotalMinusTwoLowest
    }

    pub fn key(&self) -> String {
        encode(self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Build the `"row-col"` key for a grid coordinate.
pub fn encode(row: u32, col: usize) -> String {
    format!("{row}-{col}")
}

/// Split a `"row-col"` key into its coordinates without consulting a roster.
pub fn parse_coordinates(cell_key: &str) -> Option<(u32, usize)> {
    let (row, col) = cell_key.split_once('-')?;
    let row = row.trim().parse::<u32>().ok()?;
    let col = col.trim().parse::<usize>().ok()?;
    Some((row, col))
}

/// Decode a cell key for the given season.
///
/// Fails with [`CoreError::MalformedKey`] when either part is not a
/// non-negative integer or the column is outside the season's roster.
pub fn decode(cell_key: &str, season_id: &str) -> Result<CellAddress, CoreError> {
    let (row, col) = parse_coordinates(cell_key)
        .ok_or_else(|| CoreError::MalformedKey(format!("'{cell_key}' is not <row>-<col>")))?;

    let roster = roster_for_season(season_id);
    let player_name = roster.get(col).copied().ok_or_else(|| {
        CoreError::MalformedKey(format!(
            "'{cell_key}': column {col} is outside the {}-player roster of {season_id}",
            roster.len()
        ))
    })?;

    Ok(CellAddress {
        row,
        col,
        player_name,
        kind: RowKind::from_row(row),
    })
}
