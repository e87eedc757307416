//! Season aggregates: plain total and total with the two lowest weeks dropped.

use serde::Serialize;

/// Number of lowest weekly scores dropped from the drops total.
pub const DROPPED_WEEKS: usize = 2;

/// Aggregates for one player's weekly scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    /// Sum of all weekly scores.
    pub total: f64,
    /// `total` minus the two lowest scores, or `total` when fewer than two
    /// scores exist.
    pub dropped: f64,
}

/// Compute the aggregates for a clean list of numeric scores.
///
/// Callers filter out blank and unparsable entries before calling. Equal
/// values are interchangeable, so tie order does not matter.
pub fn aggregate(scores: &[f64]) -> Aggregate {
    let total: f64 = scores.iter().sum();

    if scores.len() < DROPPED_WEEKS {
        return Aggregate {
            total,
            dropped: total,
        };
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let lowest: f64 = sorted.iter().take(DROPPED_WEEKS).sum();

    Aggregate {
        total,
        dropped: total - lowest,
    }
}
