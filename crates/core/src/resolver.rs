//! Grid value resolver.
//!
//! Computes the displayed value of any cell in a season grid from the sparse
//! cell map alone. Each top-level call computes every formula cell it
//! touches at most once; nothing is kept between calls, so a resolver can be
//! shared freely between readers.
//!
//! Display rules:
//!
//! - Row 10 shows the column sum of weeks 1-10.
//! - Row 11 shows the same sum minus the two lowest non-blank weeks.
//! - Plain cells show their stored text.
//! - Formula cells expand `SUM(A1:A10)` ranges and `A1` references, then
//!   evaluate the remaining arithmetic. If that fails the raw formula text is
//!   shown instead.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::aggregate::aggregate;
use crate::cell::{format_number, number_or_zero, Cell, CellMap};
use crate::cell_key::{encode, parse_coordinates, DROPS_ROW, GRID_ROWS, TOTAL_ROW, WEEK_ROWS};
use crate::formula;

/// `SUM(<col><row>:<col><row>)` with single column letters, any case.
static SUM_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SUM\(([A-Z])(\d+):([A-Z])(\d+)\)").expect("valid regex"));

/// A single `<col><row>` reference, e.g. `B7`.
static CELL_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])(\d+)").expect("valid regex"));

/// Grid coordinate `(row, col)`.
type Coord = (u32, usize);

/// State of one top-level resolve.
///
/// `stack` holds the formulas currently being evaluated; `resolved` memoizes
/// finished formula cells so each is evaluated once.
#[derive(Debug, Default)]
struct Walk {
    stack: Vec<Coord>,
    resolved: HashMap<Coord, String>,
}

/// Resolves displayed values over a borrowed season cell map.
#[derive(Debug, Clone, Copy)]
pub struct GridResolver<'a> {
    cells: &'a CellMap,
}

impl<'a> GridResolver<'a> {
    pub fn new(cells: &'a CellMap) -> Self {
        Self { cells }
    }

    /// Displayed value of the cell at `(row, col)`.
    ///
    /// Never fails: missing cells resolve to `""` and formulas that cannot be
    /// evaluated resolve to their raw text.
    pub fn resolve(&self, row: u32, col: usize) -> String {
        self.resolve_at(row, col, &mut Walk::default())
    }

    /// Displayed value parsed as a number (unparsable → `0`).
    pub fn resolve_number(&self, row: u32, col: usize) -> f64 {
        number_or_zero(&self.resolve(row, col))
    }

    /// Resolve every row of the grid for columns `0..cols`.
    ///
    /// The outer vector is indexed by row, the inner by column.
    pub fn resolve_grid(&self, cols: usize) -> Vec<Vec<String>> {
        (0..GRID_ROWS)
            .map(|row| (0..cols).map(|col| self.resolve(row, col)).collect())
            .collect()
    }

    fn cell(&self, row: u32, col: usize) -> Option<&'a Cell> {
        self.cells.get(&encode(row, col))
    }

    // -- rules ------------------------------------------------------------

    fn resolve_at(&self, row: u32, col: usize, walk: &mut Walk) -> String {
        if row == TOTAL_ROW {
            return format_number(self.week_total(col, walk));
        }
        if row == DROPS_ROW {
            return format_number(self.week_drops(col, walk));
        }

        let Some(cell) = self.cell(row, col) else {
            return String::new();
        };
        if !cell.is_formula {
            return cell.value.clone();
        }

        if let Some(value) = walk.resolved.get(&(row, col)) {
            return value.clone();
        }
        // A formula reached again through its own ranges is a cycle.
        if walk.stack.contains(&(row, col)) {
            tracing::debug!(row, col, "Formula cycle detected, using raw text");
            return cell.value.clone();
        }
        walk.stack.push((row, col));
        let value = self.evaluate_formula(cell, walk);
        walk.stack.pop();
        walk.resolved.insert((row, col), value.clone());
        value
    }

    /// Numeric value of a stored cell, resolving formulas.
    fn stored_number(&self, row: u32, col: usize, cell: &Cell, walk: &mut Walk) -> f64 {
        if cell.is_formula {
            number_or_zero(&self.resolve_at(row, col, walk))
        } else {
            number_or_zero(&cell.value)
        }
    }

    /// Resolved numbers of the non-blank week cells in a column, in row order.
    fn week_values(&self, col: usize, walk: &mut Walk) -> Vec<f64> {
        let mut values = Vec::new();
        for row in 0..WEEK_ROWS {
            if let Some(cell) = self.cell(row, col) {
                if !cell.is_blank() {
                    values.push(self.stored_number(row, col, cell, walk));
                }
            }
        }
        values
    }

    fn week_total(&self, col: usize, walk: &mut Walk) -> f64 {
        self.week_values(col, walk).iter().sum()
    }

    fn week_drops(&self, col: usize, walk: &mut Walk) -> f64 {
        aggregate(&self.week_values(col, walk)).dropped
    }

    /// Sum of stored cells in `col` whose row lies in `start..=end`.
    fn range_sum(&self, start: u32, end: u32, col: usize, walk: &mut Walk) -> f64 {
        let mut sum = 0.0;
        for (key, cell) in self.cells {
            let Some((row, c)) = parse_coordinates(key) else {
                continue;
            };
            if c == col && (start..=end).contains(&row) {
                sum += self.stored_number(row, c, cell, walk);
            }
        }
        sum
    }

    // -- formulas ---------------------------------------------------------

    fn evaluate_formula(&self, cell: &Cell, walk: &mut Walk) -> String {
        let text = cell.value.trim();
        let body = text.strip_prefix('=').unwrap_or(text).trim();

        let expanded = SUM_RANGE_RE.replace_all(body, |caps: &Captures| {
            let (Some((start_row, start_col)), Some((end_row, end_col))) = (
                reference(&caps[1], &caps[2]),
                reference(&caps[3], &caps[4]),
            ) else {
                return "0".to_string();
            };
            if start_col != end_col {
                return "0".to_string();
            }
            format_number(self.range_sum(start_row, end_row, start_col, walk))
        });

        let substituted = CELL_REF_RE.replace_all(&expanded, |caps: &Captures| {
            let Some((row, col)) = reference(&caps[1], &caps[2]) else {
                return "0".to_string();
            };
            self.reference_value(row, col, walk)
        });

        match formula::evaluate(&substituted) {
            Ok(value) => format_number(value),
            Err(err) => {
                tracing::trace!(
                    formula = %cell.value,
                    error = %err,
                    "Formula fell back to raw text"
                );
                cell.value.clone()
            }
        }
    }

    /// Text substituted for a single-cell reference.
    ///
    /// Plain cells contribute their stored text; the aggregate rows are
    /// computed; references to other formula cells or empty coordinates
    /// become `0` (formulas are not chained through references).
    fn reference_value(&self, row: u32, col: usize, walk: &mut Walk) -> String {
        if let Some(cell) = self.cell(row, col) {
            if !cell.is_formula {
                return if cell.value.is_empty() {
                    "0".to_string()
                } else {
                    cell.value.clone()
                };
            }
        }
        match row {
            TOTAL_ROW => format_number(self.week_total(col, walk)),
            DROPS_ROW => format_number(self.week_drops(col, walk)),
            _ => "0".to_string(),
        }
    }
}

/// Convert a column letter (either case) and 1-based row number into a grid
/// coordinate.
fn reference(col_letter: &str, row_number: &str) -> Option<Coord> {
    let letter = col_letter.bytes().next()?.to_ascii_uppercase();
    let col = usize::from(letter.checked_sub(b'A')?);
    let row = row_number.parse::<u32>().ok()?.checked_sub(1)?;
    Some((row, col))
}
