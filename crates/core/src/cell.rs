//! Wire representation of grid cells and the numeric conventions shared by
//! the resolver and the batch writer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single grid cell as exchanged with the UI.
///
/// Serialized as `{ "value": "...", "isFormula": bool }`. Both fields default
/// when missing so partially-filled edits still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_formula: bool,
}

impl Cell {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_formula: false,
        }
    }

    pub fn formula(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_formula: true,
        }
    }

    /// `true` when the stored text is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Sparse season grid keyed by `"row-col"`.
pub type CellMap = BTreeMap<String, Cell>;

/// Parse a cell value as a number.
///
/// Reads the longest leading decimal literal after any whitespace, so
/// `"12pts"` parses as `12`. Locale independent. Returns `None` when no digits
/// lead the text and for non-finite values.
pub fn parse_number(s: &str) -> Option<f64> {
    let text = s.trim_start();
    let len = numeric_prefix_len(text.as_bytes());
    if len == 0 {
        return None;
    }
    text[..len].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` literal, or `0`
/// when the text does not start with one.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(i);
    let mut has_digits = int_end > i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        if has_digits || frac_end > i + 1 {
            has_digits = true;
            i = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

/// Parse a cell value, treating anything unparsable as `0`.
pub fn number_or_zero(s: &str) -> f64 {
    parse_number(s).unwrap_or(0.0)
}

/// Format a number the way the grid displays it.
///
/// Integral values have no fractional part and negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
