//! Spreadsheet classifier.
//!
//! Turns a loosely formatted personnel sheet into a [`Directory`]. There is no
//! header row or schema: column A decides what each row means.
//!
//! - A Roman numeral in column A starts a new unit named by column B.
//! - A number in column A is an employee of the current unit
//!   (B = full name, C = job title).
//! - Anything else is skipped.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use once_cell::sync::Lazy;
use regex::Regex;
use roster_types::{Directory, Employee};
use tracing::{debug, info};

use crate::{Result, RosterError};

/// Unit assigned to employees listed before any unit header.
pub const DEFAULT_UNIT_LABEL: &str = "Chưa phân loại";

/// Only the leading three columns carry meaning.
const SIGNIFICANT_COLUMNS: u32 = 3;

static ROMAN_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^M*(C[MD]|D?C{0,3})(X[CL]|L?X{0,3})(I[XV]|V?I{0,3})$")
        .expect("roman numeral pattern is valid")
});

/// Result of classifying a row grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub directory: Directory,
    /// Rows dropped for missing cells or an unrecognized column A.
    pub skipped: usize,
}

/// Row classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    default_unit: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_LABEL)
    }
}

impl Classifier {
    pub fn new(default_unit: impl Into<String>) -> Self {
        Self {
            default_unit: default_unit.into(),
        }
    }

    pub fn default_unit(&self) -> &str {
        &self.default_unit
    }

    /// Decode workbook bytes and classify the first sheet.
    pub fn load(&self, bytes: &[u8]) -> Result<Classification> {
        let rows = decode_workbook(bytes)?;
        Ok(self.classify(&rows))
    }

    /// Read a workbook from disk and classify the first sheet.
    pub fn load_file(&self, path: &Path) -> Result<Classification> {
        let bytes = std::fs::read(path)?;
        self.load(&bytes)
    }

    /// Classify a grid of rows. Never fails; bad rows are counted and dropped.
    pub fn classify<R, C>(&self, rows: &[R]) -> Classification
    where
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let mut directory = Directory::default();
        let mut skipped = 0;
        let mut current_unit = self.default_unit.clone();

        for row in rows {
            let row = row.as_ref();
            let cell = |i: usize| row.get(i).map(|c| c.as_ref().trim()).unwrap_or("");
            let (marker, name, title) = (cell(0), cell(1), cell(2));

            if marker.is_empty() || name.is_empty() {
                skipped += 1;
                continue;
            }

            if is_roman(marker) {
                current_unit = name.to_string();
                if !directory.units.iter().any(|u| u == name) {
                    directory.units.push(current_unit.clone());
                }
            } else if is_cardinal(marker) {
                directory.employees.push(Employee {
                    unit: current_unit.clone(),
                    serial: marker.to_string(),
                    full_name: name.to_string(),
                    job_title: title.to_string(),
                });
            } else {
                skipped += 1;
            }
        }

        debug!(
            target: "roster::classifier",
            "Classified {} rows: {} units, {} employees, {} skipped",
            rows.len(),
            directory.units.len(),
            directory.employees.len(),
            skipped
        );

        Classification { directory, skipped }
    }
}

/// Decode the first sheet of a workbook into rows of the leading cells.
///
/// Columns are taken from A regardless of where the sheet's used range starts.
fn decode_workbook(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| RosterError::Decode(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RosterError::Decode("workbook has no sheets".to_string()))?
        .map_err(|e| RosterError::Decode(e.to_string()))?;

    let rows = sheet_rows(&range);
    info!(target: "roster::classifier", "Decoded workbook: {} rows", rows.len());
    Ok(rows)
}

fn sheet_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (Some((first_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    (first_row..=last_row)
        .map(|r| {
            (0..SIGNIFICANT_COLUMNS)
                .map(|c| range.get_value((r, c)).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Whole floats print without a fraction, so 3.0 reads back as "3"
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Strict Roman numeral, case-insensitive.
fn is_roman(s: &str) -> bool {
    !s.is_empty() && ROMAN_NUMERAL.is_match(s)
}

/// Whether the string reads as a number.
///
/// Accepts signed decimals, exponents, `Infinity`, and `0x`/`0o`/`0b`
/// integer literals. Rejects `NaN` and anything with other characters.
fn is_cardinal(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return true;
    }

    unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && s.parse::<f64>().is_ok_and(|n| !n.is_nan())
}
