//! Schedule grids as extracted from a route page.
//!
//! These are short-lived values: built from one page, consumed by trip
//! synthesis, then dropped.

use super::direction::DirectionToken;
use super::time::{CellTime, normalize_cell};

/// One schedule cell: the time text and its separate meridiem marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub raw_time_text: String,
    pub meridiem: Option<String>,
}

impl Cell {
    /// Create a cell from its text and optional marker.
    pub fn new(raw_time_text: impl Into<String>, meridiem: Option<&str>) -> Self {
        Self {
            raw_time_text: raw_time_text.into(),
            meridiem: meridiem.map(str::to_string),
        }
    }

    /// Split combined text such as `"7:05AM"` into time and marker.
    ///
    /// Text without a trailing AM/PM becomes a cell with no marker.
    pub fn from_combined(text: &str) -> Self {
        let text = text.trim();
        let upper = text.to_ascii_uppercase();
        for marker in ["AM", "PM"] {
            if upper.ends_with(marker) {
                let split = text.len() - marker.len();
                return Self::new(text[..split].trim(), Some(&text[split..]));
            }
        }
        Self::new(text, None)
    }

    /// Classify and normalize this cell.
    pub fn time(&self) -> CellTime {
        normalize_cell(&self.raw_time_text, self.meridiem.as_deref())
    }
}

/// One stop row: its free-text label and one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row.
    pub fn new(label: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }

    /// Returns the cell at a column, if the row is long enough.
    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }
}

/// One direction's timetable on a route page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub direction: DirectionToken,
    pub rows: Vec<Row>,
}

impl ScheduleBlock {
    /// Create a block.
    pub fn new(direction: DirectionToken, rows: Vec<Row>) -> Self {
        Self { direction, rows }
    }

    /// Number of columns: the widest row decides, so ragged rows are
    /// treated as missing cells.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// The last row, whose label names the trip's terminal stop.
    pub fn last_row(&self) -> Option<&Row> {
        self.rows.last()
    }
}
