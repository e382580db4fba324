//! Departure column detection.
//!
//! A column is a real departure if any row, scanning top to bottom, holds a
//! parseable time in it. The first such time is the column's representative
//! departure and names the trip.

use crate::domain::{CellTime, ClockTime, ScheduleBlock};

/// A column that holds at least one departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidColumn {
    /// Zero-based column index, after the label column.
    pub index: usize,
    /// Row the representative departure came from.
    pub row: usize,
    /// Representative departure time.
    pub departure: ClockTime,
}

/// Find the columns that represent scheduled departures, in column order.
///
/// Cells that are empty, placeholders, missing a marker, or unparseable
/// are passed over; a column made only of such cells is excluded.
pub fn valid_columns(block: &ScheduleBlock) -> Vec<ValidColumn> {
    (0..block.column_count())
        .filter_map(|index| first_departure(block, index))
        .collect()
}

/// First departure in a column, scanning rows top to bottom.
fn first_departure(block: &ScheduleBlock, index: usize) -> Option<ValidColumn> {
    block.rows.iter().enumerate().find_map(|(row, r)| {
        let cell = r.cell(index)?;
        match cell.time() {
            CellTime::Departure(departure) => Some(ValidColumn {
                index,
                row,
                departure,
            }),
            CellTime::NoDeparture | CellTime::Malformed(_) => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, DirectionToken, Row};

    fn block(rows: &[(&str, &[&str])]) -> ScheduleBlock {
        ScheduleBlock::new(
            DirectionToken::parse("NORTHBOUND").unwrap(),
            rows.iter()
                .map(|(label, cells)| {
                    Row::new(*label, cells.iter().map(|c| Cell::from_combined(c)).collect())
                })
                .collect(),
        )
    }

    fn t(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn first_row_supplies_departures() {
        let b = block(&[("A", &["7:05AM", "9:00AM"]), ("B", &["7:45AM", "9:40AM"])]);
        let cols = valid_columns(&b);
        assert_eq!(
            cols,
            vec![
                ValidColumn { index: 0, row: 0, departure: t("07:05") },
                ValidColumn { index: 1, row: 0, departure: t("09:00") },
            ]
        );
    }

    #[test]
    fn gap_in_first_row_uses_later_row() {
        let b = block(&[
            ("Leaves Downtown", &["7:05AM", "\u{2014}"]),
            ("Arrives Airport", &["7:45AM", "8:15AM"]),
        ]);
        let cols = valid_columns(&b);
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[1], ValidColumn { index: 1, row: 1, departure: t("08:15") });
    }

    #[test]
    fn all_placeholder_column_excluded() {
        let b = block(&[
            ("A", &["7:05AM", "\u{2014}", "9:00AM"]),
            ("B", &["7:45AM", "", "9:40AM"]),
            ("C", &["8:00AM", "-", "10:00AM"]),
        ]);
        let indices: Vec<usize> = valid_columns(&b).iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn marker_required() {
        let b = block(&[("A", &["7:05"]), ("B", &["8:00"])]);
        assert!(valid_columns(&b).is_empty());
    }

    #[test]
    fn malformed_cell_skipped_for_representative() {
        let b = block(&[("A", &["99:99AM"]), ("B", &["8:00AM"])]);
        assert_eq!(
            valid_columns(&b),
            vec![ValidColumn { index: 0, row: 1, departure: t("08:00") }]
        );
    }

    #[test]
    fn ragged_rows_tolerated() {
        let b = block(&[("A", &["7:05AM"]), ("B", &["7:45AM", "8:15AM"])]);
        let cols = valid_columns(&b);
        assert_eq!(cols[1], ValidColumn { index: 1, row: 1, departure: t("08:15") });
    }

    #[test]
    fn empty_block_has_no_columns() {
        assert!(valid_columns(&block(&[])).is_empty());
    }
}
