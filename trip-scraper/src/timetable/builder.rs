//! Trip synthesis for one schedule block.

use tracing::{trace, warn};

use crate::domain::{
    CellTime, Resolution, RouteContext, ScheduleBlock, StopDirectory, StopTime, Trip,
    strip_known_prefix,
};

use super::columns::ValidColumn;

/// Builds one trip per valid column of a block.
///
/// Row labels are resolved once up front and reused for every column.
pub struct TripBuilder<'a> {
    block: &'a ScheduleBlock,
    route: &'a RouteContext,
    resolutions: Vec<Resolution>,
    short_name: String,
}

impl<'a> TripBuilder<'a> {
    /// Prepare a builder for a block.
    pub fn new(block: &'a ScheduleBlock, route: &'a RouteContext, directory: &StopDirectory) -> Self {
        let resolutions = block
            .rows
            .iter()
            .map(|row| directory.resolve_label(&row.label))
            .collect();

        Self {
            block,
            route,
            resolutions,
            short_name: short_name(block),
        }
    }

    /// Row resolutions, in row order.
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// The terminal stop name shared by every trip of the block.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Build the trip for one column.
    ///
    /// Rows that don't resolve to a stop, and cells without a departure,
    /// contribute nothing. The result may therefore have fewer stop times
    /// than the table has rows, or none at all.
    pub fn build(&self, column: &ValidColumn) -> Trip {
        let stop_times: Vec<StopTime> = self
            .block
            .rows
            .iter()
            .zip(&self.resolutions)
            .filter_map(|(row, resolution)| {
                let stop_id = resolution.stop_id()?;
                match row.cell(column.index)?.time() {
                    CellTime::Departure(time) => Some(StopTime::new(time, stop_id.clone())),
                    CellTime::NoDeparture | CellTime::Malformed(_) => None,
                }
            })
            .collect();

        let trip = Trip::new(
            self.route,
            &self.block.direction,
            column.departure,
            self.short_name.clone(),
            stop_times,
        );

        if trip.is_empty() {
            warn!(
                trip_id = trip.trip_id(),
                column = column.index,
                "trip has no stop times; no row resolved to a known stop with a departure"
            );
        } else {
            trace!(
                trip_id = trip.trip_id(),
                stops = trip.stop_times().len(),
                "built trip"
            );
        }

        trip
    }
}

/// The last row's label with any known prefix removed.
///
/// Purely textual: the name does not need to be in the stop directory.
fn short_name(block: &ScheduleBlock) -> String {
    block
        .last_row()
        .map(|row| strip_known_prefix(&row.label).1.to_string())
        .unwrap_or_default()
}
