//! Page-level assembly: every block of a route page into one trip list.

use tracing::{debug, warn};

use crate::domain::{CellTime, RouteContext, ScheduleBlock, StopDirectory, Trip};

use super::builder::TripBuilder;
use super::columns::valid_columns;
use super::error::ExtractError;

/// A block as handed over by table extraction: either a usable grid or
/// the reason it couldn't be read.
pub type BlockSource = Result<ScheduleBlock, ExtractError>;

/// Trips and problems from one route page.
#[derive(Debug, Clone, Default)]
pub struct PageTrips {
    /// Trips in block order, then column order.
    pub trips: Vec<Trip>,
    /// Block- and cell-level problems. None of them stopped the page.
    pub issues: Vec<ExtractError>,
}

/// Turns a page's schedule blocks into trips for one route.
///
/// Holds the route's configuration and the shared stop directory, so one
/// assembler serves every page of its route.
#[derive(Debug, Clone, Copy)]
pub struct TripSetAssembler<'a> {
    route: &'a RouteContext,
    directory: &'a StopDirectory,
}

impl<'a> TripSetAssembler<'a> {
    /// Create an assembler for a route.
    pub fn new(route: &'a RouteContext, directory: &'a StopDirectory) -> Self {
        Self { route, directory }
    }

    /// Assemble every block on a page.
    ///
    /// A missing block structure skips that block; unparseable cells skip
    /// that cell. Both are recorded in [`PageTrips::issues`].
    pub fn assemble(&self, blocks: Vec<BlockSource>) -> PageTrips {
        let mut page = PageTrips::default();

        if blocks.is_empty() {
            warn!(route_id = %self.route.route_id, "no schedule blocks found on page");
            page.issues.push(ExtractError::NoScheduleFound);
            return page;
        }

        for (index, source) in blocks.into_iter().enumerate() {
            match source {
                Ok(block) => self.assemble_block(index, &block, &mut page),
                Err(e) => {
                    warn!(route_id = %self.route.route_id, block = index, "skipping block: {e}");
                    page.issues.push(e);
                }
            }
        }

        page
    }

    fn assemble_block(&self, index: usize, block: &ScheduleBlock, page: &mut PageTrips) {
        for issue in malformed_cells(index, block) {
            warn!(route_id = %self.route.route_id, "{issue}");
            page.issues.push(issue);
        }

        let columns = valid_columns(block);
        debug!(
            route_id = %self.route.route_id,
            block = index,
            direction = %block.direction,
            columns = columns.len(),
            rows = block.rows.len(),
            "assembling block"
        );

        let builder = TripBuilder::new(block, self.route, self.directory);
        page.trips
            .extend(columns.iter().map(|column| builder.build(column)));
    }
}

/// Every cell in the block that looked like a departure but didn't parse.
fn malformed_cells(index: usize, block: &ScheduleBlock) -> Vec<ExtractError> {
    let mut issues = Vec::new();
    for (row_idx, row) in block.rows.iter().enumerate() {
        for (column, cell) in row.cells.iter().enumerate() {
            if let CellTime::Malformed(text) = cell.time() {
                issues.push(ExtractError::CellParse {
                    block: index,
                    direction: block.direction.to_string(),
                    row: row_idx,
                    column,
                    text,
                });
            }
        }
    }
    issues
}
