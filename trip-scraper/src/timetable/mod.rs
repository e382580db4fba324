//! Table-to-trip synthesis.
//!
//! Given the schedule blocks of a route page, this module finds the real
//! departure columns, resolves each row's stop, and assembles one trip per
//! column. The work is pure and synchronous; fetching and HTML parsing
//! happen elsewhere.

mod assemble;
mod builder;
mod columns;
mod error;

pub use assemble::{BlockSource, PageTrips, TripSetAssembler};
pub use builder::TripBuilder;
pub use columns::{ValidColumn, valid_columns};
pub use error::ExtractError;
