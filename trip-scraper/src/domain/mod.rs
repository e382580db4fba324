//! Domain types for timetable scraping.
//!
//! This module contains the validated types trip synthesis works with.
//! Identifiers and times enforce their invariants at construction time,
//! so code that receives these types can trust their validity.

mod direction;
mod grid;
mod route;
mod stop;
mod time;
mod trip;

pub use direction::{Direction, DirectionToken, EmptyDirectionToken};
pub use grid::{Cell, Row, ScheduleBlock};
pub use route::{BikesAllowed, InvalidRouteId, RouteContext, RouteId};
pub use stop::{
    InvalidStop, LabelPrefix, Resolution, Stop, StopDirectory, StopId, strip_known_prefix,
};
pub use time::{
    CellTime, ClockTime, PLACEHOLDER_GLYPHS, TimeError, has_departure, is_placeholder,
    normalize_cell,
};
pub use trip::{StopTime, Trip, TripSet, TripSetError, shape_id, trip_id};
