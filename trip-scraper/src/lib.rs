//! Timetable scraper.
//!
//! Turns the schedule tables on a coach operator's route pages into
//! GTFS-style trip records: one trip per departure column, with ids derived
//! from the route, direction and departure time, and stop times resolved
//! against a geocoded stop directory.

pub mod config;
pub mod domain;
pub mod fetch;
pub mod html;
pub mod runner;
pub mod stops;
pub mod timetable;
