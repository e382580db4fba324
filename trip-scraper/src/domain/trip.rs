//! Trip records and the run-wide trip collection.

use std::collections::HashSet;

use serde::Serialize;

use super::direction::{Direction, DirectionToken};
use super::route::{BikesAllowed, RouteContext, RouteId};
use super::stop::StopId;
use super::time::ClockTime;

/// One call of a trip at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopTime {
    pub time: ClockTime,
    pub stop_id: StopId,
}

impl StopTime {
    /// Create a stop time.
    pub fn new(time: ClockTime, stop_id: StopId) -> Self {
        Self { time, stop_id }
    }
}

/// Build the trip id `"{route}_{token}_{HHMM}"`.
pub fn trip_id(route_id: &RouteId, token: &DirectionToken, departure: ClockTime) -> String {
    format!("{}_{}_{}", route_id, token, departure.compact())
}

/// Build the shape id `"{route}_{token}"`.
pub fn shape_id(route_id: &RouteId, token: &DirectionToken) -> String {
    format!("{}_{}", route_id, token)
}

/// One scheduled run of a route in one direction.
///
/// Identifiers are derived from the route, direction token and departure
/// time, and `stop_times` is kept sorted by time, so neither can drift from
/// the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    route_id: RouteId,
    service_id: String,
    trip_id: String,
    trip_short_name: String,
    direction_id: Direction,
    shape_id: String,
    bikes_allowed: BikesAllowed,
    stop_times: Vec<StopTime>,
}

impl Trip {
    /// Create a trip, sorting its stop times.
    ///
    /// The sort is stable: two calls at the same minute keep row order.
    pub fn new(
        route: &RouteContext,
        token: &DirectionToken,
        departure: ClockTime,
        trip_short_name: impl Into<String>,
        mut stop_times: Vec<StopTime>,
    ) -> Self {
        stop_times.sort_by_key(|st| st.time);
        Self {
            route_id: route.route_id.clone(),
            service_id: route.service_id.clone(),
            trip_id: trip_id(&route.route_id, token, departure),
            trip_short_name: trip_short_name.into(),
            direction_id: token.direction(),
            shape_id: shape_id(&route.route_id, token),
            bikes_allowed: route.bikes_allowed,
            stop_times,
        }
    }

    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn trip_short_name(&self) -> &str {
        &self.trip_short_name
    }

    pub fn direction_id(&self) -> Direction {
        self.direction_id
    }

    pub fn shape_id(&self) -> &str {
        &self.shape_id
    }

    pub fn bikes_allowed(&self) -> BikesAllowed {
        self.bikes_allowed
    }

    /// Stop times, ascending by time.
    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }

    /// True when no row of the table contributed a stop time.
    pub fn is_empty(&self) -> bool {
        self.stop_times.is_empty()
    }
}

/// Errors from adding trips to a [`TripSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripSetError {
    /// A trip with this id is already in the set
    #[error("duplicate trip id: {0}")]
    DuplicateTripId(String),
}

/// Ordered trips with unique ids.
#[derive(Debug, Clone, Default)]
pub struct TripSet {
    trips: Vec<Trip>,
    ids: HashSet<String>,
}

impl TripSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trip, rejecting it if its id is already present.
    pub fn insert(&mut self, trip: Trip) -> Result<(), TripSetError> {
        if !self.ids.insert(trip.trip_id.clone()) {
            return Err(TripSetError::DuplicateTripId(trip.trip_id));
        }
        self.trips.push(trip);
        Ok(())
    }

    /// Returns true if a trip with this id is present.
    pub fn contains(&self, trip_id: &str) -> bool {
        self.ids.contains(trip_id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }
}

impl Serialize for TripSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.trips)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Whatever order stop times arrive in, the trip holds them sorted
        /// and their string forms sort the same way
        #[test]
        fn always_sorted(minutes in proptest::collection::vec(0u32..1440, 0..20)) {
            let route = RouteContext::new(RouteId::parse("R").unwrap(), "S", BikesAllowed::default());
            let token = DirectionToken::parse("EASTBOUND").unwrap();
            let stop_times: Vec<StopTime> = minutes
                .iter()
                .enumerate()
                .map(|(i, m)| StopTime::new(
                    ClockTime::from_hm(m / 60, m % 60).unwrap(),
                    StopId::parse(&format!("S{i}")).unwrap(),
                ))
                .collect();
            let trip = Trip::new(&route, &token, ClockTime::from_hm(0, 0).unwrap(), "T", stop_times);

            let rendered: Vec<String> = trip.stop_times().iter().map(|s| s.time.to_string()).collect();
            prop_assert!(rendered.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(rendered.len(), minutes.len());
        }
    }
}
