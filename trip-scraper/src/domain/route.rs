//! Per-route configuration carried into every trip.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid route id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// A route identifier, used as the leading part of trip and shape ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id. It must be non-empty and free of whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        if s.is_empty() {
            return Err(InvalidRouteId {
                reason: "must not be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidRouteId {
                reason: "must not contain whitespace",
            });
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidRouteId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// GTFS `bikes_allowed` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BikesAllowed {
    #[default]
    NoInformation,
    Allowed,
    NotAllowed,
}

impl BikesAllowed {
    /// The numeric GTFS code.
    pub fn gtfs_code(&self) -> u8 {
        match self {
            BikesAllowed::NoInformation => 0,
            BikesAllowed::Allowed => 1,
            BikesAllowed::NotAllowed => 2,
        }
    }
}

impl Serialize for BikesAllowed {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.gtfs_code())
    }
}

/// Everything about a route that trip synthesis needs but the page
/// doesn't say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    pub route_id: RouteId,
    pub service_id: String,
    pub bikes_allowed: BikesAllowed,
}

impl RouteContext {
    /// Create a route context.
    pub fn new(route_id: RouteId, service_id: impl Into<String>, bikes_allowed: BikesAllowed) -> Self {
        Self {
            route_id,
            service_id: service_id.into(),
            bikes_allowed,
        }
    }
}
