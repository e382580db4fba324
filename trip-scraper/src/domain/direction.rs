//! Schedule direction tokens and their inbound/outbound classification.

use std::fmt;

use serde::Serialize;

/// Error returned when a direction token is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("direction token must not be empty")]
pub struct EmptyDirectionToken;

/// The heading printed above a schedule block, e.g. "NORTHBOUND".
///
/// Stored trimmed and upper-cased; never empty.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DirectionToken(String);

impl DirectionToken {
    /// Normalize a raw heading into a token.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_scraper::domain::DirectionToken;
    ///
    /// let t = DirectionToken::parse("  Southbound ").unwrap();
    /// assert_eq!(t.as_str(), "SOUTHBOUND");
    /// assert!(DirectionToken::parse("   ").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, EmptyDirectionToken> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmptyDirectionToken);
        }
        Ok(Self(s.to_uppercase()))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the token as inbound or outbound.
    pub fn direction(&self) -> Direction {
        Direction::classify(&self.0)
    }
}

impl fmt::Debug for DirectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectionToken({})", self.0)
    }
}

impl fmt::Display for DirectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// GTFS `direction_id` for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// Classify a heading.
    ///
    /// Southbound and eastbound legs leave the service region, so any token
    /// mentioning SOUTH or EAST is outbound. Everything else is inbound.
    /// This is a regional heuristic, not a general rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_scraper::domain::Direction;
    ///
    /// assert_eq!(Direction::classify("NORTHBOUND"), Direction::Inbound);
    /// assert_eq!(Direction::classify("SOUTHBOUND"), Direction::Outbound);
    /// assert_eq!(Direction::classify("EASTBOUND EXPRESS"), Direction::Outbound);
    /// assert_eq!(Direction::classify("WESTBOUND"), Direction::Inbound);
    /// ```
    pub fn classify(token: &str) -> Self {
        let token = token.to_uppercase();
        if token.contains("SOUTH") || token.contains("EAST") {
            Direction::Outbound
        } else {
            Direction::Inbound
        }
    }

    /// The numeric GTFS code.
    pub fn gtfs_code(&self) -> u8 {
        match self {
            Direction::Outbound => 0,
            Direction::Inbound => 1,
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.gtfs_code())
    }
}
