//! Stops and stop-label resolution.
//!
//! Timetable rows label their stop with free text such as
//! "Leaves Portland Transportation Center". The label is reduced to a bare
//! stop name by stripping one known prefix, then looked up by exact name in
//! the [`StopDirectory`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Error returned when a stop record is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop: {reason}")]
pub struct InvalidStop {
    reason: &'static str,
}

/// A canonical stop identifier.
///
/// Never empty and never padded with whitespace.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id, rejecting empty or whitespace-padded values.
    pub fn parse(s: &str) -> Result<Self, InvalidStop> {
        if s.is_empty() {
            return Err(InvalidStop {
                reason: "stop id must not be empty",
            });
        }
        if s.trim() != s {
            return Err(InvalidStop {
                reason: "stop id must not have surrounding whitespace",
            });
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A geocoded stop from the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub stop_id: StopId,
    pub stop_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    /// Create a stop, rejecting an empty name.
    pub fn new(
        stop_id: StopId,
        stop_name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<Self, InvalidStop> {
        let stop_name = stop_name.into();
        if stop_name.trim().is_empty() {
            return Err(InvalidStop {
                reason: "stop name must not be empty",
            });
        }
        Ok(Self {
            stop_id,
            stop_name,
            lat,
            lon,
        })
    }
}

/// Prefixes a timetable puts before the stop name in a row label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelPrefix {
    Leaves,
    Arrives,
}

impl LabelPrefix {
    /// All recognized prefixes.
    pub const ALL: [LabelPrefix; 2] = [LabelPrefix::Leaves, LabelPrefix::Arrives];

    /// The literal text that starts a label, including the trailing space.
    pub fn text(&self) -> &'static str {
        match self {
            LabelPrefix::Leaves => "Leaves ",
            LabelPrefix::Arrives => "Arrives ",
        }
    }
}

/// Strip at most one known prefix from a row label.
///
/// Returns the prefix that was removed (if any) and the trimmed remainder.
///
/// # Examples
///
/// ```
/// use trip_scraper::domain::{LabelPrefix, strip_known_prefix};
///
/// assert_eq!(
///     strip_known_prefix("Leaves Downtown"),
///     (Some(LabelPrefix::Leaves), "Downtown")
/// );
/// assert_eq!(strip_known_prefix(" Airport "), (None, "Airport"));
/// ```
pub fn strip_known_prefix(label: &str) -> (Option<LabelPrefix>, &str) {
    let label = label.trim();
    for prefix in LabelPrefix::ALL {
        if let Some(rest) = label.strip_prefix(prefix.text()) {
            return (Some(prefix), rest.trim());
        }
    }
    (None, label)
}

/// Outcome of resolving a row label against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(StopId),
    Unresolved,
}

impl Resolution {
    /// Returns the resolved id, if any.
    pub fn stop_id(&self) -> Option<&StopId> {
        match self {
            Resolution::Resolved(id) => Some(id),
            Resolution::Unresolved => None,
        }
    }
}

/// Immutable name → stop lookup.
///
/// Built once before extraction and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    stops: Vec<Stop>,
    by_name: HashMap<String, usize>,
}

impl StopDirectory {
    /// Build a directory from stop records.
    ///
    /// When two stops share a name, the first one wins and the later names
    /// are returned as shadowed.
    pub fn new(stops: Vec<Stop>) -> (Self, Vec<String>) {
        let mut by_name = HashMap::with_capacity(stops.len());
        let mut shadowed = Vec::new();

        for (idx, stop) in stops.iter().enumerate() {
            if by_name.contains_key(&stop.stop_name) {
                shadowed.push(stop.stop_name.clone());
            } else {
                by_name.insert(stop.stop_name.clone(), idx);
            }
        }

        (Self { stops, by_name }, shadowed)
    }

    /// Look up a stop by its exact name.
    pub fn get_by_name(&self, name: &str) -> Option<&Stop> {
        self.by_name.get(name).map(|&idx| &self.stops[idx])
    }

    /// Returns true if the directory contains a stop with this id.
    #[cfg(test)]
    pub(crate) fn contains_id(&self, id: &StopId) -> bool {
        self.stops.iter().any(|s| &s.stop_id == id)
    }

    /// Resolve a free-text row label to a stop id.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_scraper::domain::{Resolution, Stop, StopDirectory, StopId};
    ///
    /// let id = StopId::parse("STOP-1").unwrap();
    /// let stop = Stop::new(id.clone(), "Downtown", 43.65, -70.26).unwrap();
    /// let (dir, _) = StopDirectory::new(vec![stop]);
    ///
    /// assert_eq!(dir.resolve_label("Leaves Downtown"), Resolution::Resolved(id));
    /// assert_eq!(dir.resolve_label("Leaves Uptown"), Resolution::Unresolved);
    /// ```
    pub fn resolve_label(&self, label: &str) -> Resolution {
        let (_, name) = strip_known_prefix(label);
        match self.get_by_name(name) {
            Some(stop) => Resolution::Resolved(stop.stop_id.clone()),
            None => Resolution::Unresolved,
        }
    }

    /// Number of stops in the directory.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the directory holds no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str) -> Stop {
        Stop::new(StopId::parse(id).unwrap(), name, 0.0, 0.0).unwrap()
    }

    fn directory() -> StopDirectory {
        StopDirectory::new(vec![
            stop("S-DT", "Downtown"),
            stop("S-AP", "Airport"),
            stop("S-SS", "South Station"),
        ])
        .0
    }

    #[test]
    fn stop_id_validation() {
        assert!(StopId::parse("STOP-1").is_ok());
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse(" STOP-1").is_err());
        assert!(StopId::parse("STOP-1\n").is_err());
    }

    #[test]
    fn stop_rejects_blank_name() {
        let id = StopId::parse("X").unwrap();
        assert!(Stop::new(id.clone(), "", 0.0, 0.0).is_err());
        assert!(Stop::new(id, "   ", 0.0, 0.0).is_err());
    }

    #[test]
    fn strip_leaves_and_arrives() {
        assert_eq!(
            strip_known_prefix("Leaves South Station"),
            (Some(LabelPrefix::Leaves), "South Station")
        );
        assert_eq!(
            strip_known_prefix("Arrives Airport"),
            (Some(LabelPrefix::Arrives), "Airport")
        );
    }

    #[test]
    fn strip_only_one_prefix() {
        assert_eq!(
            strip_known_prefix("Leaves Arrives Hall"),
            (Some(LabelPrefix::Leaves), "Arrives Hall")
        );
    }

    #[test]
    fn prefix_is_case_sensitive_and_needs_space() {
        assert_eq!(strip_known_prefix("leaves Downtown"), (None, "leaves Downtown"));
        assert_eq!(strip_known_prefix("LeavesDowntown"), (None, "LeavesDowntown"));
    }

    #[test]
    fn resolve_with_and_without_prefix() {
        let dir = directory();
        let dt = StopId::parse("S-DT").unwrap();
        assert_eq!(dir.resolve_label("Leaves Downtown"), Resolution::Resolved(dt.clone()));
        assert_eq!(dir.resolve_label("Downtown"), Resolution::Resolved(dt.clone()));
        assert_eq!(dir.resolve_label("  Arrives Downtown  "), Resolution::Resolved(dt));
    }

    #[test]
    fn resolve_is_exact_match() {
        let dir = directory();
        assert_eq!(dir.resolve_label("Leaves downtown"), Resolution::Unresolved);
        assert_eq!(dir.resolve_label("Leaves Downtown Plaza"), Resolution::Unresolved);
        assert_eq!(dir.resolve_label(""), Resolution::Unresolved);
    }

    #[test]
    fn duplicate_names_first_wins() {
        let (dir, shadowed) =
            StopDirectory::new(vec![stop("A", "Airport"), stop("B", "Airport")]);
        assert_eq!(shadowed, vec!["Airport".to_string()]);
        assert_eq!(dir.get_by_name("Airport").unwrap().stop_id.as_str(), "A");
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn contains_id() {
        let dir = directory();
        assert!(dir.contains_id(&StopId::parse("S-AP").unwrap()));
        assert!(!dir.contains_id(&StopId::parse("S-XX").unwrap()));
    }

    #[test]
    fn resolution_accessor() {
        let id = StopId::parse("S").unwrap();
        assert_eq!(Resolution::Resolved(id.clone()).stop_id(), Some(&id));
        assert_eq!(Resolution::Unresolved.stop_id(), None);
    }
}
