//! Timetable time handling.
//!
//! Vendor timetables print departures as 12-hour clock text ("7:05") with
//! the meridiem marker ("AM"/"PM") in a separate element. This module turns
//! such a pair into a validated 24-hour [`ClockTime`], and classifies cells
//! that carry no departure at all.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Glyphs a timetable uses in a cell to mean "no service".
pub const PLACEHOLDER_GLYPHS: [&str; 3] = ["\u{2014}", "\u{2013}", "-"];

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A 24-hour wall-clock time with minute precision.
///
/// Always renders zero-padded, so the `Display` form sorts lexicographically
/// in the same order as the times themselves.
///
/// # Examples
///
/// ```
/// use trip_scraper::domain::ClockTime;
///
/// let t = ClockTime::parse_12h("7:05", "AM").unwrap();
/// assert_eq!(t.to_string(), "07:05");
/// assert_eq!(t.compact(), "0705");
///
/// let t = ClockTime::parse_12h("12:15", "PM").unwrap();
/// assert_eq!(t.to_string(), "12:15");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("hour or minute out of range"))
    }

    /// Parse a 12-hour clock value such as `"7:05"` with its meridiem marker.
    ///
    /// Hour and minute may each be one or two digits (`"7:5"` is 07:05), the
    /// hour in 1-12. The marker is case-insensitive and may be written
    /// `"AM"`, `"a.m."` or `"A"`. 12 AM is midnight, 12 PM is noon.
    pub fn parse_12h(text: &str, meridiem: &str) -> Result<Self, TimeError> {
        let marker = parse_meridiem(meridiem)?;

        let text = text.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit() || b == b':') {
            return Err(TimeError::new("expected H:MM format"));
        }

        NaiveTime::parse_from_str(&format!("{text}{marker}"), "%I:%M%p")
            .map(Self)
            .map_err(|_| TimeError::new("expected H:MM with hour 1-12 and minute 0-59"))
    }

    /// Parse a 24-hour `"HH:MM"` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_scraper::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    /// assert!(ClockTime::parse_hhmm("7:05").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 || s.as_bytes()[2] != b':' {
            return Err(TimeError::new("expected HH:MM format"));
        }
        let hour = parse_digits(&s[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute =
            parse_digits(&s[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        Self::from_hm(hour, minute)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// The time without its colon, as used inside trip identifiers.
    pub fn compact(&self) -> String {
        format!("{:02}{:02}", self.hour(), self.minute())
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl serde::Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a single timetable cell says about a departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellTime {
    /// The cell holds a real departure.
    Departure(ClockTime),
    /// Empty, placeholder, or missing its meridiem marker.
    NoDeparture,
    /// Looked like a departure but the text could not be parsed.
    Malformed(String),
}

impl CellTime {
    /// Returns the departure time, if any.
    pub fn departure(&self) -> Option<ClockTime> {
        match self {
            CellTime::Departure(t) => Some(*t),
            _ => None,
        }
    }
}

/// Returns true if the cell text is one of the "no service" glyphs.
pub fn is_placeholder(text: &str) -> bool {
    PLACEHOLDER_GLYPHS.contains(&text)
}

/// Returns true if a cell has the shape of a departure: non-empty,
/// non-placeholder text and a meridiem marker.
///
/// This does not parse the time; a cell passing this test may still turn
/// out to be [`CellTime::Malformed`].
pub fn has_departure(raw_text: &str, meridiem: Option<&str>) -> bool {
    let text = raw_text.trim();
    let marker = meridiem.map(str::trim).unwrap_or_default();
    !text.is_empty() && !is_placeholder(text) && !marker.is_empty()
}

/// Classify a timetable cell and normalize its departure time.
///
/// # Examples
///
/// ```
/// use trip_scraper::domain::{CellTime, ClockTime, normalize_cell};
///
/// let t = normalize_cell("7:05", Some("AM"));
/// assert_eq!(t, CellTime::Departure(ClockTime::from_hm(7, 5).unwrap()));
///
/// assert_eq!(normalize_cell("\u{2014}", Some("")), CellTime::NoDeparture);
/// assert_eq!(normalize_cell("3:00", None), CellTime::NoDeparture);
/// assert!(matches!(normalize_cell("noon", Some("PM")), CellTime::Malformed(_)));
/// ```
pub fn normalize_cell(raw_text: &str, meridiem: Option<&str>) -> CellTime {
    if !has_departure(raw_text, meridiem) {
        return CellTime::NoDeparture;
    }
    let marker = meridiem.map(str::trim).unwrap_or_default();
    match ClockTime::parse_12h(raw_text, marker) {
        Ok(t) => CellTime::Departure(t),
        Err(_) => CellTime::Malformed(format!("{}{}", raw_text.trim(), marker)),
    }
}

/// Normalize a meridiem marker to `"AM"` or `"PM"`.
fn parse_meridiem(marker: &str) -> Result<&'static str, TimeError> {
    let normalized: String = marker
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    match normalized.as_str() {
        "AM" | "A" => Ok("AM"),
        "PM" | "P" => Ok("PM"),
        _ => Err(TimeError::new("meridiem must be AM or PM")),
    }
}

/// Parse a short run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    #[test]
    fn parse_morning_times() {
        assert_eq!(ClockTime::parse_12h("7:05", "AM").unwrap(), hm(7, 5));
        assert_eq!(ClockTime::parse_12h("07:05", "AM").unwrap(), hm(7, 5));
        assert_eq!(ClockTime::parse_12h("11:59", "am").unwrap(), hm(11, 59));
    }

    #[test]
    fn parse_afternoon_times() {
        assert_eq!(ClockTime::parse_12h("1:30", "PM").unwrap(), hm(13, 30));
        assert_eq!(ClockTime::parse_12h("11:45", "p.m.").unwrap(), hm(23, 45));
    }

    #[test]
    fn noon_and_midnight() {
        assert_eq!(ClockTime::parse_12h("12:15", "PM").unwrap(), hm(12, 15));
        assert_eq!(ClockTime::parse_12h("12:00", "AM").unwrap(), hm(0, 0));
    }

    #[test]
    fn reject_invalid_12h() {
        assert!(ClockTime::parse_12h("0:30", "AM").is_err());
        assert!(ClockTime::parse_12h("13:00", "PM").is_err());
        assert!(ClockTime::parse_12h("7:60", "AM").is_err());
        assert!(ClockTime::parse_12h("705", "AM").is_err());
        assert!(ClockTime::parse_12h("7:", "AM").is_err());
        assert!(ClockTime::parse_12h("7:005", "AM").is_err());
        assert!(ClockTime::parse_12h("7:05", "XM").is_err());
        assert!(ClockTime::parse_12h("7:05", "").is_err());
        assert!(ClockTime::parse_12h("+7:05", "AM").is_err());
        assert!(ClockTime::parse_12h("7 :05", "AM").is_err());
    }

    #[test]
    fn single_digit_minute() {
        assert_eq!(ClockTime::parse_12h("7:5", "AM").unwrap(), hm(7, 5));
        assert_eq!(ClockTime::parse_12h("12:0", "PM").unwrap(), hm(12, 0));
        assert_eq!(normalize_cell("7:5", Some("AM")), CellTime::Departure(hm(7, 5)));
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(hm(7, 5).to_string(), "07:05");
        assert_eq!(hm(0, 0).to_string(), "00:00");
        assert_eq!(hm(23, 59).to_string(), "23:59");
    }

    #[test]
    fn compact_form() {
        assert_eq!(hm(7, 45).compact(), "0745");
        assert_eq!(hm(20, 5).compact(), "2005");
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", hm(8, 15)), "ClockTime(08:15)");
    }

    #[test]
    fn parse_hhmm_roundtrip() {
        assert_eq!(ClockTime::parse_hhmm("08:15").unwrap(), hm(8, 15));
        assert!(ClockTime::parse_hhmm("0815").is_err());
        assert!(ClockTime::parse_hhmm("08:1x").is_err());
    }

    #[test]
    fn normalize_departures() {
        assert_eq!(normalize_cell("7:05", Some("AM")), CellTime::Departure(hm(7, 5)));
        assert_eq!(normalize_cell(" 12:15 ", Some(" PM ")), CellTime::Departure(hm(12, 15)));
    }

    #[test]
    fn normalize_no_departure() {
        assert_eq!(normalize_cell("\u{2014}", Some("")), CellTime::NoDeparture);
        assert_eq!(normalize_cell("\u{2014}", Some("AM")), CellTime::NoDeparture);
        assert_eq!(normalize_cell("-", Some("PM")), CellTime::NoDeparture);
        assert_eq!(normalize_cell("", Some("AM")), CellTime::NoDeparture);
        assert_eq!(normalize_cell("3:00", None), CellTime::NoDeparture);
        assert_eq!(normalize_cell("3:00", Some("  ")), CellTime::NoDeparture);
    }

    #[test]
    fn normalize_malformed() {
        assert_eq!(
            normalize_cell("25:00", Some("PM")),
            CellTime::Malformed("25:00PM".to_string())
        );
        assert!(matches!(normalize_cell("TBD", Some("AM")), CellTime::Malformed(_)));
    }

    #[test]
    fn departure_accessor() {
        assert_eq!(CellTime::Departure(hm(9, 0)).departure(), Some(hm(9, 0)));
        assert_eq!(CellTime::NoDeparture.departure(), None);
        assert_eq!(CellTime::Malformed("x".into()).departure(), None);
    }

    #[test]
    fn serializes_as_hhmm_string() {
        let json = serde_json::to_string(&hm(6, 40)).unwrap();
        assert_eq!(json, "\"06:40\"");
    }
}
