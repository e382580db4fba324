//! Extraction error types.
//!
//! None of these abort a page: each one costs at most a single block or a
//! single cell, and is reported with enough context to find it again.

/// Problems found while turning a page's schedule blocks into trips.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The page has no schedule blocks at all
    #[error("no schedule found on page")]
    NoScheduleFound,

    /// A schedule block lacks an element it needs
    #[error("block {block}: missing {what}")]
    StructureMissing { block: usize, what: &'static str },

    /// A cell had a meridiem marker but its time could not be parsed
    #[error("block {block} ({direction}) row {row} column {column}: unparseable time {text:?}")]
    CellParse {
        block: usize,
        direction: String,
        row: usize,
        column: usize,
        text: String,
    },
}
