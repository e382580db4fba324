//! Schedule table extraction from route page HTML.
//!
//! Route pages carry one `div.schedule` per direction. Each holds a heading
//! whose `span.pre` names the direction, and a horizontal table with one
//! row per stop: a `td.stop-title` label cell followed by `td.cell` time
//! cells, where the time text is the cell's first text node and the
//! meridiem sits in a nested `span.am-pm`.

use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::domain::{Cell, DirectionToken, Row, ScheduleBlock};
use crate::timetable::{BlockSource, ExtractError};

/// Error building the selectors for a layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CSS selector {selector:?}: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

/// CSS selectors describing where a vendor page keeps its timetables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// One element per schedule block.
    pub block: String,
    /// Direction heading, relative to the block.
    pub direction: String,
    /// Schedule table, relative to the block.
    pub table: String,
    /// Stop rows, relative to the table.
    pub row: String,
    /// Row label cell, relative to the row.
    pub label: String,
    /// Cells of a row, relative to the row. The first match is the label
    /// cell and is skipped.
    pub cell: String,
    /// Meridiem marker, relative to the cell.
    pub meridiem: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            block: "div.schedule".to_string(),
            direction: "h2.schedule-name span.pre".to_string(),
            table: "table.schedule-table-horizontal.schedule-table".to_string(),
            row: "tbody tr".to_string(),
            label: "td.stop-title".to_string(),
            cell: "td.cell".to_string(),
            meridiem: "span.am-pm".to_string(),
        }
    }
}

/// Compiled selectors for a [`TableLayout`].
#[derive(Debug, Clone)]
pub struct TableExtractor {
    block: Selector,
    direction: Selector,
    table: Selector,
    row: Selector,
    label: Selector,
    cell: Selector,
    meridiem: Selector,
}

impl TableExtractor {
    /// Compile a layout's selectors.
    pub fn new(layout: &TableLayout) -> Result<Self, SelectorError> {
        Ok(Self {
            block: compile(&layout.block)?,
            direction: compile(&layout.direction)?,
            table: compile(&layout.table)?,
            row: compile(&layout.row)?,
            label: compile(&layout.label)?,
            cell: compile(&layout.cell)?,
            meridiem: compile(&layout.meridiem)?,
        })
    }

    /// Extract every schedule block from a page.
    ///
    /// A block missing its direction heading or its table comes back as
    /// [`ExtractError::StructureMissing`]; the other blocks are unaffected.
    pub fn extract(&self, document_text: &str) -> Vec<BlockSource> {
        let document = Html::parse_document(document_text);
        document
            .select(&self.block)
            .enumerate()
            .map(|(index, block)| self.extract_block(index, block))
            .collect()
    }

    fn extract_block(&self, index: usize, block: ElementRef<'_>) -> BlockSource {
        let heading = block
            .select(&self.direction)
            .next()
            .map(heading_text)
            .unwrap_or_default();
        let direction = DirectionToken::parse(&heading).map_err(|_| ExtractError::StructureMissing {
            block: index,
            what: "direction header",
        })?;

        let table = block
            .select(&self.table)
            .next()
            .ok_or(ExtractError::StructureMissing {
                block: index,
                what: "schedule table",
            })?;

        let rows = table.select(&self.row).map(|row| self.extract_row(row)).collect();

        Ok(ScheduleBlock::new(direction, rows))
    }

    fn extract_row(&self, row: ElementRef<'_>) -> Row {
        let label = row
            .select(&self.label)
            .next()
            .map(joined_text)
            .unwrap_or_default();

        let cells = row
            .select(&self.cell)
            .skip(1)
            .map(|cell| self.extract_cell(cell))
            .collect();

        Row::new(label, cells)
    }

    fn extract_cell(&self, cell: ElementRef<'_>) -> Cell {
        let raw_time_text = cell
            .children()
            .next()
            .and_then(|node| node.value().as_text().map(|t| t.trim().to_string()))
            .unwrap_or_default();

        let meridiem = cell
            .select(&self.meridiem)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        Cell {
            raw_time_text,
            meridiem,
        }
    }
}

/// Extract blocks using the default vendor layout.
pub fn extract_blocks(document_text: &str) -> Result<Vec<BlockSource>, SelectorError> {
    Ok(TableExtractor::new(&TableLayout::default())?.extract(document_text))
}

fn compile(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// An element's text nodes, trimmed and run together.
///
/// A heading split across tags (`<b>North</b><b>bound</b>`) reads as one
/// token.
fn heading_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// An element's text nodes, trimmed and joined with single spaces.
fn joined_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
