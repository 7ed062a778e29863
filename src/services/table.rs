// src/services/table.rs

//! Docket table locator.
//!
//! The page has no ids or classes on the docket table, so it is addressed by
//! position: the n-th `table` in the document, then the m-th table counting
//! that outer table itself and its nested tables in document order.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Cell, SourceConfig};

/// Position of the docket table within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePath {
    pub table_index: usize,
    pub nested_table_index: usize,
}

impl TablePath {
    /// Path taken from the source configuration.
    pub fn from_config(source: &SourceConfig) -> Self {
        Self {
            table_index: source.table_index,
            nested_table_index: source.nested_table_index,
        }
    }
}

/// Extracts data rows from a parsed page.
pub struct TableLocator {
    path: TablePath,
    table_sel: Selector,
    row_sel: Selector,
    cell_sel: Selector,
    anchor_sel: Selector,
}

impl TableLocator {
    /// Create a locator for the given table path.
    pub fn new(path: TablePath) -> Result<Self> {
        Ok(Self {
            path,
            table_sel: Self::parse_selector("table")?,
            row_sel: Self::parse_selector("tr")?,
            cell_sel: Self::parse_selector("td")?,
            anchor_sel: Self::parse_selector("a[href]")?,
        })
    }

    /// Find the docket table in `document`.
    pub fn locate<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>> {
        let outer = document
            .select(&self.table_sel)
            .nth(self.path.table_index)
            .ok_or_else(|| AppError::table_not_found("table", self.path.table_index))?;

        std::iter::once(outer)
            .chain(outer.select(&self.table_sel))
            .nth(self.path.nested_table_index)
            .ok_or_else(|| {
                AppError::table_not_found("nested table", self.path.nested_table_index)
            })
    }

    /// Data rows of the docket table in document order.
    ///
    /// Rows of tables nested deeper are excluded, as are rows without any
    /// `td` (header and spacer rows).
    pub fn rows(&self, document: &Html) -> Result<Vec<Vec<Cell>>> {
        let table = self.locate(document)?;
        let mut rows = Vec::new();

        for (index, row) in table
            .select(&self.row_sel)
            .filter(|row| Self::owning_table(row) == Some(table))
            .enumerate()
        {
            let cells: Vec<Cell> = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| self.cell_sel.matches(el))
                .map(|td| self.cell(td))
                .collect();

            if cells.is_empty() {
                log::debug!("Skipping table row {index}: no data cells");
                continue;
            }
            rows.push(cells);
        }

        Ok(rows)
    }

    fn cell(&self, td: ElementRef<'_>) -> Cell {
        Cell {
            markup: td.inner_html(),
            href: td
                .select(&self.anchor_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string),
        }
    }

    fn owning_table<'a>(row: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        row.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "table")
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
