// src/services/merge.rs

//! Row classifier and merger.
//!
//! The docket table uses `rowspan` cells, so a visual record is spread over
//! several `tr` elements with 3, 2 or 1 `td` children. Each row is classified
//! by its cell count and completed from the most recent docket row:
//!
//! | cells | first cell    | kind                            | inherits from last   |
//! |-------|---------------|---------------------------------|----------------------|
//! | 3     | any           | [`RowKind::Complete`]           | nothing              |
//! | 2     | docket number | [`RowKind::SharedFiler`]        | filer                |
//! | 2     | other text    | [`RowKind::AdditionalFiling`]   | id, link             |
//! | 1     | filer         | [`RowKind::AdditionalFiler`]    | everything but filer |
//!
//! Only `Complete` and `SharedFiler` rows replace the remembered record.

use crate::error::{AppError, Result};
use crate::models::{Cell, DocketRecord};
use crate::services::extract::{
    IdentifierCell, extract_description, extract_docket_id, extract_filer, extract_filing_date,
};
use crate::services::links::LinkResolver;

/// How a row relates to the docket above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Id, filer and description all present
    Complete,
    /// New docket number; the filer cell spans down from the row above
    SharedFiler,
    /// Same docket, another filer and description
    AdditionalFiling,
    /// Same docket and description, another filer
    AdditionalFiler,
}

impl RowKind {
    /// Whether rows of this kind start a docket later rows continue.
    pub fn opens_docket(self) -> bool {
        matches!(self, Self::Complete | Self::SharedFiler)
    }
}

/// A record built from one row, with the shape that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub record: DocketRecord,
    pub kind: RowKind,
}

/// Build the record for one row given the last docket-opening record.
///
/// `row` is only used for error reporting. Continuation rows with no `last`
/// are rejected rather than filled with guesses.
pub fn merge_row(
    last: Option<&DocketRecord>,
    cells: &[Cell],
    links: &LinkResolver,
    row: usize,
) -> Result<MergedRow> {
    let require_last = || {
        last.ok_or_else(|| AppError::OrphanRow {
            row,
            cells: cells.len(),
        })
    };

    let merged = match cells {
        [id_cell, filer_cell, desc_cell] => {
            let (description, date) = description_and_date(desc_cell);
            MergedRow {
                record: DocketRecord::new(
                    extract_docket_id(&id_cell.markup).into_identifier(),
                    description,
                    date,
                    extract_filer(&filer_cell.markup),
                    links.resolve_opt(id_cell.href.as_deref()),
                ),
                kind: RowKind::Complete,
            }
        }
        [first, desc_cell] => {
            let last = require_last()?;
            let (description, date) = description_and_date(desc_cell);

            match extract_docket_id(&first.markup) {
                IdentifierCell::Identifier(id) => MergedRow {
                    record: DocketRecord::new(
                        Some(id),
                        description,
                        date,
                        last.filer.clone(),
                        links.resolve_opt(first.href.as_deref()),
                    ),
                    kind: RowKind::SharedFiler,
                },
                IdentifierCell::NotIdentifier(_) | IdentifierCell::Empty => MergedRow {
                    record: DocketRecord::new(
                        last.docket_id.clone(),
                        description,
                        date,
                        extract_filer(&first.markup),
                        last.file_url.clone(),
                    ),
                    kind: RowKind::AdditionalFiling,
                },
            }
        }
        [filer_cell] => MergedRow {
            record: require_last()?.with_filer(extract_filer(&filer_cell.markup)),
            kind: RowKind::AdditionalFiler,
        },
        _ => {
            return Err(AppError::UnsupportedRow {
                row,
                cells: cells.len(),
            });
        }
    };

    Ok(merged)
}

fn description_and_date(cell: &Cell) -> (Option<String>, Option<String>) {
    let description = extract_description(&cell.markup);
    let date = description.as_deref().and_then(extract_filing_date);
    (description, date)
}

/// Sequential merger holding the single remembered record.
#[derive(Debug)]
pub struct DocketMerger {
    links: LinkResolver,
    last: Option<DocketRecord>,
    rows_seen: usize,
}

impl DocketMerger {
    /// Create a merger with no open docket.
    pub fn new(links: LinkResolver) -> Self {
        Self {
            links,
            last: None,
            rows_seen: 0,
        }
    }

    /// Merge the next row in document order.
    ///
    /// A rejected row leaves the remembered record untouched.
    pub fn push(&mut self, cells: &[Cell]) -> Result<DocketRecord> {
        let row = self.rows_seen;
        self.rows_seen += 1;

        let merged = merge_row(self.last.as_ref(), cells, &self.links, row)?;
        log::debug!(
            "Row {row}: {:?} -> docket {}",
            merged.kind,
            merged.record.docket_id.as_deref().unwrap_or("-")
        );

        if merged.kind.opens_docket() {
            self.last = Some(merged.record.clone());
        }
        Ok(merged.record)
    }

    /// The record continuation rows currently inherit from.
    pub fn last(&self) -> Option<&DocketRecord> {
        self.last.as_ref()
    }

    /// Number of rows pushed so far, rejected ones included.
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }
}
