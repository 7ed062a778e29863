// src/services/mod.rs

//! Row-level scraping services.
//!
//! - `table`: locate the docket table and split it into cells
//! - `extract`: pull normalized fields out of one cell
//! - `links`: resolve document links against the base URL
//! - `merge`: rebuild complete records from rows with spanning cells

pub mod extract;
pub mod links;
pub mod merge;
pub mod table;

pub use links::LinkResolver;
pub use merge::{DocketMerger, MergedRow, RowKind, merge_row};
pub use table::{TableLocator, TablePath};
