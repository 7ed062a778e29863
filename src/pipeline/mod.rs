//! Pipeline entry points.
//!
//! - `run_extract`: fetch the docket page and append its records
//! - `process_html`: same extraction over already-loaded markup

pub mod extract;

pub use extract::{ExtractOutcome, process_document, process_html, run_extract};
