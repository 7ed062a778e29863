// src/error.rs

//! Unified error handling for the docket scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The fixed structural path into the page no longer matches
    #[error("Page layout changed: no {what} at index {index}")]
    TableNotFound { what: String, index: usize },

    /// A continuation row arrived before any record was completed
    #[error("Row {row} ({cells} cell(s)) continues a docket, but no docket has been read yet")]
    OrphanRow { row: usize, cells: usize },

    /// A row shape the merger does not understand
    #[error("Row {row} has {cells} cell(s); expected 1 to 3")]
    UnsupportedRow { row: usize, cells: usize },

    /// A run finished but some rows could not be merged
    #[error("{0} row(s) could not be merged")]
    RowsRejected(usize),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a layout error for a missing table.
    pub fn table_not_found(what: impl Into<String>, index: usize) -> Self {
        Self::TableNotFound {
            what: what.into(),
            index,
        }
    }

    /// Whether this error only invalidates a single row.
    pub fn is_row_error(&self) -> bool {
        matches!(self, Self::OrphanRow { .. } | Self::UnsupportedRow { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_errors_are_classified() {
        assert!(AppError::OrphanRow { row: 0, cells: 1 }.is_row_error());
        assert!(AppError::UnsupportedRow { row: 3, cells: 4 }.is_row_error());
        assert!(!AppError::validation("missing").is_row_error());
        assert!(!AppError::RowsRejected(2).is_row_error());
    }

    #[test]
    fn test_rows_rejected_message() {
        assert_eq!(
            AppError::RowsRejected(3).to_string(),
            "3 row(s) could not be merged"
        );
    }

    #[test]
    fn test_orphan_row_message() {
        let err = AppError::OrphanRow { row: 0, cells: 2 };
        assert_eq!(
            err.to_string(),
            "Row 0 (2 cell(s)) continues a docket, but no docket has been read yet"
        );
    }
}
