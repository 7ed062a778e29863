// src/models/mod.rs

//! Domain models for the docket scraper.
//!
//! This module contains the record emitted per table row, the raw cell
//! handed to the extractors, and the application configuration.

mod cell;
mod config;
mod docket;

// Re-export all public types
pub use cell::Cell;
pub use config::{Config, CrawlerConfig, OutputConfig, SourceConfig};
pub use docket::DocketRecord;
