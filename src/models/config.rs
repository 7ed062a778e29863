//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the docket table lives and how to find it
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP client settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Self::require_absolute_url("source.start_url", &self.source.start_url)?;
        Self::require_absolute_url("source.base_url", &self.source.base_url)?;
        if self.source.link_extensions.is_empty() {
            return Err(AppError::validation("source.link_extensions is empty"));
        }
        if self
            .source
            .link_extensions
            .iter()
            .any(|ext| ext.trim().is_empty())
        {
            return Err(AppError::validation(
                "source.link_extensions contains an empty entry",
            ));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.output.path.trim().is_empty() {
            return Err(AppError::validation("output.path is empty"));
        }
        self.output.delimiter_byte()?;
        Ok(())
    }

    fn require_absolute_url(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(AppError::validation(format!("{field} is empty")));
        }
        Url::parse(value)
            .map(|_| ())
            .map_err(|e| AppError::validation(format!("{field} is not an absolute URL: {e}")))
    }
}

/// Location of the docket table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Page holding the docket table
    #[serde(default = "defaults::start_url")]
    pub start_url: String,

    /// Base for resolving relative document links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Index of the outer table among all tables in document order
    #[serde(default = "defaults::table_index")]
    pub table_index: usize,

    /// Index of the data table within the outer table (the outer table itself is 0)
    #[serde(default = "defaults::nested_table_index")]
    pub nested_table_index: usize,

    /// Link suffixes that count as documents
    #[serde(default = "defaults::link_extensions")]
    pub link_extensions: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            start_url: defaults::start_url(),
            base_url: defaults::base_url(),
            table_index: defaults::table_index(),
            nested_table_index: defaults::nested_table_index(),
            link_extensions: defaults::link_extensions(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File that records are appended to
    #[serde(default = "defaults::output_path")]
    pub path: String,

    /// Field delimiter, a single ASCII character
    #[serde(default = "defaults::delimiter")]
    pub delimiter: String,
}

impl OutputConfig {
    /// Delimiter as the byte the CSV writer expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(AppError::validation(format!(
                "output.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
            delimiter: defaults::delimiter(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn start_url() -> String {
        "http://www.ripuc.ri.gov/eventsactions/docket.html".into()
    }
    pub fn base_url() -> String {
        "http://www.ripuc.ri.gov/eventsactions/".into()
    }
    pub fn table_index() -> usize {
        2
    }
    pub fn nested_table_index() -> usize {
        1
    }
    pub fn link_extensions() -> Vec<String> {
        vec![".pdf".into(), ".html".into()]
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; docket-scraper/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Output defaults
    pub fn output_path() -> String {
        "docket.csv".into()
    }
    pub fn delimiter() -> String {
        ",".into()
    }
}
