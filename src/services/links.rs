// src/services/links.rs

//! Document link resolution.

use url::Url;

use crate::error::Result;
use crate::models::SourceConfig;

/// Turns cell anchors into absolute document URLs.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Url,
    extensions: Vec<String>,
}

impl LinkResolver {
    /// Create a resolver for the given base URL and accepted suffixes.
    pub fn new(base_url: &str, extensions: Vec<String>) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base_url)?,
            extensions,
        })
    }

    /// Create a resolver from the source configuration.
    pub fn from_config(source: &SourceConfig) -> Result<Self> {
        Self::new(&source.base_url, source.link_extensions.clone())
    }

    /// Absolute URL for `href`, or `None` when it is not a document link.
    ///
    /// The suffix check is case-sensitive.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if !self.is_document(href) {
            return None;
        }

        match self.base.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                log::debug!("Cannot resolve link {href:?} against {}: {e}", self.base);
                None
            }
        }
    }

    /// Resolve an optional anchor target.
    pub fn resolve_opt(&self, href: Option<&str>) -> Option<String> {
        href.and_then(|h| self.resolve(h))
    }

    fn is_document(&self, href: &str) -> bool {
        self.extensions.iter().any(|ext| href.ends_with(ext.as_str()))
    }
}
