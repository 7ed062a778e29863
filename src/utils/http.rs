// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use scraper::Html;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and parse it as HTML, failing on non-success status codes.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Html> {
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    log::debug!("Fetched {} bytes from {url}", text.len());
    Ok(Html::parse_document(&text))
}
