// src/pipeline/extract.rs

//! Docket extraction pipeline.

use scraper::Html;

use crate::error::Result;
use crate::models::{Config, SourceConfig};
use crate::services::{DocketMerger, LinkResolver, TableLocator, TablePath};
use crate::storage::RecordSink;
use crate::utils::http;

/// Summary of one extraction run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractOutcome {
    /// Data rows found in the docket table
    pub rows_total: usize,
    /// Records handed to the sink
    pub records_written: usize,
    /// Rows the merger refused
    pub rows_rejected: usize,
}

/// Fetch the configured page and append every record to `sink`.
pub async fn run_extract(
    config: &Config,
    client: &reqwest::Client,
    sink: &mut dyn RecordSink,
) -> Result<ExtractOutcome> {
    log::info!("Fetching docket page {}", config.source.start_url);
    let document = http::fetch_page(client, &config.source.start_url).await?;

    process_document(&document, &config.source, sink)
}

/// Parse `html` and append every record to `sink`.
pub fn process_html(
    html: &str,
    source: &SourceConfig,
    sink: &mut dyn RecordSink,
) -> Result<ExtractOutcome> {
    let document = Html::parse_document(html);
    process_document(&document, source, sink)
}

/// Merge the docket table rows of `document` into records, in table order.
///
/// Rows the merger rejects are logged, counted and skipped. Layout and
/// sink failures abort the run.
pub fn process_document(
    document: &Html,
    source: &SourceConfig,
    sink: &mut dyn RecordSink,
) -> Result<ExtractOutcome> {
    let locator = TableLocator::new(TablePath::from_config(source))?;
    let rows = locator.rows(document)?;
    log::info!("Found {} docket rows", rows.len());

    let mut merger = DocketMerger::new(LinkResolver::from_config(source)?);
    let mut outcome = ExtractOutcome {
        rows_total: rows.len(),
        ..ExtractOutcome::default()
    };

    for cells in &rows {
        match merger.push(cells) {
            Ok(record) => {
                sink.append(&record)?;
                outcome.records_written += 1;
            }
            Err(e) if e.is_row_error() => {
                log::error!("Skipping row: {e}");
                outcome.rows_rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::DocketRecord;
    use crate::storage::{CsvFileSink, MemorySink};

    const PAGE: &str = r#"
        <html><body>
          <table><tr><td>header</td></tr></table>
          <table><tr><td>menu</td></tr></table>
          <table>
            <tr><td>
              <table>
                <tr><th>Docket No.</th><th>Filed By</th><th>Description</th></tr>
                <tr>
                  <td rowspan="3"><a href="docs/4567.pdf">4567</a></td>
                  <td rowspan="2">Acme Co</td>
                  <td>Petition   filed 1/2/2021</td>
                </tr>
                <tr><td><a href="4568.html">4568</a></td><td>Response filed</td></tr>
                <tr><td>Beta LLC</td></tr>
                <tr>
                  <td>Division of <b>Public Utilities</b></td>
                  <td>Comments filed March 2, 2021</td>
                </tr>
              </table>
            </td></tr>
          </table>
        </body></html>
    "#;

    fn source() -> SourceConfig {
        SourceConfig {
            base_url: "http://example.org/eventsactions/".to_string(),
            ..SourceConfig::default()
        }
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_process_html_merges_rows() {
        let mut sink = MemorySink::new();
        let outcome = process_html(PAGE, &source(), &mut sink).unwrap();

        assert_eq!(
            outcome,
            ExtractOutcome {
                rows_total: 4,
                records_written: 4,
                rows_rejected: 0,
            }
        );

        let b = DocketRecord::new(
            some("4568"),
            some("Response filed"),
            None,
            some("Acme Co"),
            some("http://example.org/eventsactions/4568.html"),
        );
        assert_eq!(
            sink.records,
            vec![
                DocketRecord::new(
                    some("4567"),
                    some("Petition filed 1/2/2021"),
                    some("1/2/2021"),
                    some("Acme Co"),
                    some("http://example.org/eventsactions/docs/4567.pdf"),
                ),
                b.clone(),
                b.with_filer(some("Beta LLC")),
                DocketRecord::new(
                    some("4568"),
                    some("Comments filed March 2, 2021"),
                    some("3/2/2021"),
                    some("Division of Public Utilities"),
                    some("http://example.org/eventsactions/4568.html"),
                ),
            ]
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");

        process_html(PAGE, &source(), &mut CsvFileSink::new(&first, b',')).unwrap();
        process_html(PAGE, &source(), &mut CsvFileSink::new(&second, b',')).unwrap();

        let first = std::fs::read(first).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, std::fs::read(second).unwrap());
    }

    #[test]
    fn test_orphan_rows_are_skipped_and_counted() {
        let page = r#"
            <table></table><table></table>
            <table><tr><td><table>
              <tr><td>Orphan LLC</td></tr>
              <tr><td>10</td><td>Acme Co</td><td>Notice</td></tr>
              <tr><td>Beta LLC</td></tr>
            </table></td></tr></table>
        "#;
        let mut sink = MemorySink::new();
        let outcome = process_html(page, &source(), &mut sink).unwrap();

        assert_eq!(outcome.rows_total, 3);
        assert_eq!(outcome.records_written, 2);
        assert_eq!(outcome.rows_rejected, 1);
        assert_eq!(sink.records[1].filer.as_deref(), Some("Beta LLC"));
        assert_eq!(sink.records[1].docket_id.as_deref(), Some("10"));
    }

    /// Serve one HTTP response on a local port and return the page URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/eventsactions/docket.html")
    }

    fn config_for(start_url: String) -> Config {
        Config {
            source: SourceConfig {
                start_url,
                ..source()
            },
            ..Config::default()
        }
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn test_run_extract_fetches_and_merges() {
        let config = config_for(serve_once("200 OK", PAGE));
        let client = local_client();
        let mut sink = MemorySink::new();

        let outcome = run_extract(&config, &client, &mut sink).await.unwrap();

        assert_eq!(outcome.records_written, 4);
        assert_eq!(sink.records[2].filer.as_deref(), Some("Beta LLC"));
        assert_eq!(sink.records[2].docket_id.as_deref(), Some("4568"));
    }

    #[tokio::test]
    async fn test_run_extract_fails_on_error_status() {
        let config = config_for(serve_once("404 Not Found", "gone"));
        let client = local_client();
        let mut sink = MemorySink::new();

        let err = run_extract(&config, &client, &mut sink).await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        assert!(sink.records.is_empty());
    }

    #[test]
    fn test_layout_change_aborts() {
        let mut sink = MemorySink::new();
        let err = process_html("<table></table>", &source(), &mut sink).unwrap_err();
        assert!(matches!(err, AppError::TableNotFound { .. }));
        assert!(sink.records.is_empty());
    }
}
