//! Output sinks for docket records.
//!
//! Records are handed over one at a time, in table order, as soon as they are
//! merged. Nothing is buffered between rows.
//!
//! ## File Layout
//!
//! ```text
//! docket.csv    # docket_id,description,date,filer,file_url (no header, append-only)
//! ```

pub mod local;

use crate::error::Result;
use crate::models::DocketRecord;

// Re-export for convenience
pub use local::CsvFileSink;

/// Destination for merged records.
pub trait RecordSink {
    /// Persist one record.
    fn append(&mut self, record: &DocketRecord) -> Result<()>;
}

/// Sink collecting records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<DocketRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &DocketRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Sink printing one JSON object per line to a writer.
pub struct JsonLinesSink<W: std::io::Write> {
    writer: W,
}

impl<W: std::io::Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: std::io::Write> RecordSink for JsonLinesSink<W> {
    fn append(&mut self, record: &DocketRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.append(&DocketRecord {
            docket_id: Some("4567".to_string()),
            filer: Some("Acme Co".to_string()),
            ..DocketRecord::default()
        })
        .unwrap();
        sink.append(&DocketRecord::default()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"docket_id":"4567""#));
    }
}
