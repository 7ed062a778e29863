//! Local filesystem CSV sink.
//!
//! Every record is written with its own open-append-close cycle, so a run
//! that dies midway leaves only whole lines behind.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{DocketRecord, OutputConfig};
use crate::storage::RecordSink;

/// Append-only delimited file.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
    delimiter: u8,
}

impl CsvFileSink {
    /// Create a sink appending to `path`.
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    /// Create a sink from the output configuration.
    pub fn from_config(output: &OutputConfig) -> Result<Self> {
        Ok(Self::new(&output.path, output.delimiter_byte()?))
    }

    /// Target file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl RecordSink for CsvFileSink {
    fn append(&mut self, record: &DocketRecord) -> Result<()> {
        self.ensure_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, description: &str, filer: Option<&str>) -> DocketRecord {
        DocketRecord {
            docket_id: Some(id.to_string()),
            description: Some(description.to_string()),
            date: None,
            filer: filer.map(str::to_string),
            file_url: None,
        }
    }

    #[test]
    fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/docket.csv");
        let mut sink = CsvFileSink::new(&path, b',');

        sink.append(&record("4567", "Petition, amended", Some("Acme Co")))
            .unwrap();
        sink.append(&record("4568", "Said \"no\"", None)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "4567,\"Petition, amended\",,Acme Co,\n4568,\"Said \"\"no\"\"\",,,\n"
        );
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docket.csv");
        std::fs::write(&path, "1,old,,,\n").unwrap();

        let mut sink = CsvFileSink::new(&path, b'\t');
        sink.append(&record("2", "new entry", Some("Beta LLC")))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1,old,,,\n2\tnew entry\t\tBeta LLC\t\n");
    }

    #[test]
    fn test_from_config_rejects_bad_delimiter() {
        let output = OutputConfig {
            path: "docket.csv".to_string(),
            delimiter: "||".to_string(),
        };
        assert!(CsvFileSink::from_config(&output).is_err());
    }
}
