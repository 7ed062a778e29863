//! Docket record data structure.

use serde::{Deserialize, Serialize};

/// One docket entry reconstructed from a table row.
///
/// Field order is the output column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocketRecord {
    /// Numeric docket identifier
    pub docket_id: Option<String>,

    /// Whitespace-normalized description text
    pub description: Option<String>,

    /// Filing date as `month/day/year`
    pub date: Option<String>,

    /// Party that filed the entry
    pub filer: Option<String>,

    /// Absolute link to the associated document
    pub file_url: Option<String>,
}

impl DocketRecord {
    /// Build a record with every field given explicitly.
    pub fn new(
        docket_id: Option<String>,
        description: Option<String>,
        date: Option<String>,
        filer: Option<String>,
        file_url: Option<String>,
    ) -> Self {
        Self {
            docket_id,
            description,
            date,
            filer,
            file_url,
        }
    }

    /// Copy of this record with a different filer.
    pub fn with_filer(&self, filer: Option<String>) -> Self {
        Self {
            filer,
            ..self.clone()
        }
    }
}
