//! Core data model types for report parsing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// A single unparsed CSV row: ordered text fields.
pub type RawRow = Vec<String>;

/// Datetime layout of the `created` column. Fractional seconds are optional when parsing.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A validated report row.
///
/// Every `Record` handed out by the parser has a parsed `dealer_code` and `created`; the
/// remaining fields are passed through verbatim and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub vin: String,
    pub dealer_code: u64,
    pub created: NaiveDateTime,
    pub overall_severity: String,
    pub delivery_status: String,
    pub lead_id: String,
}

/// Diagnostic for a data row that was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based record index, counting the header as row 1.
    ///
    /// This is not a source line number: blank lines and multi-line quoted fields are not
    /// counted.
    pub row: usize,
    /// VIN of the dropped row, empty if the row had none.
    pub vin: String,
    /// Every field of the row that failed coercion.
    pub errors: Vec<FieldError>,
}

/// Output of a successful parse: kept records plus diagnostics for dropped rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    /// Valid records, in input order.
    pub records: Vec<Record>,
    /// Dropped rows, in input order.
    pub skipped: Vec<SkippedRow>,
}

impl ParsedReport {
    /// Number of data rows examined (header excluded).
    pub fn rows_read(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Discard diagnostics and keep only the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
