//! `realtime-report` parses realtime dealer report CSVs into typed, validated [`types::Record`]s.
//!
//! The header row must contain the labels listed by [`schema::required_columns`]; order does not
//! matter and extra columns are ignored. Each data row becomes a record unless its
//! `dealer_code` or `created` field fails to parse, in which case the row is dropped and
//! described in [`types::ParsedReport::skipped`].
//!
//! ## Errors
//!
//! Two tiers are kept apart:
//!
//! - Whole-batch failures return [`ReportError`]: no header row, missing required columns, or
//!   a problem reading the file.
//! - Row-level coercion failures never fail the batch; they only shrink the output.
//!
//! ## Quick example
//!
//! ```rust
//! use realtime_report::ingestion::parse_report;
//!
//! let rows = vec![
//!     vec!["lead_id", "vin", "created", "dealer_code", "overall_severity", "delivery_status"],
//!     vec!["e323f4ff", "1V2RR2CA5MC531095", "2024-11-11 00:00:36.507", "422236", "Blue", "COMPLETE"],
//! ];
//! let records = parse_report(&rows).unwrap();
//! assert_eq!(records[0].vin, "1V2RR2CA5MC531095");
//! assert_eq!(records[0].created.to_string(), "2024-11-11 00:00:36.507");
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: file reading, parsing, and observer hooks
//! - [`schema`]: required column registry
//! - [`types`]: record and diagnostic types
//! - [`error`]: error types

pub mod error;
pub mod ingestion;
pub mod schema;
pub mod types;

pub use error::{FieldError, ReportError, ReportResult};
