//! Reading and parsing entrypoints.
//!
//! Most callers should use [`parse_report_from_path`] (from [`pipeline`]), or
//! [`parse_report`] when the raw rows are already in memory.
//!
//! - [`csv`]: raw row reading
//! - [`report`]: header check and field coercion
//! - [`observability`]: observer hooks and the skipped-row log

pub mod csv;
pub mod observability;
pub mod pipeline;
pub mod report;

pub use self::csv::{read_rows_from_path, read_rows_from_reader};
pub use observability::{CompositeObserver, FileObserver, ParseStats, ReportContext, ReportObserver};
pub use pipeline::{ReportOptions, parse_report_from_path};
pub use report::{ReportParser, parse_report};
