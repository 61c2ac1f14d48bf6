//! Path-based entrypoint: read a report file, parse it, and report the outcome.
//!
//! If an [`super::observability::ReportObserver`] is set in [`ReportOptions`], it receives
//! `on_row_skipped` for every dropped row, then either `on_success` with [`ParseStats`] or
//! `on_failure` with the error.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::error::ReportResult;
use crate::types::ParsedReport;

use super::csv::read_rows_from_path;
use super::observability::{ParseStats, ReportContext, ReportObserver};
use super::report::ReportParser;

/// Options controlling how a report file is read and who hears about it.
///
/// Use [`Default`] for a comma-delimited file with lenient row lengths.
#[derive(Clone)]
pub struct ReportOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Accept rows whose length differs from the header. When `false`, the CSV reader rejects
    /// ragged rows with [`crate::ReportError::Csv`].
    pub flexible: bool,
    /// Optional observer for dropped rows and outcomes.
    pub observer: Option<Arc<dyn ReportObserver>>,
}

impl fmt::Debug for ReportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportOptions")
            .field("delimiter", &(self.delimiter as char))
            .field("flexible", &self.flexible)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            flexible: true,
            observer: None,
        }
    }
}

/// Read and parse the report at `path`.
///
/// ```no_run
/// use realtime_report::ingestion::{parse_report_from_path, ReportOptions};
///
/// # fn main() -> Result<(), realtime_report::ReportError> {
/// let report = parse_report_from_path("realtime_report.csv", &ReportOptions::default())?;
/// println!("records={} skipped={}", report.records.len(), report.skipped.len());
/// # Ok(())
/// # }
/// ```
pub fn parse_report_from_path(path: impl AsRef<Path>, options: &ReportOptions) -> ReportResult<ParsedReport> {
    let path = path.as_ref();
    let ctx = ReportContext::for_path(path);

    let result = read_rows_from_path(path, options).and_then(|rows| {
        ReportParser::new()
            .with_context(ctx.clone())
            .with_observer(options.observer.clone())
            .parse(&rows)
    });

    match &result {
        Ok(report) => {
            if let Some(observer) = &options.observer {
                observer.on_success(
                    &ctx,
                    ParseStats {
                        rows_read: report.rows_read(),
                        records: report.records.len(),
                        skipped: report.skipped.len(),
                    },
                );
            }
        }
        Err(e) => {
            warn!(source = %ctx.source, error = %e, "report parse failed");
            if let Some(observer) = &options.observer {
                observer.on_failure(&ctx, e);
            }
        }
    }

    result
}
