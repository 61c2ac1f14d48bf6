use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};

use crate::error::ReportError;
use crate::types::SkippedRow;

/// Source label used when rows did not come from a file.
pub const MEMORY_SOURCE: &str = "<memory>";

/// Context about a parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Where the rows came from (file path or [`MEMORY_SOURCE`]).
    pub source: String,
}

impl ReportContext {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn for_path(path: &Path) -> Self {
        Self::new(path.display().to_string())
    }
}

impl Default for ReportContext {
    fn default() -> Self {
        Self::new(MEMORY_SOURCE)
    }
}

/// Counts reported on a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    /// Data rows examined (header excluded).
    pub rows_read: usize,
    /// Rows kept as records.
    pub records: usize,
    /// Rows dropped because a field failed coercion.
    pub skipped: usize,
}

/// Observer interface for parse outcomes.
///
/// Implementors can record metrics, write logs, or collect dropped rows.
pub trait ReportObserver: Send + Sync {
    /// Called when a whole report parses.
    fn on_success(&self, _ctx: &ReportContext, _stats: ParseStats) {}

    /// Called when reading or parsing fails for the whole batch.
    fn on_failure(&self, _ctx: &ReportContext, _error: &ReportError) {}

    /// Called once per dropped data row.
    fn on_row_skipped(&self, _ctx: &ReportContext, _row: &SkippedRow) {}
}

/// Forwards every parse event to each inner observer, in registration order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ReportObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ReportObserver>>) -> Self {
        Self { observers }
    }

    fn each(&self, mut f: impl FnMut(&dyn ReportObserver)) {
        self.observers.iter().for_each(|o| f(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ReportObserver for CompositeObserver {
    fn on_success(&self, ctx: &ReportContext, stats: ParseStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &ReportContext, error: &ReportError) {
        self.each(|o| o.on_failure(ctx, error));
    }

    fn on_row_skipped(&self, ctx: &ReportContext, row: &SkippedRow) {
        self.each(|o| o.on_row_skipped(ctx, row));
    }
}

/// Skipped-row log: one line per dropped row (row index, VIN, reasons), then one line with the
/// parse outcome.
///
/// Lines start with an RFC 3339 UTC timestamp. The log never influences the parse result, so
/// open and write failures are dropped.
#[derive(Debug)]
pub struct FileObserver {
    log_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(log_path: impl AsRef<Path>) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn record(&self, kind: &str, ctx: &ReportContext, details: fmt::Arguments<'_>) {
        let _guard = self.write_lock.lock().ok();
        let Ok(mut log) = OpenOptions::new().create(true).append(true).open(&self.log_path) else {
            return;
        };
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let _ = writeln!(log, "{stamp} {kind} source={} {details}", ctx.source);
    }
}

impl ReportObserver for FileObserver {
    fn on_success(&self, ctx: &ReportContext, stats: ParseStats) {
        self.record(
            "ok",
            ctx,
            format_args!(
                "rows={} records={} skipped={}",
                stats.rows_read, stats.records, stats.skipped
            ),
        );
    }

    fn on_failure(&self, ctx: &ReportContext, error: &ReportError) {
        self.record("fail", ctx, format_args!("err={error}"));
    }

    fn on_row_skipped(&self, ctx: &ReportContext, row: &SkippedRow) {
        let reasons: Vec<String> = row.errors.iter().map(ToString::to_string).collect();
        self.record(
            "skipped",
            ctx,
            format_args!("row={} vin={} reason={}", row.row, row.vin, reasons.join("; ")),
        );
    }
}
