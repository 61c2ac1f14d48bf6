//! Report parsing: header check plus per-row field coercion.
//!
//! The first row is always the header. Each data field is routed to a [`Record`] field through
//! the header label at the same position, so column order in the source does not matter.
//!
//! A data row whose `dealer_code` or `created` cannot be coerced is dropped, never reported as
//! an error of the whole parse. Only an empty input or a header lacking required labels fails
//! the batch.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::{FieldError, ReportError, ReportResult};
use crate::schema::{self, ColumnRole};
use crate::types::{CREATED_FORMAT, ParsedReport, Record, SkippedRow};

use super::observability::{ReportContext, ReportObserver};

/// Parse raw rows into validated records, discarding diagnostics.
///
/// ```
/// use realtime_report::ingestion::parse_report;
///
/// let rows = vec![
///     vec!["vin", "dealer_code", "created", "overall_severity", "delivery_status", "lead_id"],
///     vec!["1V2RR2CA5MC531095", "422236", "2024-11-11 00:00:36.507", "Blue", "COMPLETE", "e323f4ff"],
///     vec!["3VWCB7BU1LM002015", "f402168", "2024-11-11 00:05:46.303", "Blue", "COMPLETE", "9ba81ff2"],
/// ];
/// let records = parse_report(&rows)?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].dealer_code, 422236);
/// # Ok::<(), realtime_report::ReportError>(())
/// ```
pub fn parse_report<R, S>(rows: &[R]) -> ReportResult<Vec<Record>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    ReportParser::new().parse(rows).map(ParsedReport::into_records)
}

/// Parser for raw report rows, with an optional observer for dropped rows.
#[derive(Clone, Default)]
pub struct ReportParser {
    context: ReportContext,
    observer: Option<Arc<dyn ReportObserver>>,
}

impl std::fmt::Debug for ReportParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportParser")
            .field("context", &self.context)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl ReportParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label diagnostics with the given source context.
    pub fn with_context(mut self, context: ReportContext) -> Self {
        self.context = context;
        self
    }

    /// Report each dropped row to `observer`.
    pub fn with_observer(mut self, observer: Option<Arc<dyn ReportObserver>>) -> Self {
        self.observer = observer;
        self
    }

    /// Parse `rows` (header first) into a [`ParsedReport`].
    pub fn parse<R, S>(&self, rows: &[R]) -> ReportResult<ParsedReport>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let Some((header, data)) = rows.split_first() else {
            return Err(ReportError::EmptyInput);
        };
        let header = header.as_ref();

        let missing = schema::missing_columns(header);
        if !missing.is_empty() {
            return Err(ReportError::MissingColumns {
                missing: missing.into_iter().map(str::to_owned).collect(),
            });
        }

        // Resolve each header position to a role once; unknown labels stay `None`.
        let roles: Vec<Option<ColumnRole>> = header
            .iter()
            .map(|label| ColumnRole::from_label(label.as_ref()))
            .collect();

        let mut report = ParsedReport {
            records: Vec::with_capacity(data.len()),
            skipped: Vec::new(),
        };

        for (row_idx0, row) in data.iter().enumerate() {
            // 1-based record index; the header is row 1.
            let row_number = row_idx0 + 2;

            let mut pending = PendingRecord::new();
            // Zip stops at the shorter side: short rows leave trailing fields unassigned and
            // fields past the header are ignored.
            for (role, raw) in roles.iter().zip(row.as_ref()) {
                if let Some(role) = role {
                    pending.assign(*role, raw.as_ref());
                }
            }

            match pending.finish() {
                Ok(record) => report.records.push(record),
                Err(skipped) => {
                    let skipped = SkippedRow {
                        row: row_number,
                        ..skipped
                    };
                    for error in &skipped.errors {
                        debug!(source = %self.context.source, row = row_number, vin = %skipped.vin, %error, "skipping row");
                    }
                    if let Some(observer) = &self.observer {
                        observer.on_row_skipped(&self.context, &skipped);
                    }
                    report.skipped.push(skipped);
                }
            }
        }

        info!(
            source = %self.context.source,
            rows = report.rows_read(),
            records = report.records.len(),
            skipped = report.skipped.len(),
            "parsed report"
        );
        Ok(report)
    }
}

/// A record under construction. Coercion failures clear `is_valid` but never stop the row.
struct PendingRecord {
    record: Record,
    is_valid: bool,
    errors: Vec<FieldError>,
}

impl PendingRecord {
    fn new() -> Self {
        Self {
            record: Record::default(),
            is_valid: true,
            errors: Vec::new(),
        }
    }

    fn assign(&mut self, role: ColumnRole, raw: &str) {
        match role {
            ColumnRole::Vin => self.record.vin = raw.to_owned(),
            ColumnRole::OverallSeverity => self.record.overall_severity = raw.to_owned(),
            ColumnRole::DeliveryStatus => self.record.delivery_status = raw.to_owned(),
            ColumnRole::LeadId => self.record.lead_id = raw.to_owned(),
            ColumnRole::DealerCode => match parse_dealer_code(raw) {
                Ok(code) => self.record.dealer_code = code,
                Err(e) => self.invalidate(e),
            },
            ColumnRole::Created => match parse_created(raw) {
                Ok(created) => self.record.created = created,
                Err(e) => self.invalidate(e),
            },
        }
    }

    fn invalidate(&mut self, error: FieldError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    fn finish(self) -> Result<Record, SkippedRow> {
        if self.is_valid {
            Ok(self.record)
        } else {
            Err(SkippedRow {
                row: 0,
                vin: self.record.vin,
                errors: self.errors,
            })
        }
    }
}

/// Base-10 digits only: no sign, no whitespace, must fit `u64`.
fn parse_dealer_code(raw: &str) -> Result<u64, FieldError> {
    let invalid = || FieldError::InvalidDealerCode {
        raw: raw.to_owned(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u64>().map_err(|_| invalid())
}

/// `YYYY-MM-DD HH:MM:SS[.fff]` with a four-digit year and two-digit components. Seconds stop at
/// 59; chrono would otherwise take `60` as a leap second.
fn parse_created(raw: &str) -> Result<NaiveDateTime, FieldError> {
    let invalid = || FieldError::InvalidCreated {
        raw: raw.to_owned(),
    };
    // chrono accepts short years ("0-11-11"), so check the fixed-width prefix first.
    let b = raw.as_bytes();
    let shape_ok = b.len() >= 19
        && b[4] == b'-'
        && b[7] == b'-'
        && b[10] == b' '
        && b[13] == b':'
        && b[16] == b':'
        && b[17] < b'6'
        && [0..4, 5..7, 8..10, 11..13, 14..16, 17..19]
            .into_iter()
            .all(|r| b[r].iter().all(u8::is_ascii_digit));
    if !shape_ok {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(raw, CREATED_FORMAT).map_err(|_| invalid())
}
