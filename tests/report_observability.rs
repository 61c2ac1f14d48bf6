use std::fs;
use std::sync::{Arc, Mutex};

use realtime_report::ReportError;
use realtime_report::ingestion::{
    CompositeObserver, FileObserver, ParseStats, ReportContext, ReportObserver, ReportOptions, parse_report_from_path,
};
use realtime_report::types::SkippedRow;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<ParseStats>>,
    failures: Mutex<Vec<String>>,
    skipped: Mutex<Vec<(String, usize)>>,
}

impl ReportObserver for RecordingObserver {
    fn on_success(&self, _ctx: &ReportContext, stats: ParseStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &ReportContext, error: &ReportError) {
        self.failures.lock().unwrap().push(error.to_string());
    }

    fn on_row_skipped(&self, ctx: &ReportContext, row: &SkippedRow) {
        self.skipped.lock().unwrap().push((ctx.source.clone(), row.row));
    }
}

fn options_with(observer: Arc<dyn ReportObserver>) -> ReportOptions {
    ReportOptions {
        observer: Some(observer),
        ..Default::default()
    }
}

#[test]
fn observer_receives_skipped_rows_and_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let report = parse_report_from_path("tests/fixtures/realtime_report.csv", &options_with(obs.clone())).unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![ParseStats {
            rows_read: 4,
            records: 2,
            skipped: 2,
        }]
    );

    let skipped = obs.skipped.lock().unwrap().clone();
    let rows: Vec<usize> = skipped.iter().map(|(_, row)| *row).collect();
    assert_eq!(rows, vec![3, 4]);
    assert!(skipped[0].0.ends_with("realtime_report.csv"));
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_for_missing_columns() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = parse_report_from_path("tests/fixtures/bad_headers.csv", &options_with(obs.clone())).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec!["missing required columns: delivery_status, lead_id".to_string()]);
    assert!(obs.successes.lock().unwrap().is_empty());
    assert!(obs.skipped.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_for_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let err = parse_report_from_path("tests/fixtures/does_not_exist.csv", &options_with(obs.clone())).unwrap_err();

    assert!(!err.is_structural());
    assert_eq!(obs.failures.lock().unwrap().len(), 1);
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let composite = Arc::new(CompositeObserver::new(vec![
        a.clone() as Arc<dyn ReportObserver>,
        b.clone() as Arc<dyn ReportObserver>,
    ]));

    parse_report_from_path("tests/fixtures/realtime_report.csv", &options_with(composite)).unwrap();

    assert_eq!(a.skipped.lock().unwrap().len(), 2);
    assert_eq!(b.skipped.lock().unwrap().len(), 2);
    assert_eq!(a.successes.lock().unwrap().len(), 1);
    assert_eq!(b.successes.lock().unwrap().len(), 1);
}

#[test]
fn file_observer_logs_skipped_rows() {
    let log_path = std::env::temp_dir().join(format!("realtime_report_skipped_{}.log", std::process::id()));
    let _ = fs::remove_file(&log_path);

    let obs = Arc::new(FileObserver::new(&log_path));
    parse_report_from_path("tests/fixtures/realtime_report.csv", &options_with(obs)).unwrap();

    let contents = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("skipped"));
    assert!(lines[0].contains("row=3 vin=3VVMB7AX2RM103495"));
    assert!(lines[0].contains("invalid created '0-11-11 00:04:18.697'"));
    assert!(lines[1].contains("row=4 vin=3VWCB7BU1LM002015"));
    assert!(lines[1].contains("invalid dealer_code 'f402168'"));
    assert!(lines[2].contains(" ok "));
    assert!(lines[2].contains("records=2 skipped=2"));

    let _ = fs::remove_file(&log_path);
}
