use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use realtime_report::ingestion::{FileObserver, ReportObserver, ReportOptions, parse_report_from_path};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the report CSV
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Field delimiter
    #[arg(short, long, value_name = "DELIMITER", default_value_t = ',')]
    delimiter: char,

    /// Reject rows whose field count differs from the header
    #[arg(long)]
    strict: bool,

    /// Append dropped rows and the outcome to this file
    #[arg(long, value_name = "PATH")]
    skipped_log: Option<PathBuf>,

    /// Print parsed records as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let Ok(delimiter) = u8::try_from(cli.delimiter) else {
        error!(delimiter = %cli.delimiter, "delimiter must be a single-byte character");
        return ExitCode::FAILURE;
    };

    let observer = cli
        .skipped_log
        .as_ref()
        .map(|p| Arc::new(FileObserver::new(p)) as Arc<dyn ReportObserver>);
    let options = ReportOptions {
        delimiter,
        flexible: !cli.strict,
        observer,
    };

    let start = Instant::now();
    let result = parse_report_from_path(&cli.path, &options);
    info!("read_csv took {:?}", start.elapsed());

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!(path = %cli.path.display(), "{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        for record in &report.records {
            match serde_json::to_string(record) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    error!("failed to serialize record: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    info!(
        rows = report.rows_read(),
        records = report.records.len(),
        skipped = report.skipped.len(),
        "done"
    );
    ExitCode::SUCCESS
}
