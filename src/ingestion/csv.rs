//! Raw CSV reading.
//!
//! Rows are returned untouched, header included as row 0; typing happens in
//! [`super::report`].

use std::path::Path;

use crate::error::ReportResult;
use crate::types::RawRow;

use super::pipeline::ReportOptions;

/// Read every row of a CSV file, header first.
pub fn read_rows_from_path(path: impl AsRef<Path>, options: &ReportOptions) -> ReportResult<Vec<RawRow>> {
    let mut rdr = reader_builder(options).from_path(path)?;
    read_rows_from_csv(&mut rdr)
}

/// Read every row from any byte source, header first.
pub fn read_rows_from_reader<R: std::io::Read>(reader: R, options: &ReportOptions) -> ReportResult<Vec<RawRow>> {
    let mut rdr = reader_builder(options).from_reader(reader);
    read_rows_from_csv(&mut rdr)
}

fn reader_builder(options: &ReportOptions) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(options.delimiter)
        .flexible(options.flexible);
    builder
}

fn read_rows_from_csv<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> ReportResult<Vec<RawRow>> {
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}
