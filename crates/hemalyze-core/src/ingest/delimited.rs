//! Delimited table reading.

use std::io::Read;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::IngestError;
use crate::models::table::{Row, Table};

/// Read a comma-separated table whose first line is the header.
///
/// Ragged rows are accepted and blank lines skipped. A line of empty cells
/// such as `,,` is still a row. Cells keep their surrounding whitespace; the
/// extractors trim what they need.
pub fn read_table<R: Read>(reader: R) -> Result<Table, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();
        rows.push(row);
    }

    debug!("Read table with {} columns and {} rows", headers.len(), rows.len());
    Ok(Table::new(rows))
}
