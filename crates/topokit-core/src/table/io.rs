// ── CSV reading and writing ──

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::{Located, Table};
use crate::error::CoreError;

/// Read every row of a CSV file, keeping the line each row started on.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<Located<T>>, CoreError> {
    let file = std::fs::File::open(path).map_err(|source| CoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_rows_from(file, &path.display().to_string())
}

/// Read rows from any reader. `origin` only labels errors.
///
/// Rows may be shorter or longer than the header; missing cells read as
/// absent and unknown columns are ignored.
pub fn read_rows_from<R: Read, T: DeserializeOwned>(
    reader: R,
    origin: &str,
) -> Result<Vec<Located<T>>, CoreError> {
    let csv_err = |source| CoreError::Csv {
        path: origin.to_owned(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map_or(0, csv::Position::line);
        let row = record.deserialize(Some(&headers)).map_err(csv_err)?;
        rows.push(Located::new(line, row));
    }
    tracing::trace!(origin, rows = rows.len(), "parsed csv");
    Ok(rows)
}

fn write_csv<W: std::io::Write>(table: &Table, writer: W) -> Result<W, csv::Error> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

pub(super) fn table_to_string(table: &Table) -> Result<String, CoreError> {
    let origin = table.kind.file_name();
    let buf = write_csv(table, Vec::new()).map_err(|source| CoreError::Csv {
        path: origin.to_owned(),
        source,
    })?;
    String::from_utf8(buf).map_err(|e| CoreError::Write {
        path: origin.to_owned(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })
}
