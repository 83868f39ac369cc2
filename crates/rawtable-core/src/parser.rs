//! CSV loader producing raw tables

use crate::error::{Error, Result};
use crate::table::{format_location, RawTable, RowData, TableOptions};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a CSV file into a RawTable named after the file stem
pub fn parse_csv<P: AsRef<Path>>(path: P, options: TableOptions) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    read_table(BufReader::new(file), &name, &source, path, options)
}

/// Parse CSV from a string (useful for testing)
pub fn parse_csv_str(content: &str, source_name: &str, options: TableOptions) -> Result<RawTable> {
    let name = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    read_table(
        content.as_bytes(),
        &name,
        source_name,
        Path::new(source_name),
        options,
    )
}

fn read_table<R: Read>(
    reader: R,
    name: &str,
    source: &str,
    path: &Path,
    options: TableOptions,
) -> Result<RawTable> {
    // the header is a regular record here; RawTable consumes it
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // Allow varying number of fields
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        let values = record.iter().map(|cell| Some(cell.to_string())).collect();
        rows.push(RowData::new(format_location(source, index), values));
    }

    RawTable::new(name, rows, options)
}
