//! Export of row views to CSV and JSON

use crate::error::Result;
use crate::row::RowView;
use serde_json::{Map, Value};
use std::io::Write;

/// Write rows as CSV. The header is taken from the first row.
pub fn write_csv<W: Write>(rows: &[RowView<'_>], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let Some(first) = rows.first() else {
        return Ok(());
    };
    let header = first.headers();
    csv_writer
        .write_record(&header)
        .map_err(std::io::Error::from)?;

    for row in rows {
        let record = header
            .iter()
            .map(|column| row.raw_cell(column).flatten().unwrap_or_default());
        csv_writer
            .write_record(record)
            .map_err(std::io::Error::from)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Convert one row to a JSON object; blank or absent cells become `null`
pub fn row_to_json(row: &RowView<'_>) -> Value {
    let object: Map<String, Value> = row
        .headers()
        .into_iter()
        .map(|column| {
            let value = match row.raw_cell(column).flatten() {
                Some(v) if !v.trim().is_empty() => Value::String(v.to_string()),
                _ => Value::Null,
            };
            (column.to_string(), value)
        })
        .collect();
    Value::Object(object)
}

/// Convert rows to a JSON array of objects
pub fn rows_to_json(rows: &[RowView<'_>]) -> Value {
    Value::Array(rows.iter().map(row_to_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv_str;
    use crate::table::TableOptions;
    use serde_json::json;

    #[test]
    fn test_write_csv_round_trips_through_parser() {
        let t = parse_csv_str(
            "Key,Text\nintro,\"Hello, world\"\noutro,\n",
            "strings.csv",
            TableOptions::default(),
        )
        .unwrap();
        let rows: Vec<_> = t.rows().collect();

        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Key,Text\nintro,\"Hello, world\"\noutro,\n");
    }

    #[test]
    fn test_rows_to_json() {
        let t = parse_csv_str("Id,Name\n1,sword\n2, \n", "items.csv", TableOptions::default())
            .unwrap();
        let rows: Vec<_> = t.rows().collect();

        assert_eq!(
            rows_to_json(&rows),
            json!([
                {"Id": "1", "Name": "sword"},
                {"Id": "2", "Name": null},
            ])
        );
    }

    #[test]
    fn test_write_csv_without_rows_writes_nothing() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
