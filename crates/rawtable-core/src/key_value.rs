//! Key-value tables: one column of keys, one of values, read as a single row
//!
//! ```text
//! Key  | Value | Note
//! hp   | 100   | base stats
//! mp   | 40    |
//! ```
//!
//! becomes one row with the columns `Note`, `hp` and `mp`. Columns other than
//! the key and value columns are taken from the first data row. Rows with a
//! blank key, or a key starting with `~`, are skipped.

use crate::error::{Result, RowValueError};
use crate::names::{eq_ignore_case, NameMap};
use crate::row::RowView;
use crate::table::{RawTable, RowData, TableOptions};
use tracing::debug;

/// Keys starting with this marker are comments
pub const COMMENT_PREFIX: char = '~';

/// A table converted to a single key-addressed row
#[derive(Debug, Clone)]
pub struct KeyValueTable {
    table: RawTable,
}

impl KeyValueTable {
    /// Convert a whole table; both columns must exist in its header
    pub fn from_table(table: &RawTable, key_column: &str, value_column: &str) -> Result<Self> {
        for column in [key_column, value_column] {
            if !table.has_column_in_header(column) {
                return Err(RowValueError::new(
                    format!("table '{}'", table.name()),
                    format!("key-value column '{}' not found", column),
                )
                .into());
            }
        }
        let rows: Vec<RowView<'_>> = table.rows().collect();
        Self::build(table.name(), table.headers(), &rows, key_column, value_column)
    }

    /// Convert a list of rows; every row must carry both columns
    pub fn from_rows(
        name: &str,
        rows: &[RowView<'_>],
        key_column: &str,
        value_column: &str,
    ) -> Result<Self> {
        let carried = rows.first().map(RowView::headers).unwrap_or_default();
        Self::build(name, carried, rows, key_column, value_column)
    }

    fn build<'h>(
        name: &str,
        columns: impl IntoIterator<Item = &'h str>,
        rows: &[RowView<'_>],
        key_column: &str,
        value_column: &str,
    ) -> Result<Self> {
        // carried columns first, then one column per key
        let mut header: NameMap<Option<String>> = NameMap::new();
        for column in columns {
            if eq_ignore_case(column, key_column) || eq_ignore_case(column, value_column) {
                continue;
            }
            let value = rows
                .first()
                .and_then(|first| first.raw_cell(column).flatten())
                .map(str::to_string);
            header.insert(column, value);
        }

        for row in rows {
            for column in [key_column, value_column] {
                if !row.has_column_in_header(column) {
                    return Err(row
                        .make_error(format!("key-value column '{}' not found", column))
                        .into());
                }
            }

            let Some(key) = row.raw_value(key_column).map(str::trim) else {
                continue;
            };
            if key.is_empty() || key.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let value = row.raw_cell(value_column).flatten().map(str::to_string);
            if !header.insert(key, value) {
                return Err(row
                    .make_error(format!("duplicate key '{}' in key-value table '{}'", key, name))
                    .into());
            }
        }

        let location = rows
            .first()
            .map_or_else(|| name.to_string(), |r| r.location().to_string());
        let (names, values): (Vec<_>, Vec<_>) = header
            .iter()
            .map(|(n, v)| (Some(n.to_string()), v.clone()))
            .unzip();

        debug!(table = %name, columns = names.len(), "built key-value table");

        let table = RawTable::new(
            name,
            vec![
                RowData::new(format!("{} (header)", location), names),
                RowData::new(location, values),
            ],
            TableOptions::default(),
        )?;
        Ok(Self { table })
    }

    /// The single row holding every key
    pub fn row(&self) -> RowView<'_> {
        self.table.direct_row(0)
    }

    pub fn into_table(self) -> RawTable {
        self.table
    }
}
