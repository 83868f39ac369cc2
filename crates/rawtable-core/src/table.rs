//! Raw tables: a header row plus string cells addressed by column name
//!
//! A [`RawTable`] is built once from row records and then read through
//! [`RowView`]s. Views borrow the table, so the borrow checker rules out an
//! [`RawTable::append`] while any view is alive; sharing a table between
//! threads for reading needs no extra synchronization.

use crate::error::{Error, Result, RowValueError};
use crate::names::NameMap;
use crate::row::{DirectRow, RowView};
use tracing::{debug, trace};

/// Construction options for a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Drop data rows whose cells are all null or blank
    pub remove_empty_rows: bool,
}

impl TableOptions {
    pub fn remove_empty_rows() -> Self {
        Self {
            remove_empty_rows: true,
        }
    }
}

/// One source record: where it came from and its cells
#[derive(Debug, Clone, PartialEq)]
pub struct RowData {
    /// Human-readable origin used in error messages
    pub location: String,
    /// Cell values in column order; `None` is a null cell
    pub values: Vec<Option<String>>,
}

impl RowData {
    pub fn new(location: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            location: location.into(),
            values,
        }
    }

    fn is_blank(&self) -> bool {
        self.values
            .iter()
            .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

/// Format the location of line `index` (0-based, header included) of a source
pub fn format_location(source: &str, index: usize) -> String {
    if source.is_empty() {
        format!("row {}", index + 1)
    } else {
        format!("{}, row {}", source, index + 1)
    }
}

/// A table whose first record is the header
#[derive(Debug, Clone)]
pub struct RawTable {
    name: String,
    full_names: Vec<String>,
    header: NameMap<usize>,
    rows: Vec<RowData>,
}

impl RawTable {
    /// Build a table from a grid of nullable cells; the first line is the header.
    pub fn from_grid(
        name: impl Into<String>,
        grid: Vec<Vec<Option<String>>>,
        options: TableOptions,
    ) -> Result<Self> {
        let name = name.into();
        let rows = grid
            .into_iter()
            .enumerate()
            .map(|(i, values)| RowData::new(format_location(&name, i), values))
            .collect();
        Self::new(name, rows, options)
    }

    /// Build a table from row records; the first record is the header.
    pub fn new(name: impl Into<String>, rows: Vec<RowData>, options: TableOptions) -> Result<Self> {
        let name = name.into();
        let mut records = rows.into_iter();
        let header_row = records.next().ok_or_else(|| Error::MissingHeader {
            table: name.clone(),
        })?;

        let mut header = NameMap::with_capacity(header_row.values.len());
        for (index, cell) in header_row.values.iter().enumerate() {
            let column = cell.as_deref().map(str::trim).unwrap_or_default();
            if column.is_empty() {
                trace!(table = %name, index, "skipping unnamed header cell");
                continue;
            }
            if !header.insert(column, index) {
                return Err(Error::DuplicateHeader {
                    table: name.clone(),
                    column: column.to_string(),
                });
            }
        }

        let mut dropped = 0;
        let mut data = Vec::with_capacity(records.len());
        for record in records {
            if options.remove_empty_rows && record.is_blank() {
                dropped += 1;
                continue;
            }
            data.push(record);
        }

        debug!(
            table = %name,
            columns = header.len(),
            rows = data.len(),
            dropped,
            "built raw table"
        );

        Ok(Self {
            full_names: vec![name.clone()],
            name,
            header,
            rows: data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of every source that contributed rows, in append order
    pub fn full_names(&self) -> &[String] {
        &self.full_names
    }

    /// Number of named columns
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.header.names()
    }

    pub fn has_column_in_header(&self, column: &str) -> bool {
        self.header.contains(column)
    }

    /// Name of the column at `index`, or "" when that position has no name
    pub fn header_by_index(&self, index: usize) -> &str {
        self.header
            .iter()
            .find(|&(_, &i)| i == index)
            .map(|(name, _)| name)
            .unwrap_or_default()
    }

    /// Get a view of the data row at `index`
    pub fn get_row(&self, index: usize) -> std::result::Result<RowView<'_>, RowValueError> {
        if index >= self.rows.len() {
            return Err(RowValueError::new(
                format!("table '{}'", self.name),
                format!(
                    "row index '{}' must be in range [0..{})",
                    index,
                    self.rows.len()
                ),
            ));
        }
        Ok(self.direct_row(index))
    }

    /// Index of a direct row view within this table
    pub fn row_index(&self, row: &RowView<'_>) -> std::result::Result<usize, RowValueError> {
        match row {
            RowView::Direct(direct) => Ok(direct.index()),
            other => Err(other.make_error("row is not a direct table row")),
        }
    }

    /// Iterate rows in table order. Each call starts a fresh pass.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            table: self,
            position: 0,
        }
    }

    /// Append the rows of a table with the same header layout.
    ///
    /// Headers are compared as (name, index) sets, names ignoring case.
    pub fn append(&mut self, other: RawTable) -> Result<()> {
        let mut mine: Vec<(usize, &str)> = self.header.iter().map(|(n, &i)| (i, n)).collect();
        let mut theirs: Vec<(usize, &str)> = other.header.iter().map(|(n, &i)| (i, n)).collect();
        mine.sort_unstable();
        theirs.sort_unstable();

        let same = mine.len() == theirs.len()
            && mine
                .iter()
                .zip(&theirs)
                .all(|(a, b)| a.0 == b.0 && crate::names::eq_ignore_case(a.1, b.1));
        if !same {
            return Err(Error::HeaderMismatch {
                table: self.name.clone(),
                other: other.name.clone(),
                expected: describe_header(&mine),
                found: describe_header(&theirs),
            });
        }

        debug!(
            table = %self.name,
            other = %other.name,
            rows = other.rows.len(),
            "appending table"
        );

        self.full_names.push(other.name);
        self.rows.extend(other.rows);
        Ok(())
    }

    pub(crate) fn direct_row(&self, index: usize) -> RowView<'_> {
        let data = &self.rows[index];
        RowView::Direct(DirectRow::new(index, &data.location, &self.header, &data.values))
    }
}

fn describe_header(columns: &[(usize, &str)]) -> String {
    columns
        .iter()
        .map(|(index, name)| format!("[{}, {}]", name, index))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Iterator over the rows of a [`RawTable`]
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    table: &'a RawTable,
    position: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = RowView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.table.rows.len() {
            return None;
        }
        let row = self.table.direct_row(self.position);
        self.position += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.rows.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl<'a> IntoIterator for &'a RawTable {
    type Item = RowView<'a>;
    type IntoIter = Rows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[Option<&str>]]) -> Vec<Vec<Option<String>>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
            .collect()
    }

    #[test]
    fn test_blank_header_cells_are_skipped() {
        let t = RawTable::from_grid(
            "t",
            grid(&[&[Some("a"), Some(""), None, Some(" b ")]]),
            TableOptions::default(),
        )
        .unwrap();

        assert_eq!(t.column_count(), 2);
        assert_eq!(t.header_by_index(0), "a");
        assert_eq!(t.header_by_index(1), "");
        assert_eq!(t.header_by_index(3), "b");
        assert_eq!(t.row_count(), 0);
    }

    #[test]
    fn test_duplicate_header_ignores_case() {
        let err = RawTable::from_grid(
            "dup",
            grid(&[&[Some("Key"), Some("key")]]),
            TableOptions::default(),
        )
        .unwrap_err();

        match err {
            Error::DuplicateHeader { table, column } => {
                assert_eq!(table, "dup");
                assert_eq!(column, "key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_records_is_missing_header() {
        let err = RawTable::new("empty", Vec::new(), TableOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingHeader { .. }));
    }

    #[test]
    fn test_location_format() {
        assert_eq!(format_location("", 0), "row 1");
        assert_eq!(format_location("items.csv", 4), "items.csv, row 5");
    }

    #[test]
    fn test_rows_iterator_is_restartable() {
        let t = RawTable::from_grid(
            "t",
            grid(&[&[Some("a")], &[Some("1")], &[Some("2")]]),
            TableOptions::default(),
        )
        .unwrap();

        assert_eq!(t.rows().len(), 2);
        assert_eq!(t.rows().count(), 2);
        let locations: Vec<String> = t.rows().map(|r| r.location().to_string()).collect();
        assert_eq!(locations, vec!["t, row 2", "t, row 3"]);
    }
}
