//! Row views: read-only, name-addressed access to one logical row
//!
//! A [`RowView`] is either a direct view of a table row or one of the
//! decorators built on top of other views. Decorators never copy cell data;
//! they only own the name mappings they derive at construction.

use crate::error::{Error, Result, RowValueError};
use crate::filtered::FilteredRow;
use crate::joined::JoinedRow;
use crate::names::NameMap;
use crate::replace::ReplaceRow;

/// A view over a single table row
#[derive(Debug, Clone)]
pub enum RowView<'a> {
    /// A row stored in a [`crate::RawTable`]
    Direct(DirectRow<'a>),
    /// A prefix-selected subset of another row's columns
    Filtered(FilteredRow<'a>),
    /// Several rows with disjoint headers read as one
    Joined(JoinedRow<'a>),
    /// Another row with some values overridden
    Replace(ReplaceRow<'a>),
}

impl<'a> RowView<'a> {
    /// Column names visible through this view
    pub fn headers(&self) -> Vec<&str> {
        match self {
            RowView::Direct(row) => row.header.names().collect(),
            RowView::Filtered(row) => row.headers(),
            RowView::Joined(row) => row.headers(),
            RowView::Replace(row) => row.headers(),
        }
    }

    /// Source location used in error messages
    pub fn location(&self) -> &str {
        match self {
            RowView::Direct(row) => row.location,
            RowView::Filtered(row) => row.location(),
            RowView::Joined(row) => row.location(),
            RowView::Replace(row) => row.location(),
        }
    }

    pub fn has_column_in_header(&self, column: &str) -> bool {
        match self {
            RowView::Direct(row) => row.header.contains(column),
            RowView::Filtered(row) => row.has_column_in_header(column),
            RowView::Joined(row) => row.has_column_in_header(column),
            RowView::Replace(row) => row.has_column_in_header(column),
        }
    }

    /// True when every cell of the row is null or blank
    pub fn is_empty(&self) -> bool {
        match self {
            RowView::Direct(row) => row.is_empty(),
            RowView::Filtered(row) => row.is_empty(),
            RowView::Joined(row) => row.is_empty(),
            RowView::Replace(row) => row.is_empty(),
        }
    }

    /// True when the column is absent, null, or blank after trimming
    pub fn is_column_empty(&self, column: &str) -> bool {
        match self {
            RowView::Filtered(row) => row.is_column_empty(column),
            RowView::Joined(row) => row.is_column_empty(column),
            RowView::Direct(_) | RowView::Replace(_) => self
                .raw_value(column)
                .map_or(true, |v| v.trim().is_empty()),
        }
    }

    /// Cell value by column name.
    ///
    /// `None` when the column is absent or the cell is null. Direct and
    /// joined rows also report an empty cell as `None`; an override to ""
    /// on a replace row is returned as `Some("")`.
    pub fn raw_value(&self, column: &str) -> Option<&str> {
        match self {
            RowView::Direct(_) | RowView::Joined(_) => {
                self.raw_cell(column).flatten().filter(|v| !v.is_empty())
            }
            RowView::Filtered(row) => row.raw_value(column),
            RowView::Replace(row) => row.raw_value(column),
        }
    }

    /// Column lookup distinguishing "no such column" (`None`) from the
    /// cell content (`Some(None)` for a null or missing trailing cell).
    pub fn raw_cell(&self, column: &str) -> Option<Option<&str>> {
        match self {
            RowView::Direct(row) => row.raw_cell(column),
            RowView::Filtered(row) => row.raw_cell(column),
            RowView::Joined(row) => row.raw_cell(column),
            RowView::Replace(row) => row.raw_cell(column),
        }
    }

    /// Build a row-value error tagged with this row's location
    pub fn make_error(&self, message: impl Into<String>) -> RowValueError {
        RowValueError::new(self.location(), message)
    }

    /// Keep only columns starting with `prefix` (ignoring case), optionally
    /// stripping the prefix from the exposed names.
    pub fn select_columns(self, prefix: &str, remove_prefix: bool) -> RowView<'a> {
        RowView::Filtered(FilteredRow::new(self, prefix, remove_prefix))
    }

    /// Join this row with another row whose headers are disjoint
    pub fn join(self, other: RowView<'a>) -> Result<RowView<'a>> {
        join_rows(vec![self, other])
    }

    /// Override a single column value
    pub fn raw_replace(self, column: impl Into<String>, value: impl Into<String>) -> RowView<'a> {
        let mut values = NameMap::with_capacity(1);
        values.insert(column, value.into());
        RowView::Replace(ReplaceRow::new(self, values))
    }

    /// Override several column values at once
    pub fn replace<K, V, I>(self, values: I) -> RowView<'a>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k, Into::<String>::into(v)))
            .collect();
        RowView::Replace(ReplaceRow::new(self, values))
    }
}

/// Join a non-empty list of rows with disjoint headers into one view.
///
/// The first row's location is used for errors raised by the joined view.
pub fn join_rows(rows: Vec<RowView<'_>>) -> Result<RowView<'_>> {
    if rows.is_empty() {
        return Err(Error::InvalidArgument(
            "rows must be a non-empty collection".to_string(),
        ));
    }
    Ok(RowView::Joined(JoinedRow::new(rows)?))
}

/// A row stored in a table, sharing the table's header map
#[derive(Debug, Clone, Copy)]
pub struct DirectRow<'a> {
    index: usize,
    location: &'a str,
    header: &'a NameMap<usize>,
    values: &'a [Option<String>],
}

impl<'a> DirectRow<'a> {
    pub(crate) fn new(
        index: usize,
        location: &'a str,
        header: &'a NameMap<usize>,
        values: &'a [Option<String>],
    ) -> Self {
        Self {
            index,
            location,
            header,
            values,
        }
    }

    /// Position of this row among the table's data rows
    pub fn index(&self) -> usize {
        self.index
    }

    fn is_empty(&self) -> bool {
        self.values
            .iter()
            .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }

    fn raw_cell(&self, column: &str) -> Option<Option<&'a str>> {
        let &index = self.header.get(column)?;
        Some(self.values.get(index).and_then(|v| v.as_deref()))
    }
}
