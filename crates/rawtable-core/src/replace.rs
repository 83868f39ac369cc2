//! Value overrides on top of another row

use crate::names::NameMap;
use crate::row::RowView;

/// A row whose values are taken from an override map first.
///
/// The header set is the wrapped row's, unchanged. An override to "" is a
/// deliberate blank and is distinct from "not overridden".
#[derive(Debug, Clone)]
pub struct ReplaceRow<'a> {
    row: Box<RowView<'a>>,
    values: NameMap<String>,
}

impl<'a> ReplaceRow<'a> {
    pub(crate) fn new(row: RowView<'a>, values: NameMap<String>) -> Self {
        Self {
            row: Box::new(row),
            values,
        }
    }

    /// Names of the overridden columns
    pub fn overridden(&self) -> impl Iterator<Item = &str> {
        self.values.names()
    }

    pub(crate) fn headers(&self) -> Vec<&str> {
        self.row.headers()
    }

    pub(crate) fn location(&self) -> &str {
        self.row.location()
    }

    pub(crate) fn has_column_in_header(&self, column: &str) -> bool {
        self.row.has_column_in_header(column)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.row
            .headers()
            .into_iter()
            .all(|column| self.raw_value(column).map_or(true, |v| v.trim().is_empty()))
    }

    pub(crate) fn raw_value(&self, column: &str) -> Option<&str> {
        match self.values.get(column) {
            Some(value) => Some(value.as_str()),
            None => self.row.raw_value(column),
        }
    }

    pub(crate) fn raw_cell(&self, column: &str) -> Option<Option<&str>> {
        match self.values.get(column) {
            Some(value) => Some(Some(value.as_str())),
            None => self.row.raw_cell(column),
        }
    }
}
