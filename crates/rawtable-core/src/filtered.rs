//! Prefix-based column selection over another row

use crate::names::{strip_prefix_ignore_case, NameMap};
use crate::row::RowView;

/// Exposes the columns of a row whose names start with a prefix
#[derive(Debug, Clone)]
pub struct FilteredRow<'a> {
    row: Box<RowView<'a>>,
    /// exposed name -> name on the wrapped row
    remap: NameMap<String>,
}

impl<'a> FilteredRow<'a> {
    pub(crate) fn new(row: RowView<'a>, prefix: &str, remove_prefix: bool) -> Self {
        let mut remap = NameMap::new();
        for original in row.headers() {
            let Some(rest) = strip_prefix_ignore_case(original, prefix) else {
                continue;
            };
            let exposed = if remove_prefix { rest } else { original };
            if exposed.is_empty() {
                continue;
            }
            remap.insert(exposed, original.to_string());
        }

        Self {
            row: Box::new(row),
            remap,
        }
    }

    pub(crate) fn headers(&self) -> Vec<&str> {
        self.remap.names().collect()
    }

    pub(crate) fn location(&self) -> &str {
        self.row.location()
    }

    pub(crate) fn has_column_in_header(&self, column: &str) -> bool {
        self.remap.contains(column)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remap.values().all(|original| self.row.is_column_empty(original))
    }

    pub(crate) fn is_column_empty(&self, column: &str) -> bool {
        self.remap
            .get(column)
            .map_or(true, |original| self.row.is_column_empty(original))
    }

    pub(crate) fn raw_value(&self, column: &str) -> Option<&str> {
        let original = self.remap.get(column)?;
        self.row.raw_value(original)
    }

    pub(crate) fn raw_cell(&self, column: &str) -> Option<Option<&str>> {
        let original = self.remap.get(column)?;
        self.row.raw_cell(original)
    }
}
