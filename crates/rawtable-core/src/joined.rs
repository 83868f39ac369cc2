//! Several rows with disjoint headers read as one row

use crate::error::RowValueError;
use crate::names::NameMap;
use crate::row::RowView;

/// Joined view; the first row is used for error reporting
#[derive(Debug, Clone)]
pub struct JoinedRow<'a> {
    rows: Vec<RowView<'a>>,
    /// header -> index of the owning row in `rows`
    owners: NameMap<usize>,
}

impl<'a> JoinedRow<'a> {
    /// `rows` must be non-empty; [`crate::row::join_rows`] checks that.
    pub(crate) fn new(rows: Vec<RowView<'a>>) -> Result<Self, RowValueError> {
        let mut owners = NameMap::with_capacity(32);
        for (owner, row) in rows.iter().enumerate() {
            for header in row.headers() {
                if !owners.insert(header, owner) {
                    return Err(RowValueError::new(
                        rows[0].location(),
                        format!("cannot join rows: duplicate header name='{}' found", header),
                    ));
                }
            }
        }
        Ok(Self { rows, owners })
    }

    fn owner(&self, column: &str) -> Option<&RowView<'a>> {
        self.owners.get(column).map(|&i| &self.rows[i])
    }

    pub(crate) fn headers(&self) -> Vec<&str> {
        self.owners.names().collect()
    }

    pub(crate) fn location(&self) -> &str {
        self.rows[0].location()
    }

    pub(crate) fn has_column_in_header(&self, column: &str) -> bool {
        self.owners.contains(column)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.iter().all(RowView::is_empty)
    }

    pub(crate) fn is_column_empty(&self, column: &str) -> bool {
        self.owner(column)
            .map_or(true, |row| row.is_column_empty(column))
    }

    pub(crate) fn raw_cell(&self, column: &str) -> Option<Option<&str>> {
        self.owner(column)?.raw_cell(column)
    }
}
