//! Override patches for raw tables
//!
//! This module provides:
//! - A patch file format (JSON) listing cell overrides by row index and column
//! - Application of a patch as replace overlays, leaving the table untouched

use crate::error::{Error, Result};
use crate::row::RowView;
use crate::table::RawTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A single override of a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Data row index (header excluded)
    pub row: usize,
    /// Column name
    pub column: String,
    /// New value; "" blanks the cell
    pub value: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            value: value.into(),
        }
    }
}

/// A patch file containing the overrides for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchFile {
    /// Table this patch applies to
    pub table: String,
    /// List of edits
    pub edits: Vec<Edit>,
}

impl PatchFile {
    /// Create a new empty patch file
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the patch
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Load a patch file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the patch file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Apply a patch to a table, returning one view per table row.
///
/// Rows with edits are wrapped in a replace overlay; the rest are direct
/// views. A later edit of the same cell wins.
pub fn apply_patch<'a>(table: &'a RawTable, patch: &PatchFile) -> Result<Vec<RowView<'a>>> {
    let mut by_row: BTreeMap<usize, Vec<&Edit>> = BTreeMap::new();
    for edit in &patch.edits {
        let row = table.get_row(edit.row)?;
        if !row.has_column_in_header(&edit.column) {
            return Err(row
                .make_error(format!("patch column '{}' not found", edit.column))
                .into());
        }
        by_row.entry(edit.row).or_default().push(edit);
    }

    debug!(
        table = %table.name(),
        edits = patch.edits.len(),
        rows = by_row.len(),
        "applying patch"
    );

    let rows = table
        .rows()
        .enumerate()
        .map(|(index, row)| match by_row.get(&index) {
            Some(edits) => {
                // keep the last value per column
                let mut overrides: BTreeMap<String, &str> = BTreeMap::new();
                for edit in edits {
                    overrides.insert(edit.column.to_lowercase(), &edit.value);
                }
                row.replace(overrides)
            }
            None => row,
        })
        .collect();
    Ok(rows)
}
