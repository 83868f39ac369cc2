#![allow(dead_code)]

use rawtable_core::{RawTable, TableOptions};

/// Build a grid where every cell is present
pub fn grid(rows: &[&[&str]]) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|r| r.iter().map(|c| Some(c.to_string())).collect())
        .collect()
}

/// Build a grid with null cells
pub fn nullable_grid(rows: &[&[Option<&str>]]) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
        .collect()
}

pub fn table(rows: &[&[&str]]) -> RawTable {
    RawTable::from_grid("test", grid(rows), TableOptions::default()).unwrap()
}

pub fn nullable_table(rows: &[&[Option<&str>]]) -> RawTable {
    RawTable::from_grid("test", nullable_grid(rows), TableOptions::default()).unwrap()
}
