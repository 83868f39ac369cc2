//! rawtable-core: header-addressed raw tables for game data import
//!
//! This library provides functionality to:
//! - Build tables from string grids or CSV files (first row = header)
//! - Read rows by column name, case-insensitively, with typed getters
//! - Compose row views without copying: prefix selection, joins, overrides
//! - Convert key/value tables into a single key-addressed row
//! - Group CSV files into families and append them into one table
//! - Apply JSON override patches and export rows to CSV or JSON

pub mod accessors;
pub mod error;
pub mod export;
pub mod filtered;
pub mod joined;
pub mod key_value;
pub mod names;
pub mod parser;
pub mod patch;
pub mod replace;
pub mod row;
pub mod scanner;
pub mod table;

pub use accessors::RowEnum;
pub use error::{Error, Result, RowValueError};
pub use export::{row_to_json, rows_to_json, write_csv};
pub use key_value::KeyValueTable;
pub use parser::{parse_csv, parse_csv_str};
pub use patch::{apply_patch, Edit, PatchFile};
pub use row::{join_rows, DirectRow, RowView};
pub use scanner::{load_family, scan_directory, Family, FamilyMember, ScanResult};
pub use table::{RawTable, RowData, Rows, TableOptions};
