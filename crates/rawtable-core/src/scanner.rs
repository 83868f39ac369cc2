//! Directory scanner for discovering and grouping table CSV files
//!
//! Files are grouped into families by the part of the file stem before the
//! first `.`: `items.csv`, `items.dlc1.csv` and `items.event.csv` all belong
//! to `items`. A family loads as one table with the rows of every member.

use crate::error::{Error, Result};
use crate::parser::parse_csv;
use crate::table::{RawTable, TableOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A family of CSV files sharing one table layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    /// Base name of the family (e.g., "items")
    pub name: String,
    /// Members of this family, base file first
    pub members: Vec<FamilyMember>,
}

impl Family {
    /// Get the base file (no suffix) if it exists
    pub fn base_file(&self) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.suffix.is_none())
    }

    /// Get variant files (with suffix), sorted alphabetically
    pub fn variants(&self) -> Vec<&FamilyMember> {
        self.members
            .iter()
            .filter(|m| m.suffix.is_some())
            .collect()
    }
}

/// A member of a family (single CSV file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
    /// Full path to the file
    pub path: PathBuf,
    /// Suffix (e.g., "dlc1" for "items.dlc1.csv"), None for base file
    pub suffix: Option<String>,
}

/// Result of scanning directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root directories that were scanned
    pub roots: Vec<PathBuf>,
    /// Discovered families, sorted by name
    pub families: Vec<Family>,
    /// Total number of files found
    pub total_files: usize,
}

impl ScanResult {
    /// Find a family by name
    pub fn find_family(&self, name: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.name == name)
    }

    /// Get all family names
    pub fn family_names(&self) -> Vec<&str> {
        self.families.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Scan one or more directories for CSV files and group them into families
pub fn scan_directory<P: AsRef<Path>>(roots: &[P]) -> Result<ScanResult> {
    let mut file_map: BTreeMap<String, Vec<(PathBuf, Option<String>)>> = BTreeMap::new();
    let mut total_files = 0;

    for root in roots {
        let root = root.as_ref();

        for entry in WalkDir::new(root).follow_links(true) {
            // an unreadable root fails the scan; anything below it is skipped
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();

            // Only process CSV files
            if !path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) {
                continue;
            }
            if let Some(file_name) = path.file_stem().and_then(|s| s.to_str()) {
                let (family_name, suffix) = extract_family_info(file_name);
                file_map
                    .entry(family_name)
                    .or_default()
                    .push((path.to_path_buf(), suffix));
                total_files += 1;
            }
        }
    }

    // Convert to families
    let families: Vec<Family> = file_map
        .into_iter()
        .map(|(name, mut members)| {
            // Sort members: base file first, then variants alphabetically
            members.sort_by(|a, b| match (&a.1, &b.1) {
                (None, None) => a.0.cmp(&b.0),
                (None, Some(_)) => std::cmp::Ordering::Less,
                (Some(_), None) => std::cmp::Ordering::Greater,
                (Some(sa), Some(sb)) => sa.cmp(sb).then_with(|| a.0.cmp(&b.0)),
            });

            let members = members
                .into_iter()
                .map(|(path, suffix)| FamilyMember { path, suffix })
                .collect();

            Family { name, members }
        })
        .collect();

    debug!(files = total_files, families = families.len(), "scan complete");

    Ok(ScanResult {
        roots: roots.iter().map(|r| r.as_ref().to_path_buf()).collect(),
        families,
        total_files,
    })
}

/// Load every member of a family and append them into one table.
///
/// The table takes the name of the first member (the base file when there is
/// one); every member's name is recorded in [`RawTable::full_names`].
pub fn load_family(family: &Family, options: TableOptions) -> Result<RawTable> {
    let mut members = family.members.iter();
    let first = members
        .next()
        .ok_or_else(|| Error::TableNotFound(family.name.clone()))?;

    let mut table = load_member(first, options)?;
    for member in members {
        let next = load_member(member, options).inspect_err(|e| {
            warn!(family = %family.name, path = %member.path.display(), error = %e, "failed to load family member");
        })?;
        table.append(next)?;
    }

    debug!(
        family = %family.name,
        members = family.members.len(),
        rows = table.row_count(),
        "loaded family"
    );
    Ok(table)
}

fn load_member(member: &FamilyMember, options: TableOptions) -> Result<RawTable> {
    parse_csv(&member.path, options)
}

/// Extract family name and optional suffix from a file stem
///
/// Examples:
/// - "items" -> ("items", None)
/// - "items.dlc1" -> ("items", Some("dlc1"))
/// - "items.dlc1.fix" -> ("items", Some("dlc1.fix"))
fn extract_family_info(file_name: &str) -> (String, Option<String>) {
    match file_name.split_once('.') {
        Some((base, suffix)) if !base.is_empty() && !suffix.is_empty() => {
            (base.to_string(), Some(suffix.to_string()))
        }
        _ => (file_name.to_string(), None),
    }
}
