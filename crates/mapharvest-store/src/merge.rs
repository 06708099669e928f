//! Merge every per-place review file under a dataset directory into one table

use crate::error::Result;
use crate::storage::{is_blank, Table};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const REVIEW_COLUMNS: &[&str] = &["review", "ulasan", "text", "comment", "content"];
pub const PLACE_COLUMNS: &[&str] = &[
    "nama_tempat",
    "place",
    "place_name",
    "placename",
    "nama",
    "location",
    "lokasi",
];
pub const MERGED_HEADERS: [&str; 2] = ["nama_tempat", "review"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub files: usize,
    pub skipped: usize,
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// `*.csv` files below `dir`, recursively, except `places.csv`; sorted.
pub fn review_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let lower = name.to_lowercase();
            if lower.ends_with(".csv") && lower != "places.csv" {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Rows as `(place, review)`, or `None` when either column is missing.
fn read_pairs(path: &Path) -> Result<Option<Vec<(String, String)>>> {
    let mut table = Table::read(path)?;
    for header in table.headers.iter_mut() {
        *header = header.trim().to_lowercase();
    }
    let pick = |candidates: &[&str]| candidates.iter().find_map(|c| table.column(c));
    let (Some(place), Some(review)) = (pick(PLACE_COLUMNS), pick(REVIEW_COLUMNS)) else {
        return Ok(None);
    };
    Ok(Some(
        table
            .rows
            .iter()
            .map(|row| (row[place].trim().to_string(), row[review].trim().to_string()))
            .collect(),
    ))
}

pub fn merge_reviews(dir: &Path) -> Result<(Table, MergeReport)> {
    let mut merged = Table::new(MERGED_HEADERS.iter().map(|h| h.to_string()).collect());
    let mut report = MergeReport::default();
    let mut seen = HashSet::new();

    for path in review_files(dir)? {
        let pairs = match read_pairs(&path) {
            Ok(Some(pairs)) => pairs,
            Ok(None) => {
                debug!(path = %path.display(), "no place/review columns, skipping");
                report.skipped += 1;
                continue;
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable file, skipping");
                report.skipped += 1;
                continue;
            }
        };
        report.files += 1;
        report.rows_read += pairs.len();
        for (place, review) in pairs {
            if is_blank(&place) || is_blank(&review) {
                continue;
            }
            if seen.insert((place.clone(), review.clone())) {
                merged.rows.push(vec![place, review]);
            }
        }
    }

    report.rows_kept = merged.len();
    info!(
        files = report.files,
        skipped = report.skipped,
        rows = report.rows_kept,
        "merged review files"
    );
    Ok((merged, report))
}
