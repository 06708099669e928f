//! Dataset storage - one UTF-8 CSV file (with BOM) per write

use crate::error::{Result, StoreError};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const BOM: &[u8] = "\u{feff}".as_bytes();
const MAX_NAME_CHARS: usize = 50;

/// A directory of dataset files.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn save<T: Serialize>(&self, name: &str, records: &[T]) -> Result<PathBuf> {
        let path = self.file(name);
        write_records(&path, records)?;
        Ok(path)
    }

    /// Save under `<prefix>_<label>_<YYYYmmdd_HHMMSS>.csv`.
    pub fn save_timestamped<T: Serialize>(
        &self,
        prefix: &str,
        label: &str,
        records: &[T],
    ) -> Result<PathBuf> {
        self.save(&timestamped_name(prefix, label), records)
    }

    /// CSV files in the directory, sorted by name.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            if let Some(s) = name.to_str() {
                if s.ends_with(".csv") {
                    files.push(s.to_string());
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Write `records` with a header row; parent directories are created.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut w = create_with_bom(path)?;
    {
        let mut csv = csv::Writer::from_writer(&mut w);
        for record in records {
            csv.serialize(record)?;
        }
        csv.flush()?;
    }
    w.flush()?;
    debug!(path = %path.display(), rows = records.len(), "wrote csv");
    Ok(())
}

/// Keep the first record for each key, in order.
pub fn unique_by<T, K, F>(records: &[T], mut key: F) -> Vec<&T>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    records.iter().filter(|r| seen.insert(key(r))).collect()
}

/// Non-blank values of the `link` column; pandas' literal `nan` counts as blank.
pub fn read_links(path: &Path) -> Result<Vec<String>> {
    let table = Table::read(path)?;
    let column = table.require("link", path)?;
    Ok(table
        .rows
        .iter()
        .map(|row| row.get(column).map(|v| v.trim()).unwrap_or_default())
        .filter(|link| !is_blank(link))
        .map(str::to_string)
        .collect())
}

pub fn is_blank(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("nan")
}

pub fn timestamped_name(prefix: &str, label: &str) -> String {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}_{}.csv", prefix, sanitize(label), ts)
}

/// Runs of non-word characters become `_`; at most 50 chars.
pub fn sanitize(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        if c.is_alphanumeric() || c == '_' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let out: String = out.trim_matches('_').chars().take(MAX_NAME_CHARS).collect();
    let out = out.trim_end_matches('_');
    if out.is_empty() {
        "unnamed".to_string()
    } else {
        out.to_string()
    }
}

fn create_with_bom(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(BOM)?;
    Ok(w)
}

/// Untyped CSV contents: a header row and string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Ragged rows are padded or cut to the header width.
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut w = create_with_bom(path)?;
        {
            let mut csv = csv::Writer::from_writer(&mut w);
            csv.write_record(&self.headers)?;
            for row in &self.rows {
                csv.write_record(row)?;
            }
            csv.flush()?;
        }
        w.flush()?;
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require(&self, name: &str, path: &Path) -> Result<usize> {
        self.column(name).ok_or_else(|| StoreError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
