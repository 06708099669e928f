//! Review text normalization

use crate::error::{Result, TextError};
use mapharvest_store::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::info;

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://|www\.)(?:[a-zA-Z0-9$-_@.&+!*(),]|%[0-9a-fA-F]{2})+")
        .expect("valid regex")
});
static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2702}-\x{27B0}",
        r"\x{24C2}-\x{1F251}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA00}-\x{1FA6F}",
        r"\x{2600}-\x{26FF}",
        r"\x{2700}-\x{27BF}",
        "]+"
    ))
    .expect("valid regex")
});
static NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\.\s+").expect("valid regex"));
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.,!?\-]").expect("valid regex"));
static ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").expect("valid regex"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize one review: no links, emoji, quotes or numbering; lowercase; single spaces.
pub fn clean_review_text(text: &str) -> String {
    let text = URL.replace_all(text, "");
    let text = EMOJI.replace_all(&text, "");
    let text = text.replace(&['\n', '\r', '\t'][..], " ").replace('"', "");
    let text = text.to_lowercase();
    let text = NUMBERING.replace_all(&text, "");
    let text = SPECIAL.replace_all(&text, "");
    let text = ELLIPSIS.replace_all(&text, " ");
    let text = SPACES.replace_all(&text, " ");
    text.trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub rows_before: usize,
    pub rows_after: usize,
}

/// Clean `column` in place and drop rows left empty.
pub fn clean_table(table: &mut Table, column: &str) -> Result<CleanReport> {
    let index = table
        .column(column)
        .ok_or_else(|| TextError::MissingColumn(column.to_string()))?;
    let rows_before = table.len();
    for row in table.rows.iter_mut() {
        row[index] = clean_review_text(&row[index]);
    }
    table.rows.retain(|row| !row[index].is_empty());
    let report = CleanReport {
        rows_before,
        rows_after: table.len(),
    };
    info!(
        before = report.rows_before,
        after = report.rows_after,
        "cleaned reviews"
    );
    Ok(report)
}
