//! Structured errors that the CLI can emit as JSON

use serde::{Deserialize, Serialize};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Timeout,
    StaleElement,
    ActionFailed,
    ScriptFailed,
    SessionFailed,
    Unknown,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn timeout(selector: &str, timeout_ms: u64) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Timeout after {}ms waiting for: {}", timeout_ms, selector),
        )
    }

    pub fn stale(element: u64) -> Self {
        Self::new(
            ErrorCode::StaleElement,
            format!("Element #{} is no longer attached to the page", element),
        )
    }

    pub fn action_failed(action: &str, reason: &str) -> Self {
        Self::new(
            ErrorCode::ActionFailed,
            format!("{} failed: {}", action, reason),
        )
    }

    pub fn script_failed(reason: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ScriptFailed, format!("Script failed: {}", reason))
    }

    pub fn session_failed(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::SessionFailed,
            format!("Browser session could not be started: {}", reason),
        )
        .with_suggestions(vec![
            "Check that Chrome or Chromium is installed".to_string(),
            "Set CHROME to the browser executable path".to_string(),
        ])
    }

    /// Transient errors are expected while a lazily rendered page settles.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::Timeout | ErrorCode::StaleElement
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::script_failed(format!("unexpected script result: {}", e))
    }
}
