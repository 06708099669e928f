//! Selectors for locating page elements
//!
//! Two kinds, shown by `Display` with their prefix:
//!   css:div.m6QErb            - CSS selector
//!   xpath://h1[@class='x']    - XPath expression, evaluated relative to the scope
//!
//! A `SelectorSet` is an ordered list of variants; lookups try each in turn.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector {
    pub kind: SelectorKind,
    pub expr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Css,
    XPath,
}

impl Selector {
    pub fn css(expr: &str) -> Self {
        Self {
            kind: SelectorKind::Css,
            expr: expr.to_string(),
        }
    }

    pub fn xpath(expr: &str) -> Self {
        Self {
            kind: SelectorKind::XPath,
            expr: expr.to_string(),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SelectorKind::Css => write!(f, "css:{}", self.expr),
            SelectorKind::XPath => write!(f, "xpath:{}", self.expr),
        }
    }
}

/// Ordered selector variants, first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    pub variants: Vec<Selector>,
}

impl SelectorSet {
    pub fn new(variants: Vec<Selector>) -> Self {
        Self { variants }
    }

    pub fn css(exprs: &[&str]) -> Self {
        Self::new(exprs.iter().map(|e| Selector::css(e)).collect())
    }

    pub fn xpath(exprs: &[&str]) -> Self {
        Self::new(exprs.iter().map(|e| Selector::xpath(e)).collect())
    }

    pub fn single(selector: Selector) -> Self {
        Self::new(vec![selector])
    }

    pub fn then(mut self, other: SelectorSet) -> Self {
        self.variants.extend(other.variants);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.variants.iter()
    }
}

impl From<Selector> for SelectorSet {
    fn from(selector: Selector) -> Self {
        Self::single(selector)
    }
}

impl std::fmt::Display for SelectorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.variants.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(" | "))
    }
}
