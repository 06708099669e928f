//! Locator - fluent API for finding elements and reading fields from them

use crate::error::{Error, Result};
use crate::renderer::{ElementRef, Renderer, Scope, WaitMode};
use crate::selector::SelectorSet;
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of a single field lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.found().unwrap_or(default)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T: Default> Lookup<T> {
    pub fn unwrap_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Locator {
    selectors: SelectorSet,
    scope: Scope,
    timeout: Duration,
    mode: WaitMode,
}

impl Locator {
    pub fn new(selectors: impl Into<SelectorSet>) -> Self {
        Self {
            selectors: selectors.into(),
            scope: Scope::Page,
            timeout: Duration::ZERO,
            mode: WaitMode::Present,
        }
    }

    pub fn within(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Total wait budget, shared by all variants.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn mode(mut self, mode: WaitMode) -> Self {
        self.mode = mode;
        self
    }

    /// First element matched by any variant, in variant order.
    ///
    /// Each variant waits only for what is left of the budget; once it is
    /// spent the remaining variants are still checked once.
    pub fn find(&self, renderer: &mut dyn Renderer) -> Result<Option<ElementRef>> {
        let deadline = Instant::now() + self.timeout;
        for selector in self.selectors.iter() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if let Some(element) = renderer.find(self.scope, selector, self.mode, remaining)? {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }

    pub fn exists(&self, renderer: &mut dyn Renderer) -> bool {
        self.find(renderer).map(|e| e.is_some()).unwrap_or(false)
    }

    /// Like `find`, but a miss is a timeout error.
    pub fn wait(&self, renderer: &mut dyn Renderer) -> Result<ElementRef> {
        self.find(renderer)?.ok_or_else(|| {
            Error::timeout(
                &self.selectors.to_string(),
                self.timeout.as_millis() as u64,
            )
        })
    }

    /// Trimmed text of the first variant that yields a non-empty value.
    pub fn text(&self, renderer: &mut dyn Renderer) -> Lookup<String> {
        self.first_non_empty(renderer, |r, el| r.read_text(el).map(Some))
    }

    /// Trimmed attribute value of the first variant that yields a non-empty value.
    pub fn attribute(&self, renderer: &mut dyn Renderer, name: &str) -> Lookup<String> {
        self.first_non_empty(renderer, |r, el| r.read_attribute(el, name))
    }

    fn first_non_empty<F>(&self, renderer: &mut dyn Renderer, mut read: F) -> Lookup<String>
    where
        F: FnMut(&mut dyn Renderer, ElementRef) -> Result<Option<String>>,
    {
        let deadline = Instant::now() + self.timeout;
        for selector in self.selectors.iter() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let element = match renderer.find(self.scope, selector, self.mode, remaining) {
                Ok(Some(element)) => element,
                Ok(None) => continue,
                Err(err) => {
                    debug!(%selector, %err, "lookup variant failed");
                    continue;
                }
            };
            match read(renderer, element) {
                Ok(Some(value)) if !value.trim().is_empty() => {
                    return Lookup::Found(value.trim().to_string())
                }
                Ok(_) => {}
                Err(err) => debug!(%selector, %err, "reading variant failed"),
            }
        }
        Lookup::NotFound
    }
}
