//! Renderer contract - the browser operations the harvesting protocol needs
//!
//! Element references are opaque ids handed out by the renderer. They stay
//! valid while the element is attached to the current page; after a
//! navigation or a re-render they may go stale, which surfaces as
//! `ErrorCode::StaleElement` on the next call that uses them.

use crate::error::{Error, Result};
use crate::selector::Selector;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef(pub u64);

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Root of a lookup: the whole page or the subtree below one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Page,
    Within(ElementRef),
}

impl From<ElementRef> for Scope {
    fn from(element: ElementRef) -> Self {
        Scope::Within(element)
    }
}

/// Required element state for `Renderer::find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitMode {
    Present,
    Visible,
    Clickable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    PageDown,
    Enter,
}

impl Key {
    pub fn name(&self) -> &'static str {
        match self {
            Key::PageDown => "PageDown",
            Key::Enter => "Enter",
        }
    }
}

/// Which tier of the click fallback succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickTier {
    Direct,
    Script,
}

pub trait Renderer {
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// All elements currently rendered below `scope` that match `selector`, in document order.
    fn find_all(&mut self, scope: Scope, selector: &Selector) -> Result<Vec<ElementRef>>;

    /// Poll until an element in the required state appears or `timeout` elapses.
    /// `Ok(None)` means not found; errors are reserved for broken sessions or scripts.
    fn find(
        &mut self,
        scope: Scope,
        selector: &Selector,
        mode: WaitMode,
        timeout: Duration,
    ) -> Result<Option<ElementRef>>;

    fn read_text(&mut self, element: ElementRef) -> Result<String>;

    fn read_attribute(&mut self, element: ElementRef, name: &str) -> Result<Option<String>>;

    fn is_visible(&mut self, element: ElementRef) -> Result<bool>;

    /// Native click at the element's position.
    fn click_direct(&mut self, element: ElementRef) -> Result<()>;

    /// `element.click()` dispatched from page script.
    fn click_script(&mut self, element: ElementRef) -> Result<()>;

    /// Direct click, falling back to a script-driven click.
    fn click(&mut self, element: ElementRef) -> Result<ClickTier> {
        match self.click_direct(element) {
            Ok(()) => Ok(ClickTier::Direct),
            Err(direct) => self
                .click_script(element)
                .map(|_| ClickTier::Script)
                .map_err(|script| {
                    Error::action_failed(
                        "click",
                        &format!("direct: {}; script: {}", direct.message, script.message),
                    )
                }),
        }
    }

    fn scroll_by(&mut self, container: ElementRef, delta_pixels: i64) -> Result<()>;

    fn scroll_into_view(&mut self, element: ElementRef) -> Result<()>;

    fn scroll_top(&mut self, container: ElementRef) -> Result<i64>;

    fn scroll_height(&mut self, container: ElementRef) -> Result<i64>;

    fn send_key(&mut self, element: ElementRef, key: Key) -> Result<()>;

    /// Replace the value of an input element with `text`.
    fn type_text(&mut self, element: ElementRef, text: &str) -> Result<()>;

    /// Hide (display: none) every element matching any of the selectors; returns the count.
    fn hide_matching(&mut self, selectors: &[Selector]) -> Result<usize>;

    /// Settle delay between actions.
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    /// Release every resource held by the session. Further calls fail.
    fn close(&mut self) -> Result<()>;
}

/// Opens a fresh, independent renderer session.
pub trait Launcher {
    fn launch(&self) -> Result<Box<dyn Renderer>>;
}

impl<F> Launcher for F
where
    F: Fn() -> Result<Box<dyn Renderer>>,
{
    fn launch(&self) -> Result<Box<dyn Renderer>> {
        self()
    }
}
