//! mapharvest-core - browser primitives for scroll-driven harvesting
//!
//! Deterministic Rust primitives over a rendered page: find, read, click,
//! scroll. The harvesting protocol in `mapharvest` only talks to the
//! `Renderer` trait; the Chrome backend is one implementation of it.
//!
//! ## Backends
//!
//! - **chrome** (default feature): headless or headed Chrome via DevTools

pub mod error;
pub mod locator;
pub mod renderer;
pub mod selector;
pub mod session;

#[cfg(feature = "chrome")]
pub mod chrome;

#[cfg(feature = "chrome")]
pub use chrome::{ChromeLauncher, ChromeOptions, ChromeRenderer};
pub use error::{Error, ErrorCode, Result};
pub use locator::{Locator, Lookup};
pub use renderer::{ClickTier, ElementRef, Key, Launcher, Renderer, Scope, WaitMode};
pub use selector::{Selector, SelectorKind, SelectorSet};
pub use session::Session;

pub mod prelude {
    #[cfg(feature = "chrome")]
    pub use crate::chrome::{ChromeLauncher, ChromeOptions};
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::locator::{Locator, Lookup};
    pub use crate::renderer::{ElementRef, Key, Launcher, Renderer, Scope, WaitMode};
    pub use crate::selector::{Selector, SelectorSet};
    pub use crate::session::Session;
}
