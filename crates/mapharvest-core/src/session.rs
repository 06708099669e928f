//! Session - one renderer, closed on every exit path

use crate::error::Result;
use crate::renderer::{Launcher, Renderer};
use tracing::{debug, warn};

pub struct Session {
    renderer: Box<dyn Renderer>,
    closed: bool,
}

impl Session {
    pub fn open(launcher: &dyn Launcher) -> Result<Self> {
        let renderer = launcher.launch()?;
        debug!("session opened");
        Ok(Self::new(renderer))
    }

    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            renderer,
            closed: false,
        }
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// Close explicitly to observe close errors; dropping closes silently.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.renderer.close()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.renderer.close() {
            warn!(%err, "failed to close session");
        } else {
            debug!("session closed");
        }
    }
}
