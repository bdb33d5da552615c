//! # Pointer Lock
//!
//! While a [`PointerLock`] exists the cursor is grabbed and hidden and raw
//! mouse motion drives the look. Dropping it gives the cursor back.

use std::sync::Arc;

use winit::{
    error::ExternalError,
    window::{CursorGrabMode, Window},
};

/// Scoped cursor capture for one window.
pub struct PointerLock {
    window: Arc<Window>,
}

impl PointerLock {
    /// Grabs and hides the cursor.
    ///
    /// `Locked` is tried first; platforms without it (X11, Windows) fall back
    /// to `Confined`, which is enough since motion is read from raw device
    /// events.
    ///
    /// # Errors
    /// Returns the platform error if neither grab mode is available.
    pub fn engage(window: Arc<Window>) -> Result<Self, ExternalError> {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))?;
        window.set_cursor_visible(false);
        log::debug!("pointer locked");
        Ok(Self { window })
    }
}

impl Drop for PointerLock {
    fn drop(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("failed to release cursor grab: {}", e);
        }
        self.window.set_cursor_visible(true);
        log::debug!("pointer released");
    }
}
