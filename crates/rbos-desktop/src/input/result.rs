//! Outcome of a pointer event, as reported to the shell

use serde::Serialize;

use crate::math::Vec2;
use crate::window::WindowId;

/// What the desktop did with a pointer event
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// Consumed by window chrome or an active drag
    Handled,
    /// Hit no window
    Unhandled,
    /// Landed in a window's content area; the shell passes it on to the app
    Forward {
        window_id: WindowId,
        /// App rendered in the window
        content_id: String,
        /// Pointer position relative to the window origin
        local: Vec2,
    },
}

impl InputResult {
    /// Anything but `Unhandled`
    #[inline]
    pub fn is_handled(&self) -> bool {
        !matches!(self, InputResult::Unhandled)
    }
}
