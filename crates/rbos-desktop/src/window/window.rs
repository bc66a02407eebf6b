//! Window record, display mode and capabilities

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size, Vec2, FRAME_STYLE};
use super::WindowId;

/// Display mode of a window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// A single window capability
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Resize,
    Minimize,
    Maximize,
}

/// What the user may do with a window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowCapabilities {
    /// Can be resized
    pub resizable: bool,
    /// Can be minimized
    pub minimizable: bool,
    /// Can be maximized
    pub maximizable: bool,
}

impl Default for WindowCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

impl WindowCapabilities {
    /// Every capability
    pub const fn full() -> Self {
        Self {
            resizable: true,
            minimizable: true,
            maximizable: true,
        }
    }

    /// Fixed-size window that can only be moved and closed
    pub const fn fixed() -> Self {
        Self {
            resizable: false,
            minimizable: false,
            maximizable: false,
        }
    }

    /// Check a single capability
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Resize => self.resizable,
            Capability::Minimize => self.minimizable,
            Capability::Maximize => self.maximizable,
        }
    }
}

/// A window owned by the `WindowManager`
///
/// Records are only handed out by shared reference; every change goes
/// through the manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    /// Title bar text
    pub title: String,
    /// Top-left corner
    pub position: Vec2,
    /// Outer size
    pub size: Size,
    /// Display mode
    pub mode: WindowMode,
    /// Front-to-back ordering key (higher is in front)
    pub z_order: u64,
    /// Whether this is the focused window
    pub focused: bool,
    /// Fixed at creation
    pub capabilities: WindowCapabilities,
    /// Application rendered inside the window
    pub content_id: String,
}

impl Window {
    /// Check if the window is in normal mode
    #[inline]
    pub fn is_normal(&self) -> bool {
        self.mode == WindowMode::Normal
    }

    /// Outer rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    /// Title bar rectangle
    pub fn title_bar_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            FRAME_STYLE.title_bar_height,
        )
    }

    /// Rectangle of the n-th caption button counted from the right edge
    fn caption_button_rect(&self, slot: usize) -> Rect {
        let step = FRAME_STYLE.button_size + FRAME_STYLE.button_margin;
        let x = self.rect().right() - step * (slot as f32 + 1.0);
        let y = self.position.y + (FRAME_STYLE.title_bar_height - FRAME_STYLE.button_size) / 2.0;
        Rect::new(x, y, FRAME_STYLE.button_size, FRAME_STYLE.button_size)
    }

    /// Close button rectangle
    pub fn close_button_rect(&self) -> Rect {
        self.caption_button_rect(0)
    }

    /// Maximize button rectangle, if the window can be maximized
    pub fn maximize_button_rect(&self) -> Option<Rect> {
        self.capabilities
            .maximizable
            .then(|| self.caption_button_rect(1))
    }

    /// Minimize button rectangle, if the window can be minimized
    pub fn minimize_button_rect(&self) -> Option<Rect> {
        let slot = if self.capabilities.maximizable { 2 } else { 1 };
        self.capabilities
            .minimizable
            .then(|| self.caption_button_rect(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(capabilities: WindowCapabilities) -> Window {
        Window {
            id: 1,
            title: "Test".to_string(),
            position: Vec2::new(100.0, 100.0),
            size: Size::new(400.0, 300.0),
            mode: WindowMode::Normal,
            z_order: 1,
            focused: true,
            capabilities,
            content_id: "notes".to_string(),
        }
    }

    #[test]
    fn test_capabilities_allow() {
        let caps = WindowCapabilities {
            resizable: false,
            ..Default::default()
        };
        assert!(!caps.allows(Capability::Resize));
        assert!(caps.allows(Capability::Minimize));
        assert!(caps.allows(Capability::Maximize));
        assert!(!WindowCapabilities::fixed().allows(Capability::Maximize));
    }

    #[test]
    fn test_caption_buttons_right_aligned() {
        let w = window(WindowCapabilities::full());
        let close = w.close_button_rect();
        assert!((close.right() - (500.0 - FRAME_STYLE.button_margin)).abs() < 0.001);
        let max = w.maximize_button_rect().unwrap();
        let min = w.minimize_button_rect().unwrap();
        assert!(max.x < close.x);
        assert!(min.x < max.x);
    }

    #[test]
    fn test_missing_capabilities_hide_buttons() {
        let w = window(WindowCapabilities {
            maximizable: false,
            ..Default::default()
        });
        assert!(w.maximize_button_rect().is_none());
        assert_eq!(
            w.minimize_button_rect().unwrap().x,
            w.caption_button_rect(1).x
        );
        assert!(window(WindowCapabilities::fixed()).minimize_button_rect().is_none());
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        let json = serde_json::to_string(&WindowMode::Maximized).unwrap();
        assert_eq!(json, "\"maximized\"");
    }
}
