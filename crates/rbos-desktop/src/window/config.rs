//! Window options for creation

use serde::{Deserialize, Serialize};

use crate::math::{Size, Vec2};
use super::WindowCapabilities;

/// Options for opening a window
///
/// Unset fields fall back to the manager's `WindowDefaults`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Window title
    pub title: Option<String>,
    /// Initial position
    pub position: Option<Vec2>,
    /// Initial size
    pub size: Option<Size>,
    /// Application to render inside the window
    pub content_id: String,
    /// Fixed for the lifetime of the window
    pub capabilities: WindowCapabilities,
}

impl WindowOptions {
    /// Options for an application with every other field defaulted
    pub fn app(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Vec2::new(x, y));
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn capabilities(mut self, capabilities: WindowCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
