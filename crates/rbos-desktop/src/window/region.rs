//! Window regions reported by hit testing

use serde::Serialize;

/// Part of a window under the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRegion {
    /// Title bar (drag to move)
    TitleBar,
    /// Application content
    Content,
    CloseButton,
    MinimizeButton,
    MaximizeButton,
    ResizeN,
    ResizeS,
    ResizeE,
    ResizeW,
    ResizeNE,
    ResizeNW,
    ResizeSE,
    ResizeSW,
}

impl WindowRegion {
    /// Parse a compass edge name ("n", "se", ...) into a resize region
    pub fn from_edge(edge: &str) -> Option<Self> {
        match edge {
            "n" => Some(WindowRegion::ResizeN),
            "s" => Some(WindowRegion::ResizeS),
            "e" => Some(WindowRegion::ResizeE),
            "w" => Some(WindowRegion::ResizeW),
            "ne" => Some(WindowRegion::ResizeNE),
            "nw" => Some(WindowRegion::ResizeNW),
            "se" => Some(WindowRegion::ResizeSE),
            "sw" => Some(WindowRegion::ResizeSW),
            _ => None,
        }
    }

    /// Check if this is a resize edge or corner
    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(
            self,
            WindowRegion::ResizeN
                | WindowRegion::ResizeS
                | WindowRegion::ResizeE
                | WindowRegion::ResizeW
                | WindowRegion::ResizeNE
                | WindowRegion::ResizeNW
                | WindowRegion::ResizeSE
                | WindowRegion::ResizeSW
        )
    }

    /// Whether dragging this region moves the left edge
    #[inline]
    pub(crate) fn moves_left(&self) -> bool {
        matches!(self, WindowRegion::ResizeW | WindowRegion::ResizeNW | WindowRegion::ResizeSW)
    }

    /// Whether dragging this region moves the top edge
    #[inline]
    pub(crate) fn moves_top(&self) -> bool {
        matches!(self, WindowRegion::ResizeN | WindowRegion::ResizeNE | WindowRegion::ResizeNW)
    }

    /// Whether dragging this region changes the width
    #[inline]
    pub(crate) fn changes_width(&self) -> bool {
        self.moves_left() || matches!(self, WindowRegion::ResizeE | WindowRegion::ResizeNE | WindowRegion::ResizeSE)
    }

    /// Whether dragging this region changes the height
    #[inline]
    pub(crate) fn changes_height(&self) -> bool {
        self.moves_top() || matches!(self, WindowRegion::ResizeS | WindowRegion::ResizeSE | WindowRegion::ResizeSW)
    }

    /// CSS cursor for this region
    pub fn cursor(&self) -> &'static str {
        match self {
            WindowRegion::TitleBar => "move",
            WindowRegion::Content => "default",
            WindowRegion::CloseButton | WindowRegion::MinimizeButton | WindowRegion::MaximizeButton => "pointer",
            WindowRegion::ResizeN | WindowRegion::ResizeS => "ns-resize",
            WindowRegion::ResizeE | WindowRegion::ResizeW => "ew-resize",
            WindowRegion::ResizeNE | WindowRegion::ResizeSW => "nesw-resize",
            WindowRegion::ResizeNW | WindowRegion::ResizeSE => "nwse-resize",
        }
    }
}
