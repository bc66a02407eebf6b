//! Tracks the single drag a pointer can own

use super::DragState;

/// At most one drag is active; a new one replaces the old.
#[derive(Debug, Default)]
pub struct InputRouter {
    drag: Option<DragState>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drag in progress, if any
    #[inline]
    pub fn active(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin(&mut self, drag: DragState) {
        self.drag = Some(drag);
    }

    /// End the drag in progress and hand it back
    pub fn finish(&mut self) -> Option<DragState> {
        self.drag.take()
    }
}
