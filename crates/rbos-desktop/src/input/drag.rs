//! Active pointer drags and how they map onto window geometry

use tracing::debug;

use crate::math::{Rect, Size, Vec2};
use crate::window::{WindowId, WindowManager, WindowRegion};
use super::calculate_resize;

/// A drag in progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    /// Title bar drag
    Move {
        window_id: WindowId,
        /// Pointer position relative to the window origin when grabbed
        grab: Vec2,
    },
    /// Edge or corner drag
    Resize {
        window_id: WindowId,
        edge: WindowRegion,
        /// Window geometry when the drag began
        origin: Rect,
        /// Pointer position when the drag began
        pointer: Vec2,
    },
}

impl DragState {
    /// Window being dragged
    pub fn window_id(&self) -> WindowId {
        match *self {
            DragState::Move { window_id, .. } | DragState::Resize { window_id, .. } => window_id,
        }
    }

    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DragState::Resize { .. })
    }

    /// Push the geometry for the current pointer position into the manager.
    ///
    /// A resize only repositions the window once the new size was accepted,
    /// so a rejected west or north drag never slides the window.
    pub(crate) fn apply(&self, windows: &mut WindowManager, at: Vec2, min_size: Size) {
        match *self {
            DragState::Move { window_id, grab } => {
                let target = at - grab;
                windows.move_window(window_id, target.x, target.y);
            }
            DragState::Resize { window_id, edge, origin, pointer } => {
                let (position, size) =
                    calculate_resize(edge, origin.position(), origin.size(), at - pointer, min_size);
                if let Err(err) = windows.try_resize(window_id, size) {
                    debug!(%err, "resize drag ignored");
                    return;
                }
                windows.move_window(window_id, position.x, position.y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{WindowCapabilities, WindowOptions};

    #[test]
    fn test_move_keeps_grab_offset() {
        let mut wm = WindowManager::new();
        let id = wm.create_window(WindowOptions::default()).id;
        let drag = DragState::Move { window_id: id, grab: Vec2::new(10.0, 5.0) };

        drag.apply(&mut wm, Vec2::new(60.0, 45.0), Size::new(100.0, 100.0));
        assert_eq!(wm.get(id).unwrap().position, Vec2::new(50.0, 40.0));
        assert!(!drag.is_resize());
    }

    #[test]
    fn test_rejected_west_resize_leaves_window_in_place() {
        let mut wm = WindowManager::new();
        let id = wm
            .create_window(WindowOptions::default().capabilities(WindowCapabilities::fixed()))
            .id;
        let origin = wm.get(id).unwrap().rect();
        let drag = DragState::Resize {
            window_id: id,
            edge: WindowRegion::ResizeW,
            origin,
            pointer: Vec2::new(origin.x, origin.y + 50.0),
        };

        drag.apply(&mut wm, Vec2::new(origin.x - 40.0, origin.y + 50.0), Size::new(100.0, 100.0));
        assert_eq!(wm.get(id).unwrap().rect(), origin);
        assert_eq!(drag.window_id(), id);
    }
}
