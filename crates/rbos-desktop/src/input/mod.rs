//! Input routing module
//!
//! Provides the drag state machine that turns pointer movement into window
//! move and resize requests.

mod router;
mod drag;
mod result;

pub use router::InputRouter;
pub use drag::DragState;
pub use result::InputResult;

use crate::math::{Size, Vec2};
use crate::window::WindowRegion;

/// Calculate new position and size after a resize drag.
///
/// Edges that do not move stay anchored, including when the size is clamped
/// to `min_size`.
pub fn calculate_resize(
    handle: WindowRegion,
    start_pos: Vec2,
    start_size: Size,
    delta: Vec2,
    min_size: Size,
) -> (Vec2, Size) {
    let mut new_pos = start_pos;
    let mut new_size = start_size;

    if handle.changes_width() {
        let dx = if handle.moves_left() { -delta.x } else { delta.x };
        new_size.width = (start_size.width + dx).max(min_size.width);
        if handle.moves_left() {
            new_pos.x = start_pos.x + (start_size.width - new_size.width);
        }
    }

    if handle.changes_height() {
        let dy = if handle.moves_top() { -delta.y } else { delta.y };
        new_size.height = (start_size.height + dy).max(min_size.height);
        if handle.moves_top() {
            new_pos.y = start_pos.y + (start_size.height - new_size.height);
        }
    }

    (new_pos, new_size)
}
