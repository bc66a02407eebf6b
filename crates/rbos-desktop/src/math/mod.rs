//! Geometry primitives in pixel units

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;

/// Window frame metrics used for hit testing
#[derive(Clone, Copy, Debug)]
pub struct FrameStyle {
    /// Height of the title bar
    pub title_bar_height: f32,
    /// Width and height of a caption button
    pub button_size: f32,
    /// Gap between caption buttons and the frame edge
    pub button_margin: f32,
    /// Thickness of the resize edges
    pub resize_handle_size: f32,
    /// Size of the resize corners
    pub corner_handle_size: f32,
}

/// Frame metrics shared by the shell and the hit tester
pub const FRAME_STYLE: FrameStyle = FrameStyle {
    title_bar_height: 28.0,
    button_size: 20.0,
    button_margin: 4.0,
    resize_handle_size: 6.0,
    corner_handle_size: 12.0,
};
