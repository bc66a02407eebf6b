//! Pointer handling: hit testing, focus and drag operations

use tracing::debug;

use crate::input::{DragState, InputResult};
use crate::math::Vec2;
use crate::window::{WindowId, WindowMode, WindowRegion};
use super::Desktop;

impl Desktop {
    /// Start a move drag on a window from an explicit pointer position
    pub fn start_move_drag(&mut self, id: WindowId, x: f32, y: f32) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let grab = Vec2::new(x, y) - window.position;
        self.windows.focus_window(id);
        self.input.begin(DragState::Move { window_id: id, grab });
    }

    /// Start a resize drag from a compass edge name ("n", "se", ...)
    pub fn start_resize_drag(&mut self, id: WindowId, edge: &str, x: f32, y: f32) {
        if let Some(edge) = WindowRegion::from_edge(edge) {
            self.begin_resize(id, edge, Vec2::new(x, y));
        }
    }

    fn begin_resize(&mut self, id: WindowId, edge: WindowRegion, pointer: Vec2) {
        let Some(origin) = self.windows.get(id).map(|w| w.rect()) else {
            return;
        };
        self.windows.focus_window(id);
        self.input.begin(DragState::Resize { window_id: id, edge, origin, pointer });
    }

    /// Handle pointer down
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);

        let Some((window_id, region)) = self.windows.region_at(pos) else {
            return InputResult::Unhandled;
        };

        match region {
            WindowRegion::CloseButton => {
                self.windows.close_window(window_id);
                InputResult::Handled
            }
            WindowRegion::MinimizeButton => {
                self.windows.minimize_window(window_id);
                InputResult::Handled
            }
            WindowRegion::MaximizeButton => {
                self.toggle_maximize(window_id);
                InputResult::Handled
            }
            WindowRegion::TitleBar => {
                self.start_move_drag(window_id, x, y);
                InputResult::Handled
            }
            WindowRegion::Content => self.handle_content_click(window_id, pos),
            edge => {
                self.begin_resize(window_id, edge, pos);
                InputResult::Handled
            }
        }
    }

    /// Handle pointer move
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);

        let Some(drag) = self.input.active().copied() else {
            return InputResult::Unhandled;
        };
        drag.apply(&mut self.windows, pos, self.config.min_size);
        InputResult::Handled
    }

    /// Handle pointer up
    pub fn handle_pointer_up(&mut self) -> InputResult {
        match self.input.finish() {
            Some(drag) => {
                debug!(window = drag.window_id(), "drag finished");
                InputResult::Handled
            }
            None => InputResult::Unhandled,
        }
    }

    /// Maximize button behaviour; also suits title bar double-clicks
    pub fn toggle_maximize(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        if window.mode == WindowMode::Maximized {
            self.windows.restore_window(id);
        } else {
            self.windows.maximize_window(id);
        }
    }

    /// Focus the window and hand the click to its content
    fn handle_content_click(&mut self, window_id: WindowId, pos: Vec2) -> InputResult {
        self.windows.focus_window(window_id);
        match self.windows.get(window_id) {
            Some(window) => InputResult::Forward {
                window_id,
                content_id: window.content_id.clone(),
                local: pos - window.position,
            },
            None => InputResult::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::window::WindowOptions;

    fn desktop_with_window() -> (Desktop, WindowId) {
        let mut desktop = Desktop::default();
        let id = desktop.windows_mut().create_window(WindowOptions::app("notes")).id;
        (desktop, id)
    }

    #[test]
    fn test_title_bar_drag_moves_window() {
        let (mut desktop, id) = desktop_with_window();

        assert_eq!(desktop.handle_pointer_down(150.0, 110.0), InputResult::Handled);
        desktop.handle_pointer_move(250.0, 160.0);
        assert_eq!(desktop.handle_pointer_up(), InputResult::Handled);

        let window = desktop.windows().get(id).unwrap();
        assert_eq!(window.position, Vec2::new(200.0, 150.0));
        assert!(!desktop.input().is_dragging());
    }

    #[test]
    fn test_corner_drag_resizes_window() {
        let (mut desktop, id) = desktop_with_window();

        desktop.handle_pointer_down(495.0, 395.0);
        desktop.handle_pointer_move(545.0, 425.0);
        desktop.handle_pointer_up();

        let window = desktop.windows().get(id).unwrap();
        assert_eq!(window.position, Vec2::new(100.0, 100.0));
        assert_eq!(window.size, Size::new(450.0, 330.0));
    }

    #[test]
    fn test_drag_of_maximized_window_is_noop() {
        let (mut desktop, id) = desktop_with_window();
        desktop.windows_mut().maximize_window(id);

        desktop.start_move_drag(id, 150.0, 110.0);
        desktop.handle_pointer_move(400.0, 400.0);

        assert_eq!(desktop.windows().get(id).unwrap().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_content_click_forwards_local_coordinates() {
        let (mut desktop, id) = desktop_with_window();
        let result = desktop.handle_pointer_down(130.0, 200.0);
        assert_eq!(
            result,
            InputResult::Forward {
                window_id: id,
                content_id: "notes".to_string(),
                local: Vec2::new(30.0, 100.0),
            }
        );
        assert!(!desktop.input().is_dragging());
    }

    #[test]
    fn test_click_focuses_back_window() {
        let (mut desktop, back) = desktop_with_window();
        desktop
            .windows_mut()
            .create_window(WindowOptions::app("calc").position(600.0, 100.0));

        desktop.handle_pointer_down(300.0, 250.0);
        assert_eq!(desktop.windows().focused(), Some(back));
    }

    #[test]
    fn test_caption_buttons() {
        let (mut desktop, id) = desktop_with_window();
        let window = desktop.windows().get(id).unwrap();
        let max = window.maximize_button_rect().unwrap();
        let close = window.close_button_rect();

        desktop.handle_pointer_down(max.x + 1.0, max.y + 1.0);
        assert_eq!(desktop.windows().get(id).unwrap().mode, WindowMode::Maximized);
        desktop.handle_pointer_down(max.x + 1.0, max.y + 1.0);
        assert_eq!(desktop.windows().get(id).unwrap().mode, WindowMode::Normal);

        desktop.handle_pointer_down(close.x + 1.0, close.y + 1.0);
        assert!(desktop.windows().get(id).is_none());
    }

    #[test]
    fn test_pointer_on_empty_desktop() {
        let mut desktop = Desktop::default();
        assert_eq!(desktop.handle_pointer_down(10.0, 10.0), InputResult::Unhandled);
        assert_eq!(desktop.handle_pointer_move(20.0, 20.0), InputResult::Unhandled);
        assert_eq!(desktop.handle_pointer_up(), InputResult::Unhandled);
    }

    #[test]
    fn test_resize_drag_from_edge_name() {
        let (mut desktop, id) = desktop_with_window();
        desktop.start_resize_drag(id, "w", 100.0, 200.0);
        desktop.handle_pointer_move(50.0, 200.0);

        let window = desktop.windows().get(id).unwrap();
        assert_eq!(window.position, Vec2::new(50.0, 100.0));
        assert_eq!(window.size, Size::new(450.0, 300.0));

        desktop.start_resize_drag(id, "bogus", 0.0, 0.0);
        assert!(desktop.input().active().is_some_and(|d| d.is_resize()));
    }
}
