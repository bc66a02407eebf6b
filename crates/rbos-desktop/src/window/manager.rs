//! Window manager for lifecycle, focus, and z-order
//!
//! Every request has two forms. The `try_*` methods report why a request was
//! rejected; the plain methods (`move_window`, `focus_window`, ...) ignore
//! rejected requests and never panic on unknown ids.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::WindowDefaults;
use crate::error::WindowError;
use crate::math::{Rect, Size, Vec2, FRAME_STYLE};
use crate::persistence::Snapshot;
use super::{Capability, Window, WindowId, WindowMode, WindowOptions, WindowRegion};

/// Window manager owning every window record and the z-order counter
pub struct WindowManager {
    /// Windows in creation order
    windows: Vec<Window>,
    /// Applied to unset creation options
    defaults: WindowDefaults,
    /// Next window ID
    next_id: u64,
    /// Next z-order value
    next_z: u64,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    /// Create a new window manager
    pub fn new() -> Self {
        Self::with_defaults(WindowDefaults::default())
    }

    /// Create a window manager with custom creation defaults
    pub fn with_defaults(defaults: WindowDefaults) -> Self {
        Self {
            windows: Vec::new(),
            defaults,
            next_id: 1,
            next_z: 1,
        }
    }

    /// Open a window. It becomes the only focused window and is placed in front.
    pub fn create_window(&mut self, options: WindowOptions) -> &Window {
        let id = self.next_id;
        self.next_id += 1;
        let z_order = self.take_z();

        let window = Window {
            id,
            title: options.title.unwrap_or_else(|| self.defaults.title.clone()),
            position: options.position.unwrap_or_else(|| self.defaults.rect.position()),
            size: options.size.unwrap_or_else(|| self.defaults.rect.size()),
            mode: WindowMode::Normal,
            z_order,
            focused: true,
            capabilities: options.capabilities,
            content_id: options.content_id,
        };

        debug!(id, content = %window.content_id, "window created");
        self.defocus_all();
        self.windows.push(window);
        &self.windows[self.windows.len() - 1]
    }

    /// Close a window, returning its final record.
    ///
    /// Focus is not handed to another window.
    pub fn try_close(&mut self, id: WindowId) -> Result<Window, WindowError> {
        let index = self.index_of(id)?;
        Ok(self.windows.remove(index))
    }

    /// Focus a window and bring it to the front
    pub fn try_focus(&mut self, id: WindowId) -> Result<(), WindowError> {
        let index = self.index_of(id)?;
        self.defocus_all();
        let z_order = self.take_z();
        let window = &mut self.windows[index];
        window.focused = true;
        window.z_order = z_order;
        Ok(())
    }

    /// Move a window in normal mode
    pub fn try_move(&mut self, id: WindowId, position: Vec2) -> Result<(), WindowError> {
        let window = self.normal_window_mut(id)?;
        window.position = position;
        Ok(())
    }

    /// Resize a resizable window in normal mode
    pub fn try_resize(&mut self, id: WindowId, size: Size) -> Result<(), WindowError> {
        let window = self.window_mut(id)?;
        require(window, Capability::Resize)?;
        let window = self.normal_window_mut(id)?;
        window.size = size;
        Ok(())
    }

    /// Minimize a window that allows it
    pub fn try_minimize(&mut self, id: WindowId) -> Result<(), WindowError> {
        self.set_mode_with(id, Capability::Minimize, WindowMode::Minimized)
    }

    /// Maximize a window that allows it
    pub fn try_maximize(&mut self, id: WindowId) -> Result<(), WindowError> {
        self.set_mode_with(id, Capability::Maximize, WindowMode::Maximized)
    }

    /// Return a window to normal mode from any mode
    pub fn try_restore(&mut self, id: WindowId) -> Result<(), WindowError> {
        self.window_mut(id)?.mode = WindowMode::Normal;
        Ok(())
    }

    /// Close a window if it exists
    pub fn close_window(&mut self, id: WindowId) {
        ignore("close", self.try_close(id).map(drop));
    }

    /// Focus a window if it exists
    pub fn focus_window(&mut self, id: WindowId) {
        ignore("focus", self.try_focus(id));
    }

    /// Move a window if it exists and is in normal mode
    pub fn move_window(&mut self, id: WindowId, x: f32, y: f32) {
        ignore("move", self.try_move(id, Vec2::new(x, y)));
    }

    /// Resize a window if it exists, is resizable and is in normal mode
    pub fn resize_window(&mut self, id: WindowId, width: f32, height: f32) {
        ignore("resize", self.try_resize(id, Size::new(width, height)));
    }

    /// Minimize a window if it exists and allows it
    pub fn minimize_window(&mut self, id: WindowId) {
        ignore("minimize", self.try_minimize(id));
    }

    /// Maximize a window if it exists and allows it
    pub fn maximize_window(&mut self, id: WindowId) {
        ignore("maximize", self.try_maximize(id));
    }

    /// Restore a window to normal mode if it exists
    pub fn restore_window(&mut self, id: WindowId) {
        ignore("restore", self.try_restore(id));
    }

    /// All windows in creation order
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Get the currently focused window ID
    pub fn focused(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.focused).map(|w| w.id)
    }

    /// Get the number of windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    /// Get windows sorted by z-order (back to front)
    pub fn windows_by_z(&self) -> Vec<&Window> {
        let mut windows: Vec<&Window> = self.windows.iter().collect();
        windows.sort_by_key(|w| w.z_order);
        windows
    }

    /// Find the topmost visible window at a position
    pub fn window_at(&self, pos: Vec2) -> Option<WindowId> {
        self.visible_front_to_back()
            .find(|w| w.rect().contains(pos))
            .map(|w| w.id)
    }

    /// Find which region of which window is at a position
    pub fn region_at(&self, pos: Vec2) -> Option<(WindowId, WindowRegion)> {
        self.visible_front_to_back()
            .find(|w| w.rect().contains(pos))
            .map(|w| (w.id, hit_test_window(w, pos)))
    }

    /// Capture the layout for persistence
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.windows.clone(), self.next_id, self.next_z)
    }

    /// Rebuild a manager from a saved layout.
    ///
    /// Counters are raised past every stored id and z-order, and at most one
    /// window (the frontmost flagged one) keeps focus. Windows whose id or
    /// z-order exceeds `Snapshot::MAX_COUNTER` are dropped.
    pub fn from_snapshot(snapshot: Snapshot, defaults: WindowDefaults) -> Self {
        let mut seen = HashSet::new();
        let mut windows = snapshot.windows;
        windows.retain(|w| {
            let in_range = w.id <= Snapshot::MAX_COUNTER && w.z_order <= Snapshot::MAX_COUNTER;
            if !in_range {
                warn!(id = w.id, z_order = w.z_order, "dropping window with out-of-range counters");
            }
            in_range && seen.insert(w.id)
        });

        let max_id = windows.iter().map(|w| w.id).max().unwrap_or(0);
        let max_z = windows.iter().map(|w| w.z_order).max().unwrap_or(0);

        let focused = windows
            .iter()
            .filter(|w| w.focused)
            .max_by_key(|w| w.z_order)
            .map(|w| w.id);
        for window in &mut windows {
            window.focused = Some(window.id) == focused;
        }

        Self {
            windows,
            defaults,
            next_id: snapshot.next_id.min(Snapshot::MAX_COUNTER).max(max_id + 1),
            next_z: snapshot.next_z.min(Snapshot::MAX_COUNTER).max(max_z + 1),
        }
    }

    fn take_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    fn defocus_all(&mut self) {
        for window in &mut self.windows {
            window.focused = false;
        }
    }

    fn index_of(&self, id: WindowId) -> Result<usize, WindowError> {
        self.windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(WindowError::NotFound(id))
    }

    fn window_mut(&mut self, id: WindowId) -> Result<&mut Window, WindowError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(WindowError::NotFound(id))
    }

    fn normal_window_mut(&mut self, id: WindowId) -> Result<&mut Window, WindowError> {
        let window = self.window_mut(id)?;
        if !window.is_normal() {
            return Err(WindowError::NotNormal { id, mode: window.mode });
        }
        Ok(window)
    }

    fn set_mode_with(
        &mut self,
        id: WindowId,
        capability: Capability,
        mode: WindowMode,
    ) -> Result<(), WindowError> {
        let window = self.window_mut(id)?;
        require(window, capability)?;
        window.mode = mode;
        Ok(())
    }

    fn visible_front_to_back(&self) -> impl Iterator<Item = &Window> {
        let mut windows: Vec<&Window> = self
            .windows
            .iter()
            .filter(|w| w.mode != WindowMode::Minimized)
            .collect();
        windows.sort_by_key(|w| std::cmp::Reverse(w.z_order));
        windows.into_iter()
    }
}

fn require(window: &Window, capability: Capability) -> Result<(), WindowError> {
    if window.capabilities.allows(capability) {
        Ok(())
    } else {
        Err(WindowError::MissingCapability { id: window.id, capability })
    }
}

fn ignore(op: &'static str, result: Result<(), WindowError>) {
    if let Err(err) = result {
        debug!(op, %err, "window request ignored");
    }
}

// =============================================================================
// Hit testing helper functions
// =============================================================================

/// Hit test a window that contains `pos`
fn hit_test_window(window: &Window, pos: Vec2) -> WindowRegion {
    if let Some(region) = hit_test_buttons(window, pos) {
        return region;
    }

    // Only normal, resizable windows expose resize handles
    let resizable = window.is_normal() && window.capabilities.resizable;

    if resizable {
        if let Some(region) = hit_test_resize_corners(window.rect(), pos) {
            return region;
        }
    }

    if window.title_bar_rect().contains(pos) {
        return WindowRegion::TitleBar;
    }

    if resizable {
        if let Some(region) = hit_test_resize_edges(window.rect(), pos) {
            return region;
        }
    }

    WindowRegion::Content
}

/// Hit test caption buttons (close, maximize, minimize)
fn hit_test_buttons(window: &Window, pos: Vec2) -> Option<WindowRegion> {
    if window.close_button_rect().contains(pos) {
        return Some(WindowRegion::CloseButton);
    }
    if window.maximize_button_rect().is_some_and(|r| r.contains(pos)) {
        return Some(WindowRegion::MaximizeButton);
    }
    if window.minimize_button_rect().is_some_and(|r| r.contains(pos)) {
        return Some(WindowRegion::MinimizeButton);
    }
    None
}

/// Hit test resize corner handles
fn hit_test_resize_corners(rect: Rect, pos: Vec2) -> Option<WindowRegion> {
    let handle = FRAME_STYLE.corner_handle_size;
    let left = pos.x < rect.x + handle;
    let right = pos.x >= rect.right() - handle;
    let top = pos.y < rect.y + handle;
    let bottom = pos.y >= rect.bottom() - handle;

    match (top, bottom, left, right) {
        (true, _, true, _) => Some(WindowRegion::ResizeNW),
        (true, _, _, true) => Some(WindowRegion::ResizeNE),
        (_, true, true, _) => Some(WindowRegion::ResizeSW),
        (_, true, _, true) => Some(WindowRegion::ResizeSE),
        _ => None,
    }
}

/// Hit test resize edge handles (non-corner)
fn hit_test_resize_edges(rect: Rect, pos: Vec2) -> Option<WindowRegion> {
    let handle = FRAME_STYLE.resize_handle_size;

    if pos.y < rect.y + handle {
        return Some(WindowRegion::ResizeN);
    }
    if pos.y >= rect.bottom() - handle {
        return Some(WindowRegion::ResizeS);
    }
    if pos.x < rect.x + handle {
        return Some(WindowRegion::ResizeW);
    }
    if pos.x >= rect.right() - handle {
        return Some(WindowRegion::ResizeE);
    }
    None
}
