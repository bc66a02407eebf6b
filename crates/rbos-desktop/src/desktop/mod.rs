//! Desktop coordinating the window manager and pointer input
//!
//! This module is split into:
//! - `input`: pointer event handling and drag operations

mod input;

use tracing::info;

use crate::config::DesktopConfig;
use crate::error::PersistenceError;
use crate::input::InputRouter;
use crate::persistence::{KeyValueStore, Snapshot};
use crate::window::WindowManager;

/// Desktop shell state: windows plus the active pointer drag
pub struct Desktop {
    /// Window manager
    windows: WindowManager,
    /// Input router
    input: InputRouter,
    /// Settings
    config: DesktopConfig,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl Desktop {
    /// Create an empty desktop
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            windows: WindowManager::with_defaults(config.window.clone()),
            input: InputRouter::new(),
            config,
        }
    }

    /// Window manager (read access)
    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    /// Window manager (for open/close/focus requests from the shell)
    pub fn windows_mut(&mut self) -> &mut WindowManager {
        &mut self.windows
    }

    /// Input router state
    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    /// Active configuration
    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Save the window layout under the configured key
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PersistenceError> {
        self.windows.snapshot().save(store, &self.config.storage_key)
    }

    /// Replace the window layout with the one stored under the configured key.
    ///
    /// Returns false if nothing was stored. Any active drag is cancelled.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<bool, PersistenceError> {
        let Some(snapshot) = Snapshot::load(store, &self.config.storage_key)? else {
            return Ok(false);
        };
        info!(windows = snapshot.windows.len(), "layout restored");
        self.windows = WindowManager::from_snapshot(snapshot, self.config.window.clone());
        self.input.finish();
        Ok(true)
    }
}
