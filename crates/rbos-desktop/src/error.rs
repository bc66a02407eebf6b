//! Error types for the desktop.

use crate::window::{Capability, WindowId, WindowMode};

/// A window request that was rejected.
///
/// The silent operations on `WindowManager` swallow these; the `try_*`
/// variants return them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// No window with this id exists.
    #[error("window {0} not found")]
    NotFound(WindowId),

    /// Geometry changes require the window to be in normal mode.
    #[error("window {id} is {mode:?}, geometry changes need Normal")]
    NotNormal { id: WindowId, mode: WindowMode },

    /// The window was created without the required capability.
    #[error("window {id} does not allow {capability:?}")]
    MissingCapability { id: WindowId, capability: Capability },
}

/// Errors raised while saving or restoring a window layout.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Stored layout is not valid JSON for the snapshot schema.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Stored layout was written by a newer build.
    #[error("unsupported snapshot version {found} (newest known {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A stored id or z-order lies outside the range the desktop hands out.
    #[error("snapshot {field} {value} exceeds {max}")]
    CounterOutOfRange { field: &'static str, value: u64, max: u64 },

    /// The backing store refused a read or write.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid desktop config: {0}")]
    Parse(#[from] toml::de::Error),
}
