//! RedByte OS Desktop - window management for the browser shell
//!
//! Owns every window record and arbitrates focus and z-order. The rendering
//! layer reads window state and feeds pointer events back in.
//!
//! # Module Organization
//!
//! - `math` - `Vec2`, `Size`, `Rect` and frame metrics
//! - `window` - `WindowManager`, window records, capabilities, hit regions
//! - `input` - drag state machine and resize geometry
//! - `desktop` - `Desktop` tying windows and pointer input together
//! - `persistence` - layout snapshots over a key-value string store
//! - `config` - `DesktopConfig` loaded from TOML
//! - `wasm` - wasm-bindgen exports (feature `wasm`)

pub mod config;
pub mod desktop;
pub mod error;
pub mod input;
pub mod math;
pub mod persistence;
pub mod window;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{DesktopConfig, WindowDefaults};
pub use desktop::Desktop;
pub use error::{ConfigError, PersistenceError, WindowError};
pub use input::{calculate_resize, DragState, InputResult, InputRouter};
pub use math::{Rect, Size, Vec2, FRAME_STYLE};
pub use persistence::{KeyValueStore, MemoryStore, Snapshot};
pub use window::{
    Capability, Window, WindowCapabilities, WindowId, WindowManager, WindowMode, WindowOptions,
    WindowRegion,
};
