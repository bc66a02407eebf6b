//! Window management module
//!
//! Provides window lifecycle, focus, z-order and hit testing.

#[allow(clippy::module_inception)]
mod window;
mod config;
mod region;
mod manager;

pub use window::{Capability, Window, WindowCapabilities, WindowMode};
pub use config::WindowOptions;
pub use region::WindowRegion;
pub use manager::WindowManager;

/// Unique window identifier
pub type WindowId = u64;
