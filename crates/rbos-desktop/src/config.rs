//! Desktop configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::{Rect, Size};

/// Values applied to `WindowOptions` fields that were left unset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowDefaults {
    /// Title for windows created without one
    pub title: String,
    /// Geometry for windows created without a position or size
    pub rect: Rect,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            rect: Rect::new(100.0, 100.0, 400.0, 300.0),
        }
    }
}

/// Settings for a `Desktop`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Defaults for new windows
    pub window: WindowDefaults,
    /// Smallest size a pointer resize may produce
    pub min_size: Size,
    /// Key under which the window layout is stored
    pub storage_key: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            window: WindowDefaults::default(),
            min_size: Size::new(100.0, 100.0),
            storage_key: "redbyte.windows".to_string(),
        }
    }
}

impl DesktopConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}
