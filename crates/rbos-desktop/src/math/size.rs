//! 2D size type for window dimensions

use serde::{Deserialize, Serialize};

/// Width and height in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_serializes_named_fields() {
        let json = serde_json::to_string(&Size::new(400.0, 300.5)).unwrap();
        assert_eq!(json, r#"{"width":400.0,"height":300.5}"#);
    }
}
