//! Render surface sizing

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Drawable region in CSS pixels, always 2:1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl SurfaceSize {
    /// Derive the surface from its container width (height = width / 2).
    /// Degenerate widths fall back to the default size.
    pub fn from_container_width(width: f32) -> Self {
        if !width.is_finite() || width < 1.0 {
            return Self::default();
        }
        Self {
            width,
            height: width / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_to_one() {
        let s = SurfaceSize::from_container_width(1024.0);
        assert_eq!(s.width, 1024.0);
        assert_eq!(s.height, 512.0);
    }

    #[test]
    fn test_degenerate_width() {
        assert_eq!(SurfaceSize::from_container_width(0.0), SurfaceSize::default());
        assert_eq!(
            SurfaceSize::from_container_width(f32::NAN),
            SurfaceSize::default()
        );
    }
}
