//! Rendering module
//!
//! The scene is composed as a sequence of immediate-mode draw calls against
//! the [`Canvas`] trait. The browser backend maps them onto a
//! `CanvasRenderingContext2d`; tests record them.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use scene::draw_frame;

/// RGBA color, channels 0-255 except alpha (0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string for the 2D context
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const PLAYER: Color = Color::rgb(0xff, 0x40, 0x81);
    pub const OBSTACLE: Color = Color::rgb(0x00, 0xbc, 0xd4);
    pub const POWERUP: Color = Color::rgb(0xff, 0xc1, 0x07);
    pub const PARTICLE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const TEXT: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 0.5);
}

/// Font sizes used by the HUD and overlays
pub mod fonts {
    pub const HUD: &str = "20px 'Helvetica Neue', sans-serif";
    pub const BANNER: &str = "40px 'Helvetica Neue', sans-serif";
}

/// Immediate-mode 2D drawing surface
pub trait Canvas {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    /// Whether background image `layer` has finished loading
    fn layer_ready(&self, layer: usize) -> bool;
    /// Draw background image `layer` stretched into the given rectangle
    fn draw_layer(&mut self, layer: usize, x: f32, y: f32, w: f32, h: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css() {
        assert_eq!(colors::PLAYER.css(), "#ff4081");
        assert_eq!(colors::OVERLAY.css(), "rgba(0, 0, 0, 0.5)");
        assert_eq!(colors::PARTICLE.with_alpha(2.0).css(), "#ffffff");
        assert_eq!(
            colors::PARTICLE.with_alpha(0.25).css(),
            "rgba(255, 255, 255, 0.25)"
        );
    }
}
