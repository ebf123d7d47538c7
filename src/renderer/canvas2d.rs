//! `CanvasRenderingContext2d` backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Canvas, Color};
use crate::platform::SurfaceSize;

/// Background image URLs, far layer first
pub const LAYER_URLS: [&str; 2] = ["images/layer1.jpg", "images/layer2.jpg"];

/// Why the 2D surface could not be created
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("getContext('2d') failed: {0}")]
    Context(String),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("could not create image element: {0}")]
    Image(String),
}

/// Browser 2D canvas with the two parallax images
pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    layers: [HtmlImageElement; 2],
}

impl Canvas2d {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Context(format!("{e:?}")))?
            .ok_or(SurfaceError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::NoContext)?;

        let layers = [load_image(LAYER_URLS[0])?, load_image(LAYER_URLS[1])?];
        Ok(Self {
            canvas,
            ctx,
            layers,
        })
    }

    /// Match the backing store to the logical surface size
    pub fn resize(&self, surface: SurfaceSize) {
        self.canvas.set_width(surface.width as u32);
        self.canvas.set_height(surface.height as u32);
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
    }
}

/// Start an asynchronous image load; drawing waits on `complete()`
fn load_image(url: &str) -> Result<HtmlImageElement, SurfaceError> {
    let image = HtmlImageElement::new().map_err(|e| SurfaceError::Image(format!("{e:?}")))?;
    image.set_src(url);
    Ok(image)
}

impl Canvas for Canvas2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn layer_ready(&self, layer: usize) -> bool {
        // A failed load also reports complete, but with no pixels
        self.layers
            .get(layer)
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }

    fn draw_layer(&mut self, layer: usize, x: f32, y: f32, w: f32, h: f32) {
        let Some(image) = self.layers.get(layer) else {
            return;
        };
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                image, x as f64, y as f64, w as f64, h as f64,
            );
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x as f64, y as f64, radius as f64, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color) {
        self.set_fill(color);
        self.ctx.set_font(font);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
