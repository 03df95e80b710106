//! The drawing backend the eyes render onto.

use serde::{Deserialize, Serialize};

use crate::contour::Point;
use crate::geometry::Rect;

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("clip rectangle {0:?} lies outside the surface")]
    OutOfBounds(Rect),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("present failed: {0}")]
    Present(String),
}

/// A raster target with a current color and a rectangular clip.
///
/// Calls are synchronous and are issued in drawing order; later fills cover
/// earlier ones.
pub trait RenderSurface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to black and drop the clip.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    fn set_color(&mut self, color: Color);

    fn fill_rectangle(&mut self, rect: Rect) -> Result<(), SurfaceError>;

    fn fill_polygon(&mut self, points: &[Point]) -> Result<(), SurfaceError>;

    fn fill_circle(&mut self, center: Point, radius: f32) -> Result<(), SurfaceError>;

    fn set_clip(&mut self, rect: Rect) -> Result<(), SurfaceError>;

    /// Show everything drawn since the last present.
    fn present(&mut self) -> Result<(), SurfaceError>;

    /// Per-frame housekeeping after [`present`](Self::present).
    fn end_frame(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }

    /// The whole surface as a rectangle.
    fn bounds(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(0.0, 0.0, w as f32, h as f32)
    }
}
