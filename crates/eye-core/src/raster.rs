//! Software render surface on top of a tiny-skia pixmap.

use tiny_skia::{FillRule, Mask, Paint, PathBuilder, Pixmap, Transform};

use crate::contour::Point;
use crate::geometry::Rect;
use crate::surface::{Color, RenderSurface, SurfaceError};

/// Double-buffered RGBA canvas. Drawing goes to the back buffer;
/// [`present`](RenderSurface::present) copies it to the front buffer, which is
/// what [`frame`](Canvas::frame) exposes.
pub struct Canvas {
    back: Pixmap,
    front: Pixmap,
    clip: Option<Mask>,
    paint: Paint<'static>,
    presented: u64,
}

impl Canvas {
    /// Returns `None` for a zero-sized canvas.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let back = Pixmap::new(width, height)?;
        let front = back.clone();
        let mut canvas = Self {
            back,
            front,
            clip: None,
            paint: Paint::default(),
            presented: 0,
        };
        canvas.paint.anti_alias = true;
        canvas.back.fill(tiny_skia::Color::BLACK);
        canvas.front.fill(tiny_skia::Color::BLACK);
        Some(canvas)
    }

    pub fn with_anti_alias(mut self, enabled: bool) -> Self {
        self.paint.anti_alias = enabled;
        self
    }

    /// The last presented frame.
    pub fn frame(&self) -> &Pixmap {
        &self.front
    }

    /// The last presented frame as tightly packed RGBA8 rows.
    pub fn frame_rgba(&self) -> &[u8] {
        self.front.data()
    }

    /// Color of a pixel in the last presented frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.front.pixel(x, y)?;
        Some(Color::rgb(p.red(), p.green(), p.blue()))
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    fn to_skia_rect(rect: Rect) -> Result<tiny_skia::Rect, SurfaceError> {
        tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
            .ok_or_else(|| SurfaceError::InvalidShape(format!("rectangle {rect:?}")))
    }
}

impl RenderSurface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.back.width(), self.back.height())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.back.fill(tiny_skia::Color::BLACK);
        self.clip = None;
        Ok(())
    }

    fn set_color(&mut self, color: Color) {
        self.paint.set_color_rgba8(color.r, color.g, color.b, 255);
    }

    fn fill_rectangle(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        let rect = Self::to_skia_rect(rect)?;
        self.back
            .fill_rect(rect, &self.paint, Transform::identity(), self.clip.as_ref());
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point]) -> Result<(), SurfaceError> {
        let [first, rest @ ..] = points else {
            return Err(SurfaceError::InvalidShape("empty polygon".into()));
        };
        if rest.len() < 2 {
            return Err(SurfaceError::InvalidShape(format!(
                "polygon needs 3 points, got {}",
                points.len()
            )));
        }

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in rest {
            pb.line_to(p.x, p.y);
        }
        pb.close();
        let path = pb
            .finish()
            .ok_or_else(|| SurfaceError::InvalidShape("degenerate polygon".into()))?;

        self.back.fill_path(
            &path,
            &self.paint,
            FillRule::EvenOdd,
            Transform::identity(),
            self.clip.as_ref(),
        );
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f32) -> Result<(), SurfaceError> {
        if radius <= 0.0 {
            return Ok(());
        }
        let path = PathBuilder::from_circle(center.x, center.y, radius)
            .ok_or_else(|| SurfaceError::InvalidShape(format!("circle r={radius}")))?;
        self.back.fill_path(
            &path,
            &self.paint,
            FillRule::Winding,
            Transform::identity(),
            self.clip.as_ref(),
        );
        Ok(())
    }

    fn set_clip(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        let bounds = self.bounds();
        let visible = rect
            .intersect(&bounds)
            .ok_or(SurfaceError::OutOfBounds(rect))?;
        if visible == bounds {
            self.clip = None;
            return Ok(());
        }

        let (w, h) = self.size();
        let mut mask = Mask::new(w, h)
            .ok_or_else(|| SurfaceError::InvalidShape("clip mask".into()))?;
        let path = PathBuilder::from_rect(Self::to_skia_rect(visible)?);
        mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
        self.clip = Some(mask);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.front = self.back.clone();
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(40, 30).unwrap().with_anti_alias(false)
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(Canvas::new(0, 10).is_none());
    }

    #[test]
    fn drawing_is_invisible_until_present() {
        let mut c = canvas();
        c.set_color(Color::WHITE);
        c.fill_rectangle(Rect::new(0.0, 0.0, 40.0, 30.0)).unwrap();
        assert_eq!(c.pixel(5, 5), Some(Color::BLACK));
        c.present().unwrap();
        assert_eq!(c.pixel(5, 5), Some(Color::WHITE));
        assert_eq!(c.frames_presented(), 1);
    }

    #[test]
    fn clip_limits_fills() {
        let mut c = canvas();
        c.set_clip(Rect::new(10.0, 10.0, 10.0, 10.0)).unwrap();
        c.set_color(Color::RED);
        c.fill_circle(Point::new(15.0, 15.0), 30.0).unwrap();
        c.present().unwrap();
        assert_eq!(c.pixel(15, 15), Some(Color::RED));
        assert_eq!(c.pixel(5, 5), Some(Color::BLACK));
        assert_eq!(c.pixel(25, 15), Some(Color::BLACK));
    }

    #[test]
    fn clip_outside_surface_is_an_error() {
        let mut c = canvas();
        let err = c.set_clip(Rect::new(100.0, 100.0, 5.0, 5.0)).unwrap_err();
        assert!(matches!(err, SurfaceError::OutOfBounds(_)));
    }

    #[test]
    fn polygon_fill() {
        let mut c = canvas();
        c.set_color(Color::WHITE);
        c.fill_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 20.0),
            Point::new(0.0, 20.0),
        ])
        .unwrap();
        c.present().unwrap();
        assert_eq!(c.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(c.pixel(30, 10), Some(Color::BLACK));
    }

    #[test]
    fn short_polygons_are_rejected() {
        let mut c = canvas();
        assert!(c.fill_polygon(&[]).is_err());
        assert!(c
            .fill_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
            .is_err());
    }

    #[test]
    fn clear_resets_pixels_and_clip() {
        let mut c = canvas();
        c.set_clip(Rect::new(0.0, 0.0, 5.0, 5.0)).unwrap();
        c.set_color(Color::WHITE);
        c.fill_rectangle(Rect::new(0.0, 0.0, 40.0, 30.0)).unwrap();
        c.clear().unwrap();
        c.fill_rectangle(Rect::new(0.0, 0.0, 40.0, 30.0)).unwrap();
        c.present().unwrap();
        assert_eq!(c.pixel(20, 20), Some(Color::WHITE));
    }

    #[test]
    fn frame_rgba_is_tightly_packed() {
        let c = canvas();
        assert_eq!(c.frame_rgba().len(), 40 * 30 * 4);
    }
}
