use log::trace;

use crate::animation::Frame;
use crate::contour::{Lid, Point};
use crate::error::EyeResult;
use crate::geometry::{EyePair, EyeSide};
use crate::lid::lid_mask;
use crate::surface::{Color, RenderSurface};
use crate::wander::WanderModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Lids and everything outside the sockets.
    pub background: Color,
    pub sclera: Color,
    pub iris: Color,
    pub pupil: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            sclera: Color::WHITE,
            iris: Color::RED,
            pupil: Color::BLACK,
        }
    }
}

/// Turns frame parameters into draw calls.
///
/// Draw order per frame: both sockets in the sclera color, both irises with
/// their pupils, then the four lid masks on top (each clipped to its own
/// socket), then present.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    eyes: EyePair,
    wander: WanderModel,
    palette: Palette,
    snap: bool,
}

impl FrameRenderer {
    pub fn new(eyes: EyePair, wander: WanderModel, palette: Palette, snap: bool) -> Self {
        Self {
            eyes,
            wander,
            palette,
            snap,
        }
    }

    pub fn eyes(&self) -> &EyePair {
        &self.eyes
    }

    pub fn wander(&self) -> &WanderModel {
        &self.wander
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Blank the whole surface to the background color and show it.
    pub fn prepare<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> EyeResult<()> {
        surface.clear()?;
        surface.set_clip(surface.bounds())?;
        surface.set_color(self.palette.background);
        surface.fill_rectangle(surface.bounds())?;
        surface.present()?;
        surface.end_frame()?;
        Ok(())
    }

    pub fn render_frame<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &Frame,
    ) -> EyeResult<()> {
        let angle = frame.wander.angle();

        surface.set_color(self.palette.sclera);
        for eye in self.eyes.iter() {
            surface.set_clip(eye.socket())?;
            surface.fill_rectangle(eye.socket())?;
        }

        let pupil_radius = self.snapped(self.wander.pupil_radius(angle));
        for eye in self.eyes.iter() {
            let center = self.snapped_point(self.wander.iris_center(eye.side(), eye.center(), angle));
            surface.set_clip(eye.socket())?;
            surface.set_color(self.palette.iris);
            surface.fill_circle(center, self.wander.iris_radius)?;
            surface.set_color(self.palette.pupil);
            surface.fill_circle(center, pupil_radius)?;
        }

        surface.set_color(self.palette.background);
        for side in EyeSide::BOTH {
            let eye = self.eyes.eye(side);
            surface.set_clip(eye.socket())?;
            for lid in [Lid::Lower, Lid::Upper] {
                let mask = lid_mask(eye, lid, frame.blink, self.snap)?;
                surface.fill_polygon(&mask)?;
            }
        }

        surface.present()?;
        surface.end_frame()?;
        trace!("rendered frame {}", frame.index);
        Ok(())
    }

    fn snapped(&self, v: f32) -> f32 {
        if self.snap {
            v.round()
        } else {
            v
        }
    }

    fn snapped_point(&self, p: Point) -> Point {
        if self.snap {
            p.round()
        } else {
            p
        }
    }
}
