use std::time::Duration;

use log::{info, warn};

use crate::animation::{BlinkSequencer, Frame};
use crate::config::EyeConfig;
use crate::error::{EyeError, EyeResult};
use crate::geometry::{EyePair, Rect};
use crate::renderer::{FrameRenderer, Palette};
use crate::surface::RenderSurface;
use crate::wander::WanderModel;

/// Immutable eye geometry plus the running animation state.
///
/// Drive it with [`tick`](Self::tick) once per frame. Stopping is up to the
/// caller: simply stop calling `tick`.
#[derive(Clone, Debug)]
pub struct EyeEngine {
    renderer: FrameRenderer,
    sequencer: BlinkSequencer,
    frame_delay: Duration,
}

impl EyeEngine {
    pub fn new(renderer: FrameRenderer, sequencer: BlinkSequencer) -> Self {
        Self {
            renderer,
            sequencer,
            frame_delay: Duration::ZERO,
        }
    }

    /// Validate `config` and build everything needed to render.
    pub fn from_config(config: &EyeConfig) -> EyeResult<Self> {
        config.validate()?;
        let table = config.contour_table()?;
        let (left, right) = config.eye_centers();
        let eyes = EyePair::new(&table, left, right)?;
        let screen = Rect::new(
            0.0,
            0.0,
            config.display.width as f32,
            config.display.height as f32,
        );
        for eye in eyes.iter() {
            if eye.socket().intersect(&screen).is_none() {
                return Err(EyeError::invalid_config(format!(
                    "{} socket {:?} is off screen",
                    eye.side(),
                    eye.socket()
                )));
            }
        }

        let renderer = FrameRenderer::new(
            eyes,
            WanderModel::from(config),
            Palette::from(&config.colors),
            config.snap_to_pixels,
        );
        let sequencer =
            BlinkSequencer::new(config.blink.steps, config.blink.hold_frames, config.wander.steps);
        info!(
            "eye engine ready: {} blink steps, {} hold frames, {} wander steps",
            config.blink.steps, config.blink.hold_frames, config.wander.steps
        );

        Ok(Self {
            renderer,
            sequencer,
            frame_delay: Duration::from_millis(config.display.frame_delay_ms),
        })
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    pub fn sequencer(&self) -> &BlinkSequencer {
        &self.sequencer
    }

    /// Suggested pause between frames.
    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    pub fn prepare<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> EyeResult<()> {
        self.renderer.prepare(surface)
    }

    /// Render the next frame.
    ///
    /// The animation only advances once the frame has been drawn and
    /// presented. If the surface fails, the error is returned and the next
    /// call renders the same frame again.
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> EyeResult<Frame> {
        let mut next = self.sequencer.clone();
        let frame = next.tick();
        if let Err(err) = self.renderer.render_frame(surface, &frame) {
            warn!("frame {} not rendered: {err}", frame.index);
            return Err(err);
        }
        self.sequencer = next;
        Ok(frame)
    }
}
