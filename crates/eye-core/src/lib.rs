pub mod animation;
pub mod config;
pub mod contour;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod lid;
pub mod raster;
pub mod renderer;
pub mod surface;
pub mod wander;

#[cfg(feature = "gpu")]
pub mod gpu;

pub use animation::{BlinkPhase, BlinkSequencer, Frame};
pub use config::EyeConfig;
pub use contour::{Contour, ContourTable, Lid, Point};
pub use engine::EyeEngine;
pub use error::{EyeError, EyeResult};
pub use geometry::{EyeGeometry, EyePair, EyeSide, Rect};
pub use lid::{deform, deform_snapped, lid_mask};
pub use raster::Canvas;
pub use renderer::{FrameRenderer, Palette};
pub use surface::{Color, RenderSurface, SurfaceError};
pub use wander::{pupil_fraction, WanderModel, WanderPhase};

#[cfg(feature = "gpu")]
pub use gpu::CanvasPresenter;
