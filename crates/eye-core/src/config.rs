use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contour::{ContourTable, Point};
use crate::error::{EyeError, EyeResult};
use crate::renderer::Palette;
use crate::surface::Color;
use crate::wander::WanderModel;

// ============================================================
// Serializable config types
// ============================================================

/// Static tuning for the eyes, read once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeConfig {
    pub version: u32,
    pub display: DisplayConfig,
    pub eye: EyeShapeConfig,
    pub wander: WanderConfig,
    pub blink: BlinkConfig,
    pub colors: ColorConfig,
    /// Round lid points, iris centers and pupil radii to whole pixels.
    pub snap_to_pixels: bool,
    /// Lid contours keyed by path name; the built-in table when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contours: Option<BTreeMap<String, Vec<[f32; 2]>>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Pause between frames. Zero runs as fast as the surface allows.
    pub frame_delay_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeShapeConfig {
    pub radius: f32,
    pub iris_radius: f32,
    pub pupil_radius_min: f32,
    pub pupil_radius_max: f32,
    /// Horizontal distance of each eye center from the display center, in
    /// eye radii.
    pub separation: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    pub x: f32,
    pub y: f32,
    pub steps: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    pub steps: u32,
    pub hold_frames: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: [u8; 3],
    pub sclera: [u8; 3],
    pub iris: [u8; 3],
    pub pupil: [u8; 3],
}

// ============================================================
// Defaults
// ============================================================

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            display: DisplayConfig::default(),
            eye: EyeShapeConfig::default(),
            wander: WanderConfig::default(),
            blink: BlinkConfig::default(),
            colors: ColorConfig::default(),
            snap_to_pixels: true,
            contours: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            frame_delay_ms: 0,
        }
    }
}

impl Default for EyeShapeConfig {
    fn default() -> Self {
        Self {
            radius: 48.0,
            iris_radius: 28.0,
            pupil_radius_min: 12.0,
            pupil_radius_max: 22.0,
            separation: 2.0,
        }
    }
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            x: 20.0,
            y: 16.0,
            steps: 100,
        }
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            steps: 16,
            hold_frames: 100,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        let p = Palette::default();
        Self {
            background: p.background.into(),
            sclera: p.sclera.into(),
            iris: p.iris.into(),
            pupil: p.pupil.into(),
        }
    }
}

// ============================================================
// Conversions: config types → runtime types
// ============================================================

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Color::rgb(c[0], c[1], c[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<&ColorConfig> for Palette {
    fn from(c: &ColorConfig) -> Self {
        Self {
            background: c.background.into(),
            sclera: c.sclera.into(),
            iris: c.iris.into(),
            pupil: c.pupil.into(),
        }
    }
}

impl From<&EyeConfig> for WanderModel {
    fn from(c: &EyeConfig) -> Self {
        Self {
            wander_x: c.wander.x,
            wander_y: c.wander.y,
            iris_radius: c.eye.iris_radius,
            pupil_radius_min: c.eye.pupil_radius_min,
            pupil_radius_max: c.eye.pupil_radius_max,
        }
    }
}

// ============================================================
// EyeConfig: top-level config
// ============================================================

impl EyeConfig {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse and validate in one step.
    pub fn load(json: &str) -> EyeResult<Self> {
        let config = Self::from_json(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EyeResult<()> {
        if self.version != Self::CURRENT_VERSION {
            return Err(EyeError::invalid_config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(EyeError::invalid_config("display size must be non-zero"));
        }
        if self.wander.steps == 0 {
            return Err(EyeError::invalid_config("wander.steps must be at least 1"));
        }
        if self.blink.steps == 0 {
            return Err(EyeError::invalid_config("blink.steps must be at least 1"));
        }
        let eye = &self.eye;
        for (name, value) in [("eye.radius", eye.radius), ("eye.iris_radius", eye.iris_radius)] {
            if !(value > 0.0) {
                return Err(EyeError::invalid_config(format!("{name} must be positive")));
            }
        }
        if !(eye.pupil_radius_min >= 0.0) || eye.pupil_radius_min > eye.pupil_radius_max {
            return Err(EyeError::invalid_config(
                "pupil radii must satisfy 0 <= min <= max",
            ));
        }
        Ok(())
    }

    /// The configured contour table, or the built-in one.
    pub fn contour_table(&self) -> EyeResult<ContourTable> {
        match &self.contours {
            Some(named) => ContourTable::from_named(named),
            None => Ok(ContourTable::default()),
        }
    }

    /// Centers of the (left, right) eyes. The left eye sits on the viewer's
    /// right.
    pub fn eye_centers(&self) -> (Point, Point) {
        let cx = (self.display.width / 2) as f32;
        let cy = (self.display.height / 2) as f32;
        let dx = (self.eye.separation * self.eye.radius).trunc();
        (Point::new(cx + dx, cy), Point::new(cx - dx, cy))
    }
}
