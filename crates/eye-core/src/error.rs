use crate::geometry::EyeSide;
use crate::surface::SurfaceError;

pub type EyeResult<T> = Result<T, EyeError>;

/// Everything that can go wrong while setting up or driving the eyes.
///
/// All variants except [`EyeError::Surface`] are configuration errors: they are
/// raised before the first frame is drawn and are not recoverable.
#[derive(thiserror::Error, Debug)]
pub enum EyeError {
    #[error("contour length mismatch for {lid}: open has {open} points, closed has {closed}")]
    ContourLengthMismatch {
        lid: &'static str,
        open: usize,
        closed: usize,
    },

    #[error("missing contour: {0}")]
    MissingContour(String),

    #[error("contour {0} has no points")]
    EmptyContour(String),

    #[error("degenerate {side} socket: {width}x{height}")]
    DegenerateSocket {
        side: EyeSide,
        width: f32,
        height: f32,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl EyeError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for errors that must abort before the render loop starts.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Surface(_))
    }
}

impl From<serde_json::Error> for EyeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_the_lid() {
        let err = EyeError::ContourLengthMismatch {
            lid: "upper",
            open: 32,
            closed: 31,
        };
        let msg = err.to_string();
        assert!(msg.contains("upper"));
        assert!(msg.contains("32"));
        assert!(msg.contains("31"));
    }

    #[test]
    fn surface_errors_are_not_configuration_errors() {
        let err = EyeError::from(SurfaceError::Present("lost".into()));
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("lost"));
        assert!(EyeError::invalid_config("x").is_configuration());
    }

    #[test]
    fn json_errors_convert() {
        let err: EyeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("serialization error:"));
    }
}
