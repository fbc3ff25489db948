use thiserror::Error;

/// Failures raised by the scene engine.
///
/// Only malformed inputs fail; degraded-but-renderable situations (an
/// out-of-range day counter, an inverted prayer window) are logged and
/// clamped instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: String },
}

impl EngineError {
    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        EngineError::InvalidInput {
            field,
            value: value.to_string(),
        }
    }
}

/// Failures raised while turning a scene into bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("svg parse failed: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to allocate {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
