pub mod devices;
pub mod fonts;
pub mod png;
pub mod svg;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::RenderError;
use crate::models::SceneDescription;

pub use devices::canvas_for;
pub use fonts::FontCache;
pub use png::PngRenderer;
pub use svg::SvgRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    #[default]
    Png,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(anyhow::anyhow!("Unknown output format: {}", s)),
        }
    }
}

/// Turns a finished scene into file bytes.
pub trait SceneRenderer {
    fn format(&self) -> OutputFormat;

    fn render(&self, scene: &SceneDescription) -> Result<Vec<u8>, RenderError>;
}

pub fn renderer_for(format: OutputFormat, fonts: Arc<FontCache>) -> Box<dyn SceneRenderer> {
    match format {
        OutputFormat::Svg => Box::new(SvgRenderer),
        OutputFormat::Png => Box::new(PngRenderer::new(fonts)),
    }
}
