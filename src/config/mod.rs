pub mod settings;
pub mod thresholds;

pub use settings::{AppConfig, LocationConfig, RenderConfig};
pub use thresholds::Thresholds;
