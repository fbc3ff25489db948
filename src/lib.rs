//! Ramadan countdown wallpapers.
//!
//! The engine turns a clock reading, today's fajr/maghrib window and the day
//! of the month into a [`SceneDescription`]; renderers turn that scene into
//! SVG or PNG bytes.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod prayer_times;
pub mod render;
pub mod utils;

pub use engine::{compose, evaluate, SceneOptions};
pub use error::{EngineError, RenderError};
pub use models::{SceneDescription, WallpaperInput};
pub use render::{renderer_for, FontCache, OutputFormat, SceneRenderer};
