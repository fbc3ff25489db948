use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::thresholds::Thresholds;
use crate::engine::dots::DotLayout;
use crate::render::OutputFormat;

fn default_latitude() -> f64 {
    25.2048
}
fn default_longitude() -> f64 {
    55.2708
}
fn default_location_name() -> String {
    "Dubai".to_string()
}
fn default_calc_method() -> String {
    "UmmAlQura".to_string()
}
fn default_madhab() -> String {
    "Shafi".to_string()
}
fn default_timezone_offset() -> i32 {
    240
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_model() -> String {
    "iphone15".to_string()
}
fn default_star_seed() -> u32 {
    7
}
fn default_star_count() -> usize {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_calc_method")]
    pub calc_method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
    /// Days to add/subtract from the Hijri date for local moon sighting.
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            calc_method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Phone model key, see `hilal render --help` for the list.
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_star_seed")]
    pub star_seed: u32,
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    #[serde(default)]
    pub dot_layout: DotLayout,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            format: OutputFormat::default(),
            star_seed: default_star_seed(),
            star_count: default_star_count(),
            dot_layout: DotLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "hilal").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing file means defaults; a present but unparsable file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        config
            .thresholds
            .validate()
            .with_context(|| format!("Invalid thresholds in {:?}", path))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.location.name, "Dubai");
        assert_eq!(config.render.star_seed, 7);
        assert_eq!(config.render.star_count, 60);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.location.name = "Karachi".to_string();
        config.render.format = OutputFormat::Svg;
        config.render.dot_layout = DotLayout::Arc;
        config.thresholds.sunset_lead = 45;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.location.name, "Karachi");
        assert_eq!(loaded.render.format, OutputFormat::Svg);
        assert_eq!(loaded.render.dot_layout, DotLayout::Arc);
        assert_eq!(loaded.thresholds.sunset_lead, 45);
    }

    #[test]
    fn partial_file_fills_in_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render]\ndot_layout = \"two_rows\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.render.dot_layout, DotLayout::TwoRows);
        assert_eq!(config.render.model, "iphone15");
        assert_eq!(config.location.timezone_offset, 240);
    }

    #[test]
    fn out_of_range_thresholds_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thresholds]\narc_max_progress = -0.5\n").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("arc_max_progress"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
