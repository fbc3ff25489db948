use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

fn default_deep_night_margin() -> i32 {
    80
}
fn default_dawn_span() -> i32 {
    40
}
fn default_sunset_lead() -> i32 {
    60
}
fn default_night_visual_margin() -> i32 {
    30
}
fn default_arc_min_progress() -> f64 {
    0.005
}
fn default_arc_max_progress() -> f64 {
    0.999
}
fn default_star_sky_fraction() -> f64 {
    0.45
}

/// Every tunable boundary the engine classifies against, in one table.
///
/// Minute offsets are relative to fajr (suhoor end) and maghrib (iftar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Further than this from both boundaries is deep night.
    #[serde(default = "default_deep_night_margin")]
    pub deep_night_margin: i32,
    /// Dawn lasts this long after fajr.
    #[serde(default = "default_dawn_span")]
    pub dawn_span: i32,
    /// Sunset starts this long before maghrib.
    #[serde(default = "default_sunset_lead")]
    pub sunset_lead: i32,
    /// Stars and moon show when further than this from both boundaries.
    #[serde(default = "default_night_visual_margin")]
    pub night_visual_margin: i32,
    /// Below this the countdown arc is not drawn at all.
    #[serde(default = "default_arc_min_progress")]
    pub arc_min_progress: f64,
    /// Upper clamp keeping the arc short of a closed circle.
    #[serde(default = "default_arc_max_progress")]
    pub arc_max_progress: f64,
    /// Share of the canvas height stars may occupy, from the top.
    #[serde(default = "default_star_sky_fraction")]
    pub star_sky_fraction: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            deep_night_margin: default_deep_night_margin(),
            dawn_span: default_dawn_span(),
            sunset_lead: default_sunset_lead(),
            night_visual_margin: default_night_visual_margin(),
            arc_min_progress: default_arc_min_progress(),
            arc_max_progress: default_arc_max_progress(),
            star_sky_fraction: default_star_sky_fraction(),
        }
    }
}

impl Thresholds {
    /// Rejects tables the engine cannot classify or draw against.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("deep_night_margin", self.deep_night_margin),
            ("dawn_span", self.dawn_span),
            ("sunset_lead", self.sunset_lead),
            ("night_visual_margin", self.night_visual_margin),
        ] {
            if value < 0 {
                bail!("thresholds.{} must not be negative (got {})", name, value);
            }
        }
        if !(0.0..1.0).contains(&self.arc_min_progress) {
            bail!(
                "thresholds.arc_min_progress must be in [0, 1) (got {})",
                self.arc_min_progress
            );
        }
        if !(self.arc_min_progress..1.0).contains(&self.arc_max_progress) {
            bail!(
                "thresholds.arc_max_progress must be in [{}, 1) (got {})",
                self.arc_min_progress,
                self.arc_max_progress
            );
        }
        if !(self.star_sky_fraction > 0.0 && self.star_sky_fraction <= 1.0) {
            bail!(
                "thresholds.star_sky_fraction must be in (0, 1] (got {})",
                self.star_sky_fraction
            );
        }
        Ok(())
    }
}
