pub mod input;
pub mod phase;
pub mod scene;
pub mod time;

pub use input::{ClockReading, PrayerWindowInput, ValidatedInput, WallpaperInput, TOTAL_DAYS};
pub use phase::{DayPhase, DotStatus, NightDepth};
pub use scene::{Color, Node, SceneDescription};
pub use time::{MinuteOfDay, PrayerWindow, MINUTES_PER_DAY};
