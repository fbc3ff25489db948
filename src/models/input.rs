use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{MinuteOfDay, PrayerWindow};

pub const TOTAL_DAYS: u8 = 30;

/// Raw wall-clock reading. Kept signed so out-of-range values can be reported
/// rather than silently truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    pub hour: i64,
    pub minute: i64,
}

impl ClockReading {
    pub fn new(hour: i64, minute: i64) -> Self {
        Self { hour, minute }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerWindowInput {
    pub suhoor_end_hour: i64,
    pub suhoor_end_minute: i64,
    pub iftar_start_hour: i64,
    pub iftar_start_minute: i64,
}

impl PrayerWindowInput {
    pub fn from_window(window: PrayerWindow) -> Self {
        Self {
            suhoor_end_hour: i64::from(window.suhoor_end.hour()),
            suhoor_end_minute: i64::from(window.suhoor_end.minute()),
            iftar_start_hour: i64::from(window.iftar_start.hour()),
            iftar_start_minute: i64::from(window.iftar_start.minute()),
        }
    }
}

/// Everything one wallpaper render depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperInput {
    pub now: ClockReading,
    pub prayer_window: PrayerWindowInput,
    pub current_day: i64,
    pub canvas_width: i64,
    pub canvas_height: i64,
    pub location_label: String,
    /// Pre-formatted Gregorian date line, e.g. `"MON, 19 OCT"`.
    #[serde(default)]
    pub date_label: Option<String>,
    /// Pre-formatted Hijri date line.
    #[serde(default)]
    pub hijri_label: Option<String>,
}

/// [`WallpaperInput`] after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub now: MinuteOfDay,
    pub window: PrayerWindow,
    pub current_day: u8,
    pub width: u32,
    pub height: u32,
    pub location_label: String,
    pub date_label: Option<String>,
    pub hijri_label: Option<String>,
}

impl WallpaperInput {
    /// Checks every field before any computation happens.
    ///
    /// Clock fields and canvas size are hard errors. An out-of-range day
    /// counter is clamped to day 1.
    pub fn validate(&self) -> Result<ValidatedInput, EngineError> {
        let now = MinuteOfDay::from_hm(self.now.hour, self.now.minute)?;
        let suhoor_end = MinuteOfDay::from_hm(
            self.prayer_window.suhoor_end_hour,
            self.prayer_window.suhoor_end_minute,
        )?;
        let iftar_start = MinuteOfDay::from_hm(
            self.prayer_window.iftar_start_hour,
            self.prayer_window.iftar_start_minute,
        )?;

        let width = canvas_dim("canvasWidth", self.canvas_width)?;
        let height = canvas_dim("canvasHeight", self.canvas_height)?;

        let window = PrayerWindow::new(suhoor_end, iftar_start);
        if !window.is_well_formed() {
            log::warn!(
                "prayer window is malformed (suhoor {} / iftar {}); rendering degraded countdown",
                suhoor_end,
                iftar_start
            );
        }

        Ok(ValidatedInput {
            now,
            window,
            current_day: clamp_day(self.current_day),
            width,
            height,
            location_label: self.location_label.clone(),
            date_label: self.date_label.clone(),
            hijri_label: self.hijri_label.clone(),
        })
    }
}

// Matches the largest raster size resvg will reasonably allocate.
const MAX_CANVAS_DIM: i64 = 16_384;

fn canvas_dim(field: &'static str, value: i64) -> Result<u32, EngineError> {
    if value <= 0 || value > MAX_CANVAS_DIM {
        return Err(EngineError::invalid(field, value));
    }
    Ok(value as u32)
}

/// Days outside `1..=30` collapse to day 1.
pub fn clamp_day(day: i64) -> u8 {
    if (1..=i64::from(TOTAL_DAYS)).contains(&day) {
        day as u8
    } else {
        log::warn!("current day {} outside 1..={}, using 1", day, TOTAL_DAYS);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WallpaperInput {
        WallpaperInput {
            now: ClockReading::new(3, 0),
            prayer_window: PrayerWindowInput {
                suhoor_end_hour: 4,
                suhoor_end_minute: 28,
                iftar_start_hour: 18,
                iftar_start_minute: 10,
            },
            current_day: 12,
            canvas_width: 1179,
            canvas_height: 2556,
            location_label: "Dubai".to_string(),
            date_label: None,
            hijri_label: None,
        }
    }

    #[test]
    fn validates_a_well_formed_input() {
        let v = sample().validate().unwrap();
        assert_eq!(v.now.get(), 180);
        assert_eq!(v.window.suhoor_end.get(), 268);
        assert_eq!(v.window.iftar_start.get(), 1090);
        assert_eq!(v.current_day, 12);
        assert_eq!((v.width, v.height), (1179, 2556));
    }

    #[test]
    fn bad_clock_fields_fail_without_partial_output() {
        let mut input = sample();
        input.now.minute = 75;
        assert_eq!(
            input.validate(),
            Err(EngineError::invalid("minute", 75))
        );

        let mut input = sample();
        input.prayer_window.iftar_start_hour = 24;
        assert_eq!(input.validate(), Err(EngineError::invalid("hour", 24)));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let mut input = sample();
        input.canvas_width = 0;
        assert_eq!(
            input.validate(),
            Err(EngineError::invalid("canvasWidth", 0))
        );
    }

    #[test]
    fn out_of_range_day_clamps_to_one() {
        let mut input = sample();
        input.current_day = 31;
        assert_eq!(input.validate().unwrap().current_day, 1);
        input.current_day = 0;
        assert_eq!(input.validate().unwrap().current_day, 1);
        input.current_day = 30;
        assert_eq!(input.validate().unwrap().current_day, 30);
    }

    #[test]
    fn deserializes_camel_case_contract() {
        let json = r#"{
            "now": { "hour": 19, "minute": 0 },
            "prayerWindow": {
                "suhoorEndHour": 4, "suhoorEndMinute": 28,
                "iftarStartHour": 18, "iftarStartMinute": 10
            },
            "currentDay": 30,
            "canvasWidth": 1080,
            "canvasHeight": 2340,
            "locationLabel": "Lahore"
        }"#;
        let input: WallpaperInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.now, ClockReading::new(19, 0));
        assert_eq!(input.current_day, 30);
        assert!(input.hijri_label.is_none());
    }
}
