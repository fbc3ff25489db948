use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

pub const MINUTES_PER_DAY: i32 = 1440;

/// Minute of the civil day, always in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Wraps any signed minute count onto the 24h clock.
    pub fn wrapping(minutes: i32) -> Self {
        MinuteOfDay(minutes.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Validating constructor from a wall-clock hour and minute.
    pub fn from_hm(hour: i64, minute: i64) -> Result<Self, EngineError> {
        if !(0..24).contains(&hour) {
            return Err(EngineError::invalid("hour", hour));
        }
        if !(0..60).contains(&minute) {
            return Err(EngineError::invalid("minute", minute));
        }
        Ok(MinuteOfDay((hour * 60 + minute) as u16))
    }

    pub fn from_naive_time(t: NaiveTime) -> Self {
        MinuteOfDay((t.hour() * 60 + t.minute()) as u16)
    }

    pub fn get(self) -> i32 {
        i32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteOfDay {
    type Err = EngineError;

    /// Parses `HH:MM`, tolerating a trailing annotation such as `"04:28 (+04)"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean = s.split_whitespace().next().unwrap_or("");
        let (h, m) = clean
            .split_once(':')
            .ok_or_else(|| EngineError::invalid("time", s))?;
        let hour: i64 = h.parse().map_err(|_| EngineError::invalid("hour", h))?;
        let minute: i64 = m.parse().map_err(|_| EngineError::invalid("minute", m))?;
        MinuteOfDay::from_hm(hour, minute)
    }
}

/// The two daily boundaries a fasting day is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrayerWindow {
    /// Fajr: suhoor must be finished by now.
    pub suhoor_end: MinuteOfDay,
    /// Maghrib: the fast is broken.
    pub iftar_start: MinuteOfDay,
}

impl PrayerWindow {
    pub fn new(suhoor_end: MinuteOfDay, iftar_start: MinuteOfDay) -> Self {
        Self {
            suhoor_end,
            iftar_start,
        }
    }

    pub fn from_times(fajr: NaiveTime, maghrib: NaiveTime) -> Self {
        Self::new(
            MinuteOfDay::from_naive_time(fajr),
            MinuteOfDay::from_naive_time(maghrib),
        )
    }

    /// Iftar must fall after suhoor within the same civil day.
    pub fn is_well_formed(&self) -> bool {
        self.iftar_start > self.suhoor_end
    }

    /// Length of the fast in minutes; zero for malformed windows.
    pub fn fasting_minutes(&self) -> i32 {
        (self.iftar_start.get() - self.suhoor_end.get()).max(0)
    }
}
