use anyhow::{anyhow, Result};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use salah::prelude::*;

use crate::config::LocationConfig;
use crate::models::PrayerWindow;

/// The two boundaries of a fasting day, local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastingTimes {
    pub fajr: NaiveTime,
    pub maghrib: NaiveTime,
}

impl FastingTimes {
    pub fn window(&self) -> PrayerWindow {
        PrayerWindow::from_times(self.fajr, self.maghrib)
    }
}

pub struct PrayerCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
}

impl PrayerCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
    ) -> Result<Self> {
        // Validate method + madhab early
        parse_method(method)?;
        parse_madhab(madhab)?;
        FixedOffset::east_opt(tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", tz_offset_minutes))?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
        })
    }

    pub fn from_location(location: &LocationConfig) -> Result<Self> {
        Self::new(
            location.latitude,
            location.longitude,
            &location.calc_method,
            &location.madhab,
            location.timezone_offset,
        )
    }

    pub fn times_for_date(&self, date: NaiveDate) -> Result<FastingTimes> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> NaiveTime {
            utc.with_timezone(&offset).time()
        };

        let fasting = FastingTimes {
            fajr: to_local(times.time(Prayer::Fajr)),
            maghrib: to_local(times.time(Prayer::Maghrib)),
        };
        log::debug!(
            "{} at ({:.4}, {:.4}): fajr {} maghrib {}",
            date,
            self.lat,
            self.lng,
            fasting.fajr.format("%H:%M"),
            fasting.maghrib.format("%H:%M")
        );
        Ok(fasting)
    }

    pub fn window_for_date(&self, date: NaiveDate) -> Result<PrayerWindow> {
        Ok(self.times_for_date(date)?.window())
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!(
            "Unknown calculation method: '{}' (expected one of {})",
            s,
            CALC_METHODS.join(", ")
        )),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_settings() {
        assert!(PrayerCalculator::new(0.0, 0.0, "Martian", "Hanafi", 0).is_err());
        assert!(PrayerCalculator::new(0.0, 0.0, "Karachi", "Zahiri", 0).is_err());
        assert!(PrayerCalculator::new(0.0, 0.0, "Karachi", "Hanafi", 24 * 60).is_err());
    }

    #[test]
    fn unknown_method_lists_the_choices() {
        let err = PrayerCalculator::new(0.0, 0.0, "Martian", "Hanafi", 0).err().unwrap();
        let msg = err.to_string();
        assert!(msg.contains("'Martian'"));
        assert!(msg.contains("UmmAlQura"));
        assert!(msg.contains("Turkey"));
    }

    #[test]
    fn every_listed_method_parses() {
        for m in CALC_METHODS {
            assert!(parse_method(m).is_ok(), "{m}");
        }
    }

    #[test]
    fn dubai_window_is_well_formed() {
        let calc = PrayerCalculator::from_location(&LocationConfig::default()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let window = calc.window_for_date(date).unwrap();
        assert!(window.is_well_formed());
        // Dubai in March: fajr around 05:00, maghrib around 18:30
        assert!((4..=6).contains(&window.suhoor_end.hour()));
        assert!((17..=19).contains(&window.iftar_start.hour()));
    }
}
