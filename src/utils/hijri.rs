use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

use crate::engine::palette;
use crate::models::Color;
use crate::utils::format::to_arabic_numerals;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

const HIJRI_MONTH_NAMES_AR: &[&str] = &[
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

fn month_name(table: &[&'static str], month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        table[month - 1]
    } else {
        "Unknown"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HijriInfo {
    pub day: usize,
    pub month: usize,
    pub year: usize,
}

impl HijriInfo {
    pub fn month_name(&self) -> &'static str {
        month_name(HIJRI_MONTH_NAMES, self.month)
    }

    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name(), self.year)
    }

    /// "١٢ رمضان ١٤٤٧"
    pub fn arabic_label(&self) -> String {
        format!(
            "{} {} {}",
            to_arabic_numerals(&self.day.to_string()),
            month_name(HIJRI_MONTH_NAMES_AR, self.month),
            to_arabic_numerals(&self.year.to_string())
        )
    }

    pub fn is_ramadan(&self) -> bool {
        self.month == 9
    }
}

pub fn to_hijri(date: NaiveDate) -> Result<HijriInfo> {
    let hd = HijriDate::from_gr(
        date.year() as usize,
        date.month() as usize,
        date.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    Ok(HijriInfo {
        day: hd.day(),
        month: hd.month(),
        year: hd.year(),
    })
}

/// Hijri date for `date`, shifted by `offset_days` for local moon sighting
/// (e.g. -1 where the month starts a day after Saudi Arabia).
pub fn hijri_for(date: NaiveDate, offset_days: i32) -> Result<HijriInfo> {
    to_hijri(date + Duration::days(i64::from(offset_days)))
}

/// Third of the month the day falls in, with its title and accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthPhase {
    Mercy,
    Forgiveness,
    Freedom,
}

impl MonthPhase {
    pub fn for_day(day: u8) -> Self {
        match day {
            0..=10 => MonthPhase::Mercy,
            11..=20 => MonthPhase::Forgiveness,
            _ => MonthPhase::Freedom,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MonthPhase::Mercy => "Days of Mercy",
            MonthPhase::Forgiveness => "Days of Forgiveness",
            MonthPhase::Freedom => "Seeking Freedom",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            MonthPhase::Mercy => palette::MERCY_BLUE,
            MonthPhase::Forgiveness => palette::FORGIVENESS_GREEN,
            MonthPhase::Freedom => palette::FREEDOM_AMBER,
        }
    }
}
