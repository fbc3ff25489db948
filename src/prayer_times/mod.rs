pub mod calculator;

pub use calculator::{FastingTimes, PrayerCalculator, CALC_METHODS};
