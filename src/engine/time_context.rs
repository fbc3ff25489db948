use crate::config::Thresholds;
use crate::models::{DayPhase, MinuteOfDay, NightDepth, PrayerWindow};

/// The current moment expressed against today's prayer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeContext {
    pub now_min: i32,
    pub fajr_min: i32,
    pub maghrib_min: i32,
    pub phase: DayPhase,
    /// Looser night test used only for decorations (stars, moon).
    pub is_night_visual: bool,
    pub night_depth: Option<NightDepth>,
}

pub fn resolve_time_context(
    now: MinuteOfDay,
    window: PrayerWindow,
    thresholds: &Thresholds,
) -> TimeContext {
    let now_min = now.get();
    let fajr_min = window.suhoor_end.get();
    let maghrib_min = window.iftar_start.get();

    let (phase, night_depth) = classify(now_min, fajr_min, maghrib_min, thresholds);
    let margin = thresholds.night_visual_margin;
    let is_night_visual = now_min < fajr_min - margin || now_min > maghrib_min + margin;

    TimeContext {
        now_min,
        fajr_min,
        maghrib_min,
        phase,
        is_night_visual,
        night_depth,
    }
}

/// Checked top to bottom; the final arm catches everything left, so every
/// minute gets exactly one phase even for inverted windows.
fn classify(now: i32, fajr: i32, maghrib: i32, t: &Thresholds) -> (DayPhase, Option<NightDepth>) {
    if now < fajr - t.deep_night_margin || now > maghrib + t.deep_night_margin {
        (DayPhase::Night, Some(NightDepth::Deep))
    } else if now < fajr {
        (DayPhase::PreFajr, None)
    } else if now < fajr + t.dawn_span {
        (DayPhase::Dawn, None)
    } else if now < maghrib - t.sunset_lead {
        (DayPhase::Day, None)
    } else if now <= maghrib {
        (DayPhase::Sunset, None)
    } else {
        (DayPhase::Night, Some(NightDepth::AfterMaghrib))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(fajr: i32, maghrib: i32) -> PrayerWindow {
        PrayerWindow::new(MinuteOfDay::wrapping(fajr), MinuteOfDay::wrapping(maghrib))
    }

    fn phase_at(now: i32, w: PrayerWindow) -> DayPhase {
        resolve_time_context(MinuteOfDay::wrapping(now), w, &Thresholds::default()).phase
    }

    #[test]
    fn boundaries_around_a_typical_window() {
        // 04:28 / 18:10
        let w = window(268, 1090);
        assert_eq!(phase_at(187, w), DayPhase::Night);
        assert_eq!(phase_at(188, w), DayPhase::PreFajr);
        assert_eq!(phase_at(267, w), DayPhase::PreFajr);
        assert_eq!(phase_at(268, w), DayPhase::Dawn);
        assert_eq!(phase_at(307, w), DayPhase::Dawn);
        assert_eq!(phase_at(308, w), DayPhase::Day);
        assert_eq!(phase_at(1029, w), DayPhase::Day);
        assert_eq!(phase_at(1030, w), DayPhase::Sunset);
        assert_eq!(phase_at(1090, w), DayPhase::Sunset);
        assert_eq!(phase_at(1091, w), DayPhase::Night);
        assert_eq!(phase_at(1170, w), DayPhase::Night);
        assert_eq!(phase_at(1171, w), DayPhase::Night);
    }

    #[test]
    fn night_depth_separates_deep_night_from_after_maghrib() {
        let w = window(268, 1090);
        let t = Thresholds::default();
        let at = |m| resolve_time_context(MinuteOfDay::wrapping(m), w, &t).night_depth;
        assert_eq!(at(1140), Some(NightDepth::AfterMaghrib));
        assert_eq!(at(1171), Some(NightDepth::Deep));
        assert_eq!(at(60), Some(NightDepth::Deep));
        assert_eq!(at(600), None);
    }

    #[test]
    fn classification_is_total_for_every_minute() {
        for (fajr, maghrib) in [(268, 1090), (0, 1439), (300, 301), (1000, 200), (500, 500)] {
            let w = window(fajr, maghrib);
            for now in 0..1440 {
                let ctx = resolve_time_context(MinuteOfDay::wrapping(now), w, &Thresholds::default());
                assert_eq!(ctx.night_depth.is_some(), ctx.phase == DayPhase::Night);
            }
        }
    }

    #[test]
    fn decorative_night_can_disagree_with_phase() {
        let w = window(268, 1090);
        let t = Thresholds::default();
        // 40 minutes before fajr: structurally pre-fajr, visually still night.
        let ctx = resolve_time_context(MinuteOfDay::wrapping(228), w, &t);
        assert_eq!(ctx.phase, DayPhase::PreFajr);
        assert!(ctx.is_night_visual);
        // 20 minutes after maghrib: structurally night, stars not yet out.
        let ctx = resolve_time_context(MinuteOfDay::wrapping(1110), w, &t);
        assert_eq!(ctx.phase, DayPhase::Night);
        assert!(!ctx.is_night_visual);
    }

    #[test]
    fn thresholds_are_respected() {
        let w = window(268, 1090);
        let t = Thresholds {
            dawn_span: 10,
            ..Thresholds::default()
        };
        let ctx = resolve_time_context(MinuteOfDay::wrapping(280), w, &t);
        assert_eq!(ctx.phase, DayPhase::Day);
    }
}
