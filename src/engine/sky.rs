use crate::engine::palette;
use crate::engine::time_context::TimeContext;
use crate::models::scene::VerticalGradient;
use crate::models::{DayPhase, NightDepth};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyAppearance {
    pub gradient: VerticalGradient,
    pub is_night_visual: bool,
}

impl SkyAppearance {
    pub fn show_stars(&self) -> bool {
        self.is_night_visual
    }

    pub fn show_moon(&self) -> bool {
        self.is_night_visual
    }
}

/// Stepped lookup; colours change only at phase boundaries.
pub fn sky_appearance(ctx: &TimeContext) -> SkyAppearance {
    let stops = match (ctx.phase, ctx.night_depth) {
        (DayPhase::PreFajr, _) => palette::SKY_PRE_FAJR,
        (DayPhase::Dawn, _) => palette::SKY_DAWN,
        (DayPhase::Day, _) => palette::SKY_DAY,
        (DayPhase::Sunset, _) => palette::SKY_SUNSET,
        (DayPhase::Night, Some(NightDepth::AfterMaghrib)) => palette::SKY_AFTER_MAGHRIB,
        (DayPhase::Night, _) => palette::SKY_DEEP_NIGHT,
    };

    SkyAppearance {
        gradient: VerticalGradient {
            top: stops[0],
            mid: stops[1],
            bottom: stops[2],
        },
        is_night_visual: ctx.is_night_visual,
    }
}
