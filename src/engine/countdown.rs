use serde::Serialize;

use crate::engine::time_context::TimeContext;
use crate::models::MINUTES_PER_DAY;
use crate::utils::format::format_countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownKind {
    /// Before fajr: counting down to the end of suhoor.
    SuhoorEnd,
    /// Fasting hours: counting down to iftar.
    Iftar,
    /// After maghrib: counting down to tomorrow's suhoor end.
    NextSuhoor,
}

impl CountdownKind {
    pub fn label(&self) -> &'static str {
        match self {
            CountdownKind::SuhoorEnd => "SUHOOR ENDS IN",
            CountdownKind::Iftar => "UNTIL IFTAR",
            CountdownKind::NextSuhoor => "UNTIL SUHOOR",
        }
    }

    pub fn sub_label(&self) -> &'static str {
        match self {
            CountdownKind::SuhoorEnd => "eat before fajr",
            CountdownKind::Iftar => "hold strong",
            CountdownKind::NextSuhoor => "rest & recharge",
        }
    }

    pub fn color_token(&self) -> &'static str {
        match self {
            CountdownKind::SuhoorEnd | CountdownKind::NextSuhoor => "suhoor",
            CountdownKind::Iftar => "iftar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountdownTarget {
    pub kind: CountdownKind,
    pub label: &'static str,
    pub sub_label: &'static str,
    pub color_token: &'static str,
    /// Always in `[0, 1440)`.
    pub remaining_min: i32,
    /// Length of the window being counted down; never below 1.
    pub window_total_min: i32,
    /// `0` at window start, `1` at the target.
    pub progress: f64,
}

impl CountdownTarget {
    /// `HH:MM` remaining.
    pub fn display(&self) -> String {
        format_countdown(self.remaining_min)
    }
}

/// Minutes from `now` forward to `target` on a 24h clock.
pub fn minutes_until(now: i32, target: i32) -> i32 {
    (target - now).rem_euclid(MINUTES_PER_DAY)
}

/// Picks the active countdown and how far through its window we are.
///
/// A well-formed window never spans more than a day in any branch. An
/// inverted one can, so the total is capped to `[1, 1440]` minutes.
pub fn countdown(ctx: &TimeContext) -> CountdownTarget {
    let (now, fajr, maghrib) = (ctx.now_min, ctx.fajr_min, ctx.maghrib_min);

    let (kind, remaining, total) = if now < fajr {
        (CountdownKind::SuhoorEnd, minutes_until(now, fajr), fajr)
    } else if now < maghrib {
        (CountdownKind::Iftar, minutes_until(now, maghrib), maghrib - fajr)
    } else {
        (
            CountdownKind::NextSuhoor,
            minutes_until(now, fajr),
            MINUTES_PER_DAY - maghrib + fajr,
        )
    };

    let total = total.min(MINUTES_PER_DAY);
    let progress = if total <= 0 {
        1.0
    } else {
        (1.0 - f64::from(remaining) / f64::from(total)).clamp(0.0, 1.0)
    };

    log::debug!(
        "countdown {:?}: {} min remaining of {} (progress {:.3})",
        kind,
        remaining,
        total,
        progress
    );

    CountdownTarget {
        kind,
        label: kind.label(),
        sub_label: kind.sub_label(),
        color_token: kind.color_token(),
        remaining_min: remaining,
        window_total_min: total.max(1),
        progress,
    }
}

/// One of the two suhoor / iftar summary tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelState {
    pub active: bool,
    pub status: String,
}

/// Summary tiles shown under the countdown ring.
///
/// The suhoor tile is active overnight and only counts down before fajr;
/// the iftar tile is active while fasting and reads completed after maghrib.
pub fn panel_states(ctx: &TimeContext) -> (PanelState, PanelState) {
    let (now, fajr, maghrib) = (ctx.now_min, ctx.fajr_min, ctx.maghrib_min);

    let suhoor = PanelState {
        active: now < fajr || now >= maghrib,
        status: if now < fajr {
            format!("{} left", format_countdown(minutes_until(now, fajr)))
        } else {
            "tomorrow".to_string()
        },
    };

    let iftar_done = now >= maghrib;
    let iftar = PanelState {
        active: now >= fajr && now < maghrib,
        status: if iftar_done {
            "completed ✓".to_string()
        } else {
            format!("{} left", format_countdown(minutes_until(now, maghrib)))
        },
    };

    (suhoor, iftar)
}
