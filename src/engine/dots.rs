use serde::{Deserialize, Serialize};

use crate::models::{DotStatus, TOTAL_DAYS};
use crate::models::input::clamp_day;

/// Places the `index0`-th of `total` markers inside a unit band.
///
/// Returned coordinates are fractions of the band's width and height;
/// geometry never influences a marker's status.
pub trait DotGeometry {
    fn place(&self, index0: u8, total: u8) -> (f64, f64);
}

/// Evenly spaced along one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleRow;

impl DotGeometry for SingleRow {
    fn place(&self, index0: u8, total: u8) -> (f64, f64) {
        (centered_slot(index0, total), 0.5)
    }
}

/// Two stacked rows; the first half on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoRows;

impl DotGeometry for TwoRows {
    fn place(&self, index0: u8, total: u8) -> (f64, f64) {
        let per_row = total.div_ceil(2).max(1);
        let row = index0 / per_row;
        let col = index0 % per_row;
        (centered_slot(col, per_row), if row == 0 { 0.25 } else { 0.75 })
    }
}

/// Markers on an arch: `y = y_top - depth * (1 - normX^2)`.
#[derive(Debug, Clone, Copy)]
pub struct Parabola {
    /// Height of the two ends.
    pub y_top: f64,
    /// How far the middle rises above the ends.
    pub depth: f64,
}

impl Default for Parabola {
    fn default() -> Self {
        Self {
            y_top: 0.85,
            depth: 0.7,
        }
    }
}

impl DotGeometry for Parabola {
    fn place(&self, index0: u8, total: u8) -> (f64, f64) {
        let half = (f64::from(total) - 1.0) / 2.0;
        let norm_x = if half > 0.0 {
            (f64::from(index0) - half) / half
        } else {
            0.0
        };
        let y = self.y_top - self.depth * (1.0 - norm_x * norm_x);
        ((norm_x + 1.0) / 2.0, y)
    }
}

fn centered_slot(i: u8, n: u8) -> f64 {
    (f64::from(i) + 0.5) / f64::from(n.max(1))
}

/// Config-selectable geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotLayout {
    Row,
    #[default]
    TwoRows,
    Arc,
}

impl DotGeometry for DotLayout {
    fn place(&self, index0: u8, total: u8) -> (f64, f64) {
        match self {
            DotLayout::Row => SingleRow.place(index0, total),
            DotLayout::TwoRows => TwoRows.place(index0, total),
            DotLayout::Arc => Parabola::default().place(index0, total),
        }
    }
}

impl std::str::FromStr for DotLayout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(DotLayout::Row),
            "two_rows" | "two-rows" => Ok(DotLayout::TwoRows),
            "arc" | "parabola" => Ok(DotLayout::Arc),
            _ => Err(anyhow::anyhow!("Unknown dot layout: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayDot {
    /// 1-based day of the month.
    pub index: u8,
    pub status: DotStatus,
    pub x_frac: f64,
    pub y_frac: f64,
}

pub fn dot_status(index: u8, current_day: u8) -> DotStatus {
    match index.cmp(&current_day) {
        std::cmp::Ordering::Less => DotStatus::Past,
        std::cmp::Ordering::Equal => DotStatus::Current,
        std::cmp::Ordering::Greater => DotStatus::Future,
    }
}

/// One dot per day of the month, in day order.
pub fn layout_dots(current_day: i64, geometry: &dyn DotGeometry) -> Vec<DayDot> {
    let current = clamp_day(current_day);
    (0..TOTAL_DAYS)
        .map(|i0| {
            let (x_frac, y_frac) = geometry.place(i0, TOTAL_DAYS);
            let index = i0 + 1;
            DayDot {
                index,
                status: dot_status(index, current),
                x_frac,
                y_frac,
            }
        })
        .collect()
}
