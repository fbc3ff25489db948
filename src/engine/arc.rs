use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::config::Thresholds;
use crate::models::scene::Point;

/// Countdown arc on a circle, starting at 12 o'clock and running clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSpec {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub start: Point,
    pub end: Point,
    pub large_arc: bool,
    pub sweep: bool,
}

impl ArcSpec {
    /// SVG path data (`M … A …`) for the arc.
    pub fn to_path_data(&self) -> String {
        format!(
            "M {:.3} {:.3} A {:.3} {:.3} 0 {} {} {:.3} {:.3}",
            self.start.x,
            self.start.y,
            self.r,
            self.r,
            u8::from(self.large_arc),
            u8::from(self.sweep),
            self.end.x,
            self.end.y
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ArcGeometry {
    /// Nothing to draw yet.
    Empty,
    Arc(ArcSpec),
}

impl ArcGeometry {
    pub fn spec(&self) -> Option<&ArcSpec> {
        match self {
            ArcGeometry::Empty => None,
            ArcGeometry::Arc(spec) => Some(spec),
        }
    }
}

pub fn polar_to_point(cx: f64, cy: f64, r: f64, angle: f64) -> Point {
    Point::new(cx + r * angle.cos(), cy + r * angle.sin())
}

/// Builds the arc for `progress` in `[0, 1]`.
///
/// Progress is clamped short of a full turn, since a closed circle has
/// coincident endpoints and no well-defined arc command.
pub fn build_arc(progress: f64, cx: f64, cy: f64, r: f64, thresholds: &Thresholds) -> ArcGeometry {
    // Total even for an inverted or NaN upper bound.
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.min(thresholds.arc_max_progress).max(0.0)
    };
    if p < thresholds.arc_min_progress {
        return ArcGeometry::Empty;
    }

    let start_angle = -FRAC_PI_2;
    let end_angle = start_angle + p * TAU;

    ArcGeometry::Arc(ArcSpec {
        cx,
        cy,
        r,
        start_angle,
        end_angle,
        start: polar_to_point(cx, cy, r, start_angle),
        end: polar_to_point(cx, cy, r, end_angle),
        large_arc: p > 0.5,
        sweep: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(progress: f64) -> ArcGeometry {
        build_arc(progress, 200.0, 200.0, 160.0, &Thresholds::default())
    }

    #[test]
    fn tiny_progress_is_empty() {
        assert_eq!(arc(0.0), ArcGeometry::Empty);
        assert_eq!(arc(0.0049), ArcGeometry::Empty);
        assert_eq!(arc(-3.0), ArcGeometry::Empty);
        assert_eq!(arc(f64::NAN), ArcGeometry::Empty);
        assert!(arc(0.005).spec().is_some());
    }

    #[test]
    fn unvalidated_thresholds_do_not_panic() {
        let inverted = Thresholds {
            arc_max_progress: -0.5,
            ..Thresholds::default()
        };
        assert_eq!(build_arc(0.3, 0.0, 0.0, 10.0, &inverted), ArcGeometry::Empty);

        let nan = Thresholds {
            arc_max_progress: f64::NAN,
            ..Thresholds::default()
        };
        assert!(build_arc(0.3, 0.0, 0.0, 10.0, &nan).spec().is_some());
    }

    #[test]
    fn large_arc_flag_flips_strictly_above_half() {
        assert!(!arc(0.5).spec().unwrap().large_arc);
        assert!(arc(0.5000001).spec().unwrap().large_arc);
        for i in 1..=1000 {
            let p = f64::from(i) / 1000.0;
            if let Some(spec) = arc(p).spec() {
                assert_eq!(spec.large_arc, p > 0.5, "at {p}");
                assert!(spec.sweep);
            }
        }
    }

    #[test]
    fn starts_at_twelve_o_clock() {
        let spec = *arc(0.25).spec().unwrap();
        assert!((spec.start.x - 200.0).abs() < 1e-9);
        assert!((spec.start.y - 40.0).abs() < 1e-9);
        // quarter turn clockwise lands at 3 o'clock
        assert!((spec.end.x - 360.0).abs() < 1e-9);
        assert!((spec.end.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn full_progress_stops_short_of_closing() {
        let spec = *arc(1.0).spec().unwrap();
        assert!((spec.end_angle - spec.start_angle - 0.999 * TAU).abs() < 1e-9);
        assert!(spec.end.x < spec.start.x);
        assert!(spec.large_arc);
    }

    #[test]
    fn path_data_matches_endpoints() {
        let spec = *arc(0.5).spec().unwrap();
        assert_eq!(
            spec.to_path_data(),
            "M 200.000 40.000 A 160.000 160.000 0 0 1 200.000 360.000"
        );
    }
}
