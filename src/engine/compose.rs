use crate::config::{AppConfig, Thresholds};
use crate::engine::arc::{build_arc, ArcGeometry};
use crate::engine::countdown::{countdown, panel_states, CountdownTarget, PanelState};
use crate::engine::dots::{layout_dots, DayDot, DotLayout};
use crate::engine::palette;
use crate::engine::sky::{sky_appearance, SkyAppearance};
use crate::engine::stars::{generate_stars, Star, DEFAULT_COUNT, DEFAULT_SEED};
use crate::engine::text::TextStyle;
use crate::engine::time_context::{resolve_time_context, TimeContext};
use crate::error::EngineError;
use crate::models::scene::{ArcNode, CircleNode, GroupNode, Paint, RectNode, Stroke};
use crate::models::{Color, DotStatus, Node, SceneDescription, ValidatedInput, WallpaperInput};
use crate::utils::format::{clock_12h, format_12h};
use crate::utils::hijri::MonthPhase;

// Layout proportions. `_W` values are fractions of canvas width, `_H` of
// canvas height; everything else says what it is relative to.
const REFERENCE_WIDTH: f64 = 400.0;
// Width over height of the portrait canvas the proportions were tuned on.
const REFERENCE_ASPECT: f64 = 1179.0 / 2556.0;
const CLOCK_TOP_H: f64 = 0.05;
const CLOCK_SIZE_W: f64 = 0.19;
const DATE_SIZE_W: f64 = 0.035;
const HIJRI_SIZE_W: f64 = 0.038;
const CARD_GAP_H: f64 = 0.03;
const CARD_WIDTH_W: f64 = 0.92;
const CARD_PAD_TOP_H: f64 = 0.03;
const CARD_PAD_BOTTOM_H: f64 = 0.025;
const CONTENT_WIDTH_OF_CARD: f64 = 0.92;
const RING_BOX_OF_CARD: f64 = 0.72;
const RING_RADIUS_OF_BOX: f64 = 0.40;
const RING_STROKE_OF_BOX: f64 = 0.0125;
const RING_LABEL_SIZE_W: f64 = 0.028;
const RING_COUNT_SIZE_W: f64 = 0.13;
const RING_SUB_SIZE_W: f64 = 0.026;
const SECTION_GAP_H: f64 = 0.022;
const PANEL_GAP_OF_ROW: f64 = 0.02;
const PANEL_PAD_H: f64 = 0.016;
const PANEL_TITLE_SIZE_W: f64 = 0.032;
const PANEL_TIME_SIZE_W: f64 = 0.063;
const PANEL_STATUS_SIZE_W: f64 = 0.026;
const DOT_DIAMETER_W: f64 = 0.022;
const DOT_ARC_BAND_H: f64 = 0.06;
const PHASE_GAP_H: f64 = 0.016;
const PHASE_SIZE_W: f64 = 0.028;
const LOCATION_GAP_H: f64 = 0.01;
const LOCATION_SIZE_W: f64 = 0.024;
const MOON_RADIUS_W: f64 = 0.045;
const MOON_TOP_H: f64 = 0.07;
const MOON_RIGHT_W: f64 = 0.14;

/// Knobs for one composition that do not come from the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub thresholds: Thresholds,
    pub star_seed: u32,
    pub star_count: usize,
    pub dot_layout: DotLayout,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            star_seed: DEFAULT_SEED,
            star_count: DEFAULT_COUNT,
            dot_layout: DotLayout::default(),
        }
    }
}

impl SceneOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            star_seed: config.render.star_seed,
            star_count: config.render.star_count,
            dot_layout: config.render.dot_layout,
        }
    }
}

/// Every engine output for one moment, before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub input: ValidatedInput,
    pub context: TimeContext,
    pub sky: SkyAppearance,
    pub countdown: CountdownTarget,
    pub suhoor_panel: PanelState,
    pub iftar_panel: PanelState,
    pub dots: Vec<DayDot>,
    /// Empty when the sky is not dark enough for stars.
    pub stars: Vec<Star>,
}

pub fn evaluate(input: &WallpaperInput, options: &SceneOptions) -> Result<SceneState, EngineError> {
    let input = input.validate()?;
    let context = resolve_time_context(input.now, input.window, &options.thresholds);
    let sky = sky_appearance(&context);
    let countdown = countdown(&context);
    let (suhoor_panel, iftar_panel) = panel_states(&context);
    let dots = layout_dots(i64::from(input.current_day), &options.dot_layout);
    let stars = if sky.show_stars() {
        generate_stars(
            options.star_seed,
            options.star_count,
            options.thresholds.star_sky_fraction,
        )
    } else {
        Vec::new()
    };

    log::debug!(
        "{} at {}: phase {}, night visual {}",
        input.location_label,
        input.now,
        context.phase,
        context.is_night_visual
    );

    Ok(SceneState {
        input,
        context,
        sky,
        countdown,
        suhoor_panel,
        iftar_panel,
        dots,
        stars,
    })
}

/// Validates `input` and lays out the full wallpaper.
pub fn compose(input: &WallpaperInput, options: &SceneOptions) -> Result<SceneDescription, EngineError> {
    let state = evaluate(input, options)?;
    Ok(layout(&state, options))
}

pub fn layout(state: &SceneState, options: &SceneOptions) -> SceneDescription {
    let w = f64::from(state.input.width);
    let h = f64::from(state.input.height);
    let s = layout_width(w, h);
    let unit = s / REFERENCE_WIDTH;

    let mut nodes = Vec::new();
    if !state.stars.is_empty() {
        nodes.push(star_group(&state.stars, w, h, s));
    }
    if state.sky.show_moon() {
        nodes.push(moon_group(w, h, s, state.sky.gradient.top));
    }

    let (clock, clock_bottom) = clock_group(state, w, s, h, unit);
    nodes.push(clock);
    nodes.push(card_group(state, options, w, s, h, unit, clock_bottom + CARD_GAP_H * h));

    SceneDescription {
        width: state.input.width,
        height: state.input.height,
        background: state.sky.gradient,
        nodes,
    }
}

/// Width the layout is sized against: the canvas width, narrowed on canvases
/// wider than the reference portrait so the card still fits vertically.
fn layout_width(w: f64, h: f64) -> f64 {
    w.min(h * REFERENCE_ASPECT)
}

fn star_group(stars: &[Star], w: f64, h: f64, s: f64) -> Node {
    let children = stars
        .iter()
        .map(|star| {
            Node::Circle(CircleNode {
                cx: star.x_frac * w,
                cy: star.y_frac * h,
                r: star.size_frac * s / 2.0,
                paint: Paint::fill(palette::STARLIGHT.with_alpha(star.opacity as f32)),
            })
        })
        .collect();
    Node::group("stars", children)
}

/// Crescent: a lit disc with a sky-coloured disc biting into it.
fn moon_group(w: f64, h: f64, s: f64, sky: Color) -> Node {
    let r = MOON_RADIUS_W * s;
    let cx = w * (1.0 - MOON_RIGHT_W) - r;
    let cy = MOON_TOP_H * h + r;
    let circle = |cx, cy, r, color| {
        Node::Circle(CircleNode {
            cx,
            cy,
            r,
            paint: Paint::fill(color),
        })
    };
    Node::group(
        "moon",
        vec![
            circle(cx, cy, r * 1.6, palette::MOON.with_alpha(0.08)),
            circle(cx, cy, r, palette::MOON),
            circle(cx + r * 0.45, cy - r * 0.2, r * 0.85, sky),
        ],
    )
}

fn clock_group(state: &SceneState, w: f64, s: f64, h: f64, unit: f64) -> (Node, f64) {
    let cx = w / 2.0;
    let gap = 4.0 * unit;
    let mut top = CLOCK_TOP_H * h;
    let mut children = Vec::new();

    let now = state.input.now;
    let clock = TextStyle::new(CLOCK_SIZE_W * s, 300, palette::WHITE.with_alpha(0.92)).spaced(-unit);
    children.push(Node::Text(clock.centered(clock_12h(now.hour(), now.minute()), cx, top)));
    top += clock.line_height() + gap;

    if let Some(date) = &state.input.date_label {
        let style = TextStyle::new(DATE_SIZE_W * s, 300, palette::WHITE.with_alpha(0.45)).spaced(3.0 * unit);
        children.push(Node::Text(style.centered(date.as_str(), cx, top)));
        top += style.line_height() + gap;
    }
    if let Some(hijri) = &state.input.hijri_label {
        let style = TextStyle::new(HIJRI_SIZE_W * s, 400, palette::IFTAR_GOLD.with_alpha(0.85)).spaced(unit);
        children.push(Node::Text(style.centered(hijri.as_str(), cx, top + 2.0 * unit)));
        top += style.line_height() + gap;
    }

    (Node::group("clock", children), top)
}

fn card_group(
    state: &SceneState,
    options: &SceneOptions,
    w: f64,
    s: f64,
    h: f64,
    unit: f64,
    card_top: f64,
) -> Node {
    let card_w = CARD_WIDTH_W * s;
    let card_x = (w - card_w) / 2.0;
    let content_w = CONTENT_WIDTH_OF_CARD * card_w;
    let content_x = (w - content_w) / 2.0;
    let cx = w / 2.0;

    let mut children = Vec::new();
    let mut cursor = card_top + CARD_PAD_TOP_H * h;

    let ring_box = RING_BOX_OF_CARD * card_w;
    children.push(ring_group(state, options, s, unit, cx, cursor, ring_box));
    cursor += ring_box + SECTION_GAP_H * h;

    let (panels, panels_h) = panel_row(state, s, h, unit, content_x, content_w, cursor);
    children.push(panels);
    cursor += panels_h + SECTION_GAP_H * h;

    let (dots, dots_h) = dot_band(state, options, s, h, content_x, content_w, cursor);
    children.push(dots);
    cursor += dots_h + PHASE_GAP_H * h;

    let (phase, phase_h) = phase_label(state, s, unit, cx, cursor);
    children.push(phase);
    cursor += phase_h + LOCATION_GAP_H * h;

    let location = TextStyle::new(LOCATION_SIZE_W * s, 300, palette::WHITE.with_alpha(0.18)).spaced(2.0 * unit);
    children.push(Node::group(
        "location",
        vec![Node::Text(location.centered(
            state.input.location_label.to_uppercase(),
            cx,
            cursor,
        ))],
    ));
    cursor += location.line_height();

    let card_h = cursor + CARD_PAD_BOTTOM_H * h - card_top;
    children.insert(
        0,
        Node::Rect(RectNode {
            x: card_x,
            y: card_top,
            width: card_w,
            height: card_h,
            corner_radius: 20.0 * unit,
            paint: Paint::fill(palette::CARD_FILL).with_stroke(palette::CARD_BORDER, unit),
        }),
    );

    Node::group("card", children)
}

fn ring_group(
    state: &SceneState,
    options: &SceneOptions,
    s: f64,
    unit: f64,
    cx: f64,
    top: f64,
    side: f64,
) -> Node {
    let cy = top + side / 2.0;
    let r = RING_RADIUS_OF_BOX * side;
    let stroke_w = RING_STROKE_OF_BOX * side;
    let accent = palette::token(state.countdown.color_token).unwrap_or(palette::WHITE);

    let mut children = vec![Node::Circle(CircleNode {
        cx,
        cy,
        r,
        paint: Paint::stroke(palette::WHITE.with_alpha(0.07), stroke_w),
    })];

    if let ArcGeometry::Arc(arc) = build_arc(state.countdown.progress, cx, cy, r, &options.thresholds) {
        children.push(Node::Arc(ArcNode {
            arc,
            stroke: Stroke {
                color: accent,
                width: stroke_w,
                round_cap: true,
            },
            glow: Some(accent),
        }));
    }

    let label = TextStyle::new(RING_LABEL_SIZE_W * s, 300, palette::WHITE.with_alpha(0.4)).spaced(2.0 * unit);
    let count = TextStyle::new(RING_COUNT_SIZE_W * s, 300, palette::WHITE.with_alpha(0.95)).spaced(-unit);
    let sub = TextStyle::new(RING_SUB_SIZE_W * s, 300, palette::WHITE.with_alpha(0.3)).spaced(unit);
    let gap = 4.0 * unit;
    let stack_h = label.line_height() + count.line_height() + sub.line_height() + 2.0 * gap;

    let mut y = cy - stack_h / 2.0;
    children.push(Node::Text(label.centered(state.countdown.label, cx, y)));
    y += label.line_height() + gap;
    children.push(Node::Text(count.centered(state.countdown.display(), cx, y)));
    y += count.line_height() + gap;
    children.push(Node::Text(sub.centered(state.countdown.sub_label, cx, y)));

    Node::group("ring", children)
}

struct PanelLook {
    title: &'static str,
    time: String,
    accent: Color,
    fill: (Color, Color),
    border: (Color, Color),
}

fn panel_row(
    state: &SceneState,
    s: f64,
    h: f64,
    unit: f64,
    x: f64,
    row_w: f64,
    top: f64,
) -> (Node, f64) {
    let gap = PANEL_GAP_OF_ROW * row_w;
    let panel_w = (row_w - gap) / 2.0;
    let window = state.input.window;

    let suhoor = PanelLook {
        title: "SUHOOR",
        time: format_12h(window.suhoor_end.hour(), window.suhoor_end.minute()),
        accent: palette::SUHOOR_BLUE,
        fill: (Color::rgba(70, 100, 180, 0.18), Color::rgba(50, 70, 120, 0.08)),
        border: (Color::rgba(168, 196, 255, 0.45), Color::rgba(100, 130, 200, 0.12)),
    };
    let iftar = PanelLook {
        title: "IFTAR",
        time: format_12h(window.iftar_start.hour(), window.iftar_start.minute()),
        accent: palette::IFTAR_GOLD,
        fill: (Color::rgba(180, 120, 30, 0.18), Color::rgba(120, 80, 20, 0.08)),
        border: (Color::rgba(212, 168, 71, 0.55), Color::rgba(160, 120, 40, 0.12)),
    };

    let title = TextStyle::new(PANEL_TITLE_SIZE_W * s, 300, palette::WHITE.with_alpha(0.4)).spaced(2.0 * unit);
    let status = TextStyle::new(PANEL_STATUS_SIZE_W * s, 300, palette::WHITE.with_alpha(0.28)).spaced(0.5 * unit);
    let line_gap = 4.0 * unit;
    let pad = PANEL_PAD_H * h;

    let mut children = Vec::new();
    let mut panel_h = 0.0;
    for (i, (look, panel_state)) in [(suhoor, &state.suhoor_panel), (iftar, &state.iftar_panel)]
        .into_iter()
        .enumerate()
    {
        let time = TextStyle::new(PANEL_TIME_SIZE_W * s, 600, look.accent).spaced(-0.5 * unit);
        panel_h = 2.0 * pad + title.line_height() + time.line_height() + status.line_height() + 2.0 * line_gap;

        let px = x + i as f64 * (panel_w + gap);
        let pcx = px + panel_w / 2.0;
        let pick = |pair: (Color, Color)| if panel_state.active { pair.0 } else { pair.1 };

        let mut y = top + pad;
        let title_node = title.centered(look.title, pcx, y);
        y += title.line_height() + line_gap;
        let time_node = time.centered(look.time.as_str(), pcx, y);
        y += time.line_height() + line_gap;
        let status_node = status.centered(panel_state.status.as_str(), pcx, y);

        children.push(Node::Group(GroupNode {
            id: Some(look.title.to_lowercase()),
            opacity: 1.0,
            children: vec![
                Node::Rect(RectNode {
                    x: px,
                    y: top,
                    width: panel_w,
                    height: panel_h,
                    corner_radius: 12.0 * unit,
                    paint: Paint::fill(pick(look.fill)).with_stroke(pick(look.border), unit),
                }),
                Node::Text(title_node),
                Node::Text(time_node),
                Node::Text(status_node),
            ],
        }));
    }

    (Node::group("panels", children), panel_h)
}

fn dot_band(
    state: &SceneState,
    options: &SceneOptions,
    s: f64,
    h: f64,
    x: f64,
    band_w: f64,
    top: f64,
) -> (Node, f64) {
    let d = DOT_DIAMETER_W * s;
    let band_h = match options.dot_layout {
        DotLayout::Row => 1.6 * d,
        DotLayout::TwoRows => 3.2 * d,
        DotLayout::Arc => DOT_ARC_BAND_H * h,
    };
    let r = d / 2.0;

    let mut children = Vec::new();
    for dot in &state.dots {
        let cx = x + dot.x_frac * band_w;
        let cy = top + dot.y_frac * band_h;
        match dot.status {
            DotStatus::Current => {
                children.push(Node::Circle(CircleNode {
                    cx,
                    cy,
                    r: r * 1.8,
                    paint: Paint::fill(palette::DOT_CURRENT.with_alpha(0.25)),
                }));
                children.push(Node::Circle(CircleNode {
                    cx,
                    cy,
                    r,
                    paint: Paint::fill(palette::DOT_CURRENT),
                }));
            }
            DotStatus::Past | DotStatus::Future => {
                let fill = if dot.status == DotStatus::Past {
                    palette::DOT_PAST
                } else {
                    palette::DOT_FUTURE
                };
                children.push(Node::Circle(CircleNode {
                    cx,
                    cy,
                    r,
                    paint: Paint::fill(fill).with_stroke(palette::DOT_RING, s / REFERENCE_WIDTH),
                }));
            }
        }
    }

    (Node::group("dots", children), band_h)
}

fn phase_label(state: &SceneState, s: f64, unit: f64, cx: f64, top: f64) -> (Node, f64) {
    let day = state.input.current_day;
    let phase = MonthPhase::for_day(day);
    let style = TextStyle::new(PHASE_SIZE_W * s, 300, palette::WHITE.with_alpha(0.3)).spaced(unit);
    let text = style.centered(format!("Day {} · {}", day, phase.title()), cx, top);

    let rule_w = 20.0 * unit;
    let offset = text.metrics.advance / 2.0 + 8.0 * unit;
    let rule_y = text.y - text.metrics.ascent / 2.0;
    let rule = |x| {
        Node::Rect(RectNode {
            x,
            y: rule_y,
            width: rule_w,
            height: unit.max(1.0),
            corner_radius: 0.0,
            paint: Paint::fill(phase.color().with_alpha(0.3)),
        })
    };

    let children = vec![rule(cx - offset - rule_w), Node::Text(text), rule(cx + offset)];
    (Node::group("phase", children), style.line_height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClockReading, PrayerWindowInput};

    fn input(hour: i64, minute: i64, day: i64) -> WallpaperInput {
        WallpaperInput {
            now: ClockReading::new(hour, minute),
            prayer_window: PrayerWindowInput {
                suhoor_end_hour: 4,
                suhoor_end_minute: 28,
                iftar_start_hour: 18,
                iftar_start_minute: 10,
            },
            current_day: day,
            canvas_width: 1179,
            canvas_height: 2556,
            location_label: "Dubai".to_string(),
            date_label: Some("MON, 19 OCT".to_string()),
            hijri_label: Some("١٢ رمضان ١٤٤٧".to_string()),
        }
    }

    #[test]
    fn daytime_scene_has_no_stars_or_moon() {
        let scene = compose(&input(12, 0, 12), &SceneOptions::default()).unwrap();
        assert!(scene.group("stars").is_none());
        assert!(scene.group("moon").is_none());
        assert!(scene.group("ring").is_some());
        assert_eq!(scene.background.top, palette::SKY_DAY[0]);
    }

    #[test]
    fn night_scene_carries_the_configured_star_count() {
        let options = SceneOptions {
            star_count: 75,
            ..SceneOptions::default()
        };
        let scene = compose(&input(1, 0, 12), &options).unwrap();
        assert_eq!(scene.group("stars").map(|g| g.children.len()), Some(75));
        assert!(scene.group("moon").is_some());
    }

    #[test]
    fn texts_reflect_countdown_and_panels() {
        let scene = compose(&input(3, 0, 12), &SceneOptions::default()).unwrap();
        let texts = scene.texts();
        for expected in [
            "3:00",
            "SUHOOR ENDS IN",
            "01:28",
            "eat before fajr",
            "4:28 AM",
            "6:10 PM",
            "01:28 left",
            "Day 12 · Days of Forgiveness",
            "DUBAI",
            "MON, 19 OCT",
        ] {
            assert!(texts.contains(&expected), "missing {expected:?} in {texts:?}");
        }
    }

    #[test]
    fn dots_group_has_one_glow_extra_for_current_day() {
        let scene = compose(&input(12, 0, 30), &SceneOptions::default()).unwrap();
        assert_eq!(scene.group("dots").map(|g| g.children.len()), Some(31));
    }

    #[test]
    fn arc_is_absent_right_at_window_start() {
        let scene = compose(&input(4, 28, 1), &SceneOptions::default()).unwrap();
        let ring = scene.group("ring").unwrap();
        assert!(!ring.children.iter().any(|n| matches!(n, Node::Arc(_))));

        let scene = compose(&input(15, 0, 1), &SceneOptions::default()).unwrap();
        let ring = scene.group("ring").unwrap();
        assert!(ring.children.iter().any(|n| matches!(n, Node::Arc(_))));
    }

    #[test]
    fn geometry_scales_with_canvas() {
        let small = compose(&input(12, 0, 5), &SceneOptions::default()).unwrap();
        let mut big_input = input(12, 0, 5);
        big_input.canvas_width *= 2;
        big_input.canvas_height *= 2;
        let big = compose(&big_input, &SceneOptions::default()).unwrap();

        let card = |s: &SceneDescription| match &s.group("card").unwrap().children[0] {
            Node::Rect(r) => (r.x, r.y, r.width, r.height),
            other => panic!("expected card rect, got {other:?}"),
        };
        let (a, b) = (card(&small), card(&big));
        assert!((b.0 - 2.0 * a.0).abs() < 1e-6);
        assert!((b.1 - 2.0 * a.1).abs() < 1e-6);
        assert!((b.2 - 2.0 * a.2).abs() < 1e-6);
        assert!((b.3 - 2.0 * a.3).abs() < 1e-6);
    }

    #[test]
    fn everything_stays_on_canvas() {
        // portrait, taller portrait, landscape, square
        for (cw, ch) in [(1179, 2556), (1080, 2400), (2556, 1179), (1500, 1500)] {
            for layout in [DotLayout::Row, DotLayout::TwoRows, DotLayout::Arc] {
                let options = SceneOptions {
                    dot_layout: layout,
                    ..SceneOptions::default()
                };
                let mut canvas = input(2, 0, 15);
                canvas.canvas_width = cw;
                canvas.canvas_height = ch;
                let scene = compose(&canvas, &options).unwrap();
                let (w, h) = (f64::from(scene.width), f64::from(scene.height));
                for node in scene.flatten() {
                    match node {
                        Node::Rect(r) => assert!(
                            r.x >= 0.0 && r.y + r.height <= h && r.x + r.width <= w,
                            "{cw}x{ch} {layout:?}: rect {r:?}"
                        ),
                        Node::Circle(c) => assert!(
                            c.cx >= 0.0 && c.cx <= w && c.cy >= 0.0 && c.cy <= h,
                            "{cw}x{ch} {layout:?}: circle {c:?}"
                        ),
                        Node::Text(t) => assert!(t.y > 0.0 && t.y < h, "{cw}x{ch}: text {:?}", t.content),
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn wide_canvas_keeps_the_portrait_card_centred() {
        let mut wide = input(12, 0, 5);
        wide.canvas_width = 2556;
        wide.canvas_height = 1179;
        let scene = compose(&wide, &SceneOptions::default()).unwrap();
        let card = match &scene.group("card").unwrap().children[0] {
            Node::Rect(r) => r.clone(),
            other => panic!("expected card rect, got {other:?}"),
        };
        assert!(card.width < 0.92 * 2556.0 / 2.0);
        assert!((card.x + card.width / 2.0 - 2556.0 / 2.0).abs() < 1e-6);
        assert!(card.y + card.height <= 1179.0);
    }

    #[test]
    fn invalid_clock_produces_no_scene() {
        let err = compose(&input(25, 0, 1), &SceneOptions::default()).unwrap_err();
        assert_eq!(err, EngineError::invalid("hour", 25));
    }
}
