use hilal::engine::SceneOptions;
use hilal::models::{ClockReading, PrayerWindowInput, WallpaperInput};
use hilal::render::{renderer_for, FontCache, OutputFormat, PngRenderer, SvgRenderer};
use hilal::{compose, SceneRenderer};

fn scene(hour: i64, width: i64, height: i64) -> hilal::SceneDescription {
    let input = WallpaperInput {
        now: ClockReading::new(hour, 15),
        prayer_window: PrayerWindowInput {
            suhoor_end_hour: 5,
            suhoor_end_minute: 2,
            iftar_start_hour: 18,
            iftar_start_minute: 31,
        },
        current_day: 9,
        canvas_width: width,
        canvas_height: height,
        location_label: "Cairo & Giza".to_string(),
        date_label: Some("TUE 11 MAR".to_string()),
        hijri_label: None,
    };
    compose(&input, &SceneOptions::default()).unwrap()
}

#[test]
fn svg_is_well_formed_and_escaped() {
    let bytes = SvgRenderer.render(&scene(22, 390, 844)).unwrap();
    let svg = String::from_utf8(bytes).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("CAIRO &amp; GIZA"));
    assert!(!svg.contains("Cairo & Giza"));
    assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
}

#[test]
fn png_matches_canvas_size() {
    let fonts = FontCache::isolated(Vec::new()).shared();
    let renderer = renderer_for(OutputFormat::Png, fonts);
    assert_eq!(renderer.format(), OutputFormat::Png);

    let bytes = renderer.render(&scene(13, 180, 390)).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (180, 390));
}

#[test]
fn one_font_cache_serves_many_renders() {
    let fonts = FontCache::isolated(Vec::new()).shared();
    let renderer = PngRenderer::new(fonts.clone());
    assert!(!fonts.is_loaded());
    renderer.render(&scene(2, 120, 260)).unwrap();
    assert!(fonts.is_loaded());
    let first = fonts.database();
    renderer.render(&scene(14, 120, 260)).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &fonts.database()));
}

#[test]
fn rendered_file_lands_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallpaper.svg");
    let bytes = renderer_for(OutputFormat::Svg, FontCache::new().shared())
        .render(&scene(4, 390, 844))
        .unwrap();
    std::fs::write(&path, &bytes).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}
