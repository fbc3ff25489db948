use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hilal::config::AppConfig;
use hilal::engine::{evaluate, DotLayout, SceneOptions};
use hilal::models::{ClockReading, MinuteOfDay, PrayerWindowInput, WallpaperInput};
use hilal::prayer_times::PrayerCalculator;
use hilal::render::{canvas_for, renderer_for, FontCache, OutputFormat};
use hilal::utils::format::{format_12h, format_duration_mins, progress_bar};
use hilal::utils::hijri::hijri_for;

use crate::cli::args::SceneArgs;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";
const BLUE: &str = "\x1b[38;2;168;196;255m";

// ─── Input assembly ──────────────────────────────────────────────────────────

/// Builds the engine input from config, overrides and the local clock.
pub fn assemble_input(
    config: &AppConfig,
    args: &SceneArgs,
    now: NaiveDateTime,
) -> Result<WallpaperInput> {
    let today = now.date();
    let clock = match &args.at {
        Some(at) => MinuteOfDay::from_str(at).with_context(|| format!("Parsing --at '{}'", at))?,
        None => MinuteOfDay::from_naive_time(now.time()),
    };

    let window = match (&args.suhoor, &args.iftar) {
        (Some(suhoor), Some(iftar)) => hilal::models::PrayerWindow::new(
            MinuteOfDay::from_str(suhoor).with_context(|| format!("Parsing --suhoor '{}'", suhoor))?,
            MinuteOfDay::from_str(iftar).with_context(|| format!("Parsing --iftar '{}'", iftar))?,
        ),
        (suhoor, iftar) => {
            let calc = PrayerCalculator::from_location(&config.location)?;
            let mut window = calc.window_for_date(today)?;
            if let Some(s) = suhoor {
                window.suhoor_end = MinuteOfDay::from_str(s)?;
            }
            if let Some(i) = iftar {
                window.iftar_start = MinuteOfDay::from_str(i)?;
            }
            window
        }
    };

    let hijri = match hijri_for(today, config.location.hijri_offset) {
        Ok(h) => Some(h),
        Err(e) => {
            log::warn!("no hijri date for {}: {}", today, e);
            None
        }
    };
    let current_day = match (args.day, &hijri) {
        (Some(day), _) => day,
        (None, Some(h)) if h.is_ramadan() => h.day as i64,
        (None, Some(h)) => {
            log::info!("{} is not in Ramadan, counting from day 1", h.formatted());
            1
        }
        (None, None) => 1,
    };

    let (width, height) = match (args.width, args.height) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            let model = args.model.as_deref().unwrap_or(&config.render.model);
            let (w, h) = canvas_for(model);
            (i64::from(w), i64::from(h))
        }
    };

    Ok(WallpaperInput {
        now: ClockReading::new(i64::from(clock.hour()), i64::from(clock.minute())),
        prayer_window: PrayerWindowInput::from_window(window),
        current_day,
        canvas_width: width,
        canvas_height: height,
        location_label: args
            .city
            .clone()
            .unwrap_or_else(|| config.location.name.clone()),
        date_label: Some(now.format("%a %-d %b").to_string().to_uppercase()),
        hijri_label: hijri.map(|h| h.arabic_label()),
    })
}

fn scene_options(config: &AppConfig, args: &SceneArgs) -> Result<SceneOptions> {
    let mut options = SceneOptions::from_config(config);
    if let Some(layout) = &args.layout {
        options.dot_layout = DotLayout::from_str(layout)?;
    }
    Ok(options)
}

// ─── Render ──────────────────────────────────────────────────────────────────

pub fn handle_render(
    config: &AppConfig,
    args: &SceneArgs,
    format: Option<&str>,
    out: Option<&Path>,
    font_dirs: &[PathBuf],
) -> Result<()> {
    let format = match format {
        Some(f) => OutputFormat::from_str(f)?,
        None => config.render.format,
    };
    let input = assemble_input(config, args, Local::now().naive_local())?;
    let scene = hilal::compose(&input, &scene_options(config, args)?)?;

    let fonts = FontCache::with_dirs(font_dirs.to_vec()).shared();
    let bytes = renderer_for(format, fonts).render(&scene)?;

    let default_out = PathBuf::from(format!("wallpaper.{}", format.as_str()));
    let out = out.unwrap_or(&default_out);
    if out == Path::new("-") {
        std::io::stdout().write_all(&bytes)?;
    } else {
        std::fs::write(out, &bytes).with_context(|| format!("Writing {:?}", out))?;
        eprintln!(
            "wrote {} ({}x{}, {} bytes)",
            out.display(),
            scene.width,
            scene.height,
            bytes.len()
        );
    }
    Ok(())
}

// ─── Scene ───────────────────────────────────────────────────────────────────

pub fn handle_scene(config: &AppConfig, args: &SceneArgs) -> Result<()> {
    let input = assemble_input(config, args, Local::now().naive_local())?;
    let scene = hilal::compose(&input, &scene_options(config, args)?)?;
    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(config: &AppConfig, args: &SceneArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let input = assemble_input(config, args, now)?;
    let state = evaluate(&input, &scene_options(config, args)?)?;
    let window = state.input.window;
    let hijri = hijri_for(now.date(), config.location.hijri_offset).ok();
    let cd = &state.countdown;

    println!();
    println_colored!(
        GOLD,
        "  {} · day {} ({})",
        state.input.location_label,
        state.input.current_day,
        state.input.now
    );
    if let Some(h) = &hijri {
        println_colored!(DIM, "  {}", h.formatted());
    }
    println!();
    println_colored!(
        BOLD,
        "  {:<10}  {}",
        "Suhoor",
        format_12h(window.suhoor_end.hour(), window.suhoor_end.minute())
    );
    println_colored!(
        BOLD,
        "  {:<10}  {}",
        "Iftar",
        format_12h(window.iftar_start.hour(), window.iftar_start.minute())
    );
    println_colored!(
        DIM,
        "  {:<10}  {}",
        "Fast",
        format_duration_mins(window.fasting_minutes())
    );
    println_colored!(DIM, "  {:<10}  {}", "Phase", state.context.phase);
    println!();

    let color = if cd.color_token == "iftar" { AMBER } else { BLUE };
    println_colored!(
        color,
        "  {} {}  {}",
        cd.label,
        format_duration_mins(cd.remaining_min),
        progress_bar(cd.progress, 20)
    );
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            config.save_to(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }
    println_colored!(DIM, "# {}", path.display());
    print!("{}", toml::to_string_pretty(config).context("Serializing config")?);
    Ok(())
}
