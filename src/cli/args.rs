use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hilal", version, author, about = "Ramadan countdown wallpapers for your lock screen")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a wallpaper image
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        /// Output format: svg or png
        #[arg(long)]
        format: Option<String>,
        /// Output file ("-" for stdout); defaults to wallpaper.<format>
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Extra directory to load fonts from (repeatable)
        #[arg(long = "font-dir")]
        font_dirs: Vec<PathBuf>,
    },
    /// Print the computed scene tree as JSON
    Scene {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Show today's suhoor/iftar times, phase and countdown
    Times {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Overrides for anything normally taken from the clock or config.
#[derive(Args, Debug, Clone, Default)]
pub struct SceneArgs {
    /// Pretend the current time is HH:MM
    #[arg(long)]
    pub at: Option<String>,
    /// Suhoor end (fajr) as HH:MM, skipping the calculation
    #[arg(long)]
    pub suhoor: Option<String>,
    /// Iftar (maghrib) as HH:MM, skipping the calculation
    #[arg(long)]
    pub iftar: Option<String>,
    /// Day of the month (1-30)
    #[arg(long, allow_hyphen_values = true)]
    pub day: Option<i64>,
    /// Location label printed on the wallpaper
    #[arg(long)]
    pub city: Option<String>,
    /// Phone model (iphone16pro, iphone15, s24ultra, pixel8, ...)
    #[arg(long)]
    pub model: Option<String>,
    /// Canvas width in pixels, overrides --model
    #[arg(long, requires = "height")]
    pub width: Option<i64>,
    /// Canvas height in pixels, overrides --model
    #[arg(long, requires = "width")]
    pub height: Option<i64>,
    /// Day dot layout: row, two_rows or arc
    #[arg(long)]
    pub layout: Option<String>,
}
