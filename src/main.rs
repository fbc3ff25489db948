mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands, SceneArgs};
use cli::handlers;
use hilal::config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Some(Commands::Render {
            scene,
            format,
            out,
            font_dirs,
        }) => {
            handlers::handle_render(&config, &scene, format.as_deref(), out.as_deref(), &font_dirs)?;
        }
        Some(Commands::Scene { scene }) => {
            handlers::handle_scene(&config, &scene)?;
        }
        Some(Commands::Times { scene }) => {
            handlers::handle_times(&config, &scene)?;
        }
        Some(Commands::Config { init }) => {
            handlers::handle_config(&config, init)?;
        }

        // No subcommand → render today's wallpaper with config defaults
        None => {
            handlers::handle_render(&config, &SceneArgs::default(), None, None, &[])?;
        }
    }

    Ok(())
}
