use std::path::PathBuf;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use tracing::info;

use rust_solar::config::Config;
use rust_solar::error::ConfigError;
use rust_solar::gui::Explorer;
use rust_solar::logging::init_logging;

/// Interactive 3D model of the solar system.
#[derive(Debug, Parser)]
struct Args {
    /// RON config file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the asset directory from the config
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Seed for the meteor field and starfield
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(root) = args.assets {
        config.assets.root = root;
    }

    init_logging(&config.log_level);

    let seed = args
        .seed
        .or(config.scene.seed)
        .unwrap_or_else(rand::random::<u64>);
    info!("Using seed {}", seed);

    let mut window = Window::new_with_size(
        &config.window.title,
        config.window.width,
        config.window.height,
    );
    window.set_light(Light::StickToCamera);
    window.set_background_color(0.0, 0.0, 0.0);
    if config.window.framerate_limit > 0 {
        window.set_framerate_limit(Some(config.window.framerate_limit));
    }

    let explorer = Explorer::new(&mut window, &config, seed);
    window.render_loop(explorer);
    Ok(())
}
