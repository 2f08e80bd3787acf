mod assets;
mod audio_player;
mod builtin_themes;
mod config;
mod decoder;
mod engine;
mod error;
mod library;
mod logging;
mod onboarding;
mod playlist;
mod sheet;
mod theme;
mod tui;
mod visualizer;
mod waveform;

use crate::assets::AssetLibrary;
use color_eyre::Result;
use std::path::PathBuf;

fn main() -> Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    log::info!("tunesheet {} starting, logging to {:?}", env!("CARGO_PKG_VERSION"), log_path);

    let mut config = config::load_config(&config::default_config_path());
    // an assets directory on the command line wins over the config file
    if let Some(dir) = std::env::args().nth(1) {
        config.assets_dir = PathBuf::from(dir);
    }
    let assets = AssetLibrary::new(&config.assets_dir);
    log::info!("assets directory: {:?}", assets.root());
    tui::run(&config, assets)
}
