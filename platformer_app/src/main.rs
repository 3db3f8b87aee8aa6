//! Platformer demo
//!
//! Runs the test room headless with scripted input. Pass a `.toml` or `.ron`
//! config path as the first argument; defaults are used if it is missing.

mod app;
mod config;
mod input;
mod layout;
mod objects;
mod respawn;
mod session;

use platformer_engine::config::Config;
use platformer_engine::foundation::logging;
use platformer_engine::Engine;

use crate::app::PlatformerApp;
use crate::config::GameConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
    }));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "platformer.toml".to_string());
    let config = GameConfig::load_or_default(&config_path)?;
    logging::init_with_config(&config.engine.logging);

    log::info!("Starting platformer in {}", config.room);
    let engine_config = config.engine.clone();
    let mut app = PlatformerApp::new(config);
    Engine::run(engine_config, &mut app)?;

    log::info!("Platformer exited cleanly");
    Ok(())
}
