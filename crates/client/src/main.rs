//! Terminal render host for the board engine.
//!
//! Loads an encounter and the viewport settings, then draws the board scene
//! into the terminal and drives it from the keyboard and mouse.
//!
//! ```bash
//! BOARD_DATA_DIR=data BOARD_ENCOUNTER=courtyard cargo run -p board-client
//! ```
mod app;
mod config;
mod input;
mod logging;
mod presentation;
mod state;

use anyhow::Result;
use board_content::{ConfigLoader, ContentFactory, PrimitiveCatalog};
use board_core::Viewport;

use crate::app::App;
use crate::config::ClientConfig;
use crate::presentation::terminal::BoardTerminal;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(config.session_id.as_deref())?;

    tracing::info!("Starting board client");
    tracing::info!("Data dir: {}", config.data_dir.display());
    tracing::info!("Encounter: {}", config.encounter);
    tracing::info!("Hover interval: {}ms", config.hover_interval_ms);

    let factory = ContentFactory::new(&config.data_dir);
    let viewport_config = match config.viewport_config.as_deref() {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_viewport_config()?,
    };
    let encounter = factory.load_encounter(&config.encounter)?;

    let mut viewport = Viewport::new(viewport_config);
    viewport.create_encounter(encounter, &PrimitiveCatalog::new())?;

    let mut session = BoardTerminal::enter()?;
    App::new(config, viewport).run(session.tui()).await?;
    session.leave()?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
