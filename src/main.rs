//! trellis - a drag-and-drop tree editor and kanban board in the terminal.
//!
//! This is the main binary that launches the TUI application.

mod logging;

use std::sync::Arc;

use trellis_config::Config;
use trellis_tui::provider::MockChildProvider;
use trellis_tui::{App, terminal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = Config::load()?;

    // Keep the guard alive until exit so buffered log lines are flushed.
    let _logging = logging::init(&config.logging);
    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "configuration loaded"),
        None => tracing::info!("no configuration file, using defaults"),
    }

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    let mut terminal = terminal::setup_terminal()?;

    let provider = Arc::new(MockChildProvider::new(&config.tree));
    let mut app = App::new(config, provider);

    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}
