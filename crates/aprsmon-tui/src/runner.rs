//! Main TUI runner - entry point and event loop

use aprsmon_app::config::Settings;
use aprsmon_app::Engine;
use aprsmon_core::prelude::Result;
use tracing::{debug, info};

use crate::{event, render, terminal};

/// Run the dashboard until the operator quits or a signal arrives
pub async fn run(settings: Settings) -> Result<()> {
    terminal::install_panic_hook();

    let mut engine = Engine::new(settings)?;
    info!("Dashboard connecting to {}", engine.state.backend_url);

    let mut term = ratatui::init();
    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;
    ratatui::restore();

    result
}

/// Drain queued messages, draw, then wait briefly for terminal input
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        engine.drain_pending_messages();
        if engine.should_quit() {
            break;
        }

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    debug!("Run loop exited");
    Ok(())
}
