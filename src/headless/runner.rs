//! Headless mode runner - main event loop without TUI

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use aprsmon_app::config::Settings;
use aprsmon_app::{Engine, EngineEvent, Message};
use aprsmon_core::prelude::Result;

use super::HeadlessEvent;

/// Run in headless mode - output NDJSON events instead of the TUI
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("APRS monitor starting in HEADLESS mode");
    info!("Backend: {}", settings.backend.url);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(settings)?;
    let mut events = engine.subscribe();

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        stdin_reader_blocking(stdin_tx);
    });

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown().await;
    flush_events(&mut events);

    info!("APRS monitor headless mode exiting");
    result
}

/// Process messages until quit, emitting whatever changed after each one
async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(msg) => {
                engine.process_message(msg);
                flush_events(events);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

/// Emit every queued engine event as NDJSON
fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from_engine_event(&event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output fell behind, {} events dropped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Map one stdin line to a command
fn parse_command(line: &str) -> Option<Message> {
    match line.trim() {
        "q" | "quit" => Some(Message::Quit),
        "r" | "restart" => Some(Message::ConfirmRestart),
        "x" | "dismiss" => Some(Message::DismissErrorBanner),
        _ => None,
    }
}

/// Read commands from stdin (blocking, runs on its own thread)
fn stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(msg) => {
                        let quit = matches!(msg, Message::Quit);
                        info!("Stdin command: {}", line.trim());
                        if msg_tx.blocking_send(msg).is_err() || quit {
                            break;
                        }
                    }
                    None => warn!("Unknown stdin command: {}", line.trim()),
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
