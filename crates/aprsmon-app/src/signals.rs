//! Termination signals mapped onto `Message::Quit`
//!
//! The monitor leaves through the normal update path on every signal, so the
//! terminal is restored and the push channel is closed cleanly.

use tokio::sync::mpsc;

use aprsmon_core::prelude::*;

use crate::message::Message;

/// Signals that stop the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
    /// Controlling terminal closed
    Hangup,
    CtrlC,
}

impl ShutdownSignal {
    pub fn name(self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Hangup => "SIGHUP",
            ShutdownSignal::CtrlC => "Ctrl+C",
        }
    }
}

/// Spawn a task that turns the first termination signal into `Message::Quit`.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(signal) => {
                info!("{} received, stopping the monitor", signal.name());
                if tx.send(Message::Quit).await.is_err() {
                    debug!("Message channel closed before {} was delivered", signal.name());
                }
            }
            Err(e) => error!("Signal handler unavailable: {}", e),
        }
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<ShutdownSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("cannot listen for {name}: {e}")))
    };
    let mut sigint = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut sigterm = listen(SignalKind::terminate(), "SIGTERM")?;
    let mut sighup = listen(SignalKind::hangup(), "SIGHUP")?;

    Ok(tokio::select! {
        _ = sigint.recv() => ShutdownSignal::Interrupt,
        _ = sigterm.recv() => ShutdownSignal::Terminate,
        _ = sighup.recv() => ShutdownSignal::Hangup,
    })
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<ShutdownSignal> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("cannot listen for Ctrl+C: {e}")))?;
    Ok(ShutdownSignal::CtrlC)
}
