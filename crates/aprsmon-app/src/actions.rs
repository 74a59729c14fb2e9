//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every config-API call runs on its own tokio task and reports back through
//! the message channel, so the update loop never waits on the network.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use aprsmon_channel::ConfigApi;

use crate::message::Message;
use crate::UpdateAction;

/// Execute an action by spawning a background task
pub fn handle_action<A>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, api: A)
where
    A: ConfigApi + Send + Sync + 'static,
{
    match action {
        UpdateAction::FetchConfig => {
            tokio::spawn(async move {
                let msg = match api.fetch_config().await {
                    Ok(record) => Message::ConfigLoaded(record),
                    Err(e) => Message::ConfigLoadFailed {
                        error: e.to_string(),
                    },
                };
                report(&msg_tx, msg).await;
            });
        }

        UpdateAction::SubmitConfig(record) => {
            tokio::spawn(async move {
                let msg = match api.submit_config(&record).await {
                    Ok(outcome) => Message::ConfigSubmitted(outcome),
                    Err(e) => Message::ConfigSubmitFailed {
                        error: e.to_string(),
                    },
                };
                report(&msg_tx, msg).await;
            });
        }

        UpdateAction::RestartReception => {
            tokio::spawn(async move {
                let msg = match api.restart_reception().await {
                    Ok(outcome) => Message::RestartCompleted(outcome),
                    Err(e) => Message::RestartFailed {
                        error: e.to_string(),
                    },
                };
                report(&msg_tx, msg).await;
            });
        }
    }
}

async fn report(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    debug!("Config exchange finished: {:?}", msg);
    if msg_tx.send(msg).await.is_err() {
        warn!("Message channel closed before config exchange result was delivered");
    }
}
