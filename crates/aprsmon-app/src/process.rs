//! Message processing: runs the TEA update loop and dispatches actions

use tokio::sync::mpsc;

use aprsmon_channel::ConfigApi;

use crate::handler;
use crate::message::Message;
use crate::state::DashboardState;

use super::actions::handle_action;

/// Process a message through the TEA update function
///
/// Follow-up messages are processed immediately; actions are spawned as
/// background tasks that report back through `msg_tx`.
pub fn process_message<A>(
    state: &mut DashboardState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    api: &A,
) where
    A: ConfigApi + Clone + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), api.clone());
        }

        msg = result.message;
    }
}
