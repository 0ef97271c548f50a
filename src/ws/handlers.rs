//! WebSocket message dispatch
//!
//! Runs one client action against the session and returns the reply, if any,
//! addressed to the requesting connection only. Everything other clients need
//! to see goes out through the broadcast channel from inside the state layer.

use crate::error::GameError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

/// Turn a rejection into an error reply for the requester
fn reply(result: Result<(), GameError>, connection_id: &str) -> Option<ServerMessage> {
    match result {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!("Rejected action from {}: {}", connection_id, e);
            Some(e.into())
        }
    }
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    connection_id: &str,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::Join { name } => match state.join(connection_id, &name).await {
            Ok(Some(player)) => Some(ServerMessage::Joined {
                id: player.id,
                is_admin: player.is_admin,
                name: player.name,
            }),
            Ok(None) => None,
            Err(e) => reply(Err(e), connection_id),
        },

        ClientMessage::ChooseTeam { team } => {
            reply(state.choose_team(connection_id, team).await, connection_id)
        }

        ClientMessage::StartGame => reply(state.start_game(connection_id).await, connection_id),

        ClientMessage::SubmitAnswer { answer_index } => reply(
            state.submit_answer(connection_id, answer_index).await,
            connection_id,
        ),

        ClientMessage::NextQuestion => {
            reply(state.next_question(connection_id).await, connection_id)
        }

        ClientMessage::ResetGame => reply(state.reset_game(connection_id).await, connection_id),

        ClientMessage::ChatMessage { text } => {
            reply(state.chat(connection_id, &text).await, connection_id)
        }

        ClientMessage::RequestState => Some(ServerMessage::StateUpdate {
            state: state.public_state().await,
        }),
    }
}
