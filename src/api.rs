//! HTTP API endpoints
//!
//! Read-only views for tooling and debugging; all game actions go over the
//! WebSocket.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::protocol::{PublicState, PROTOCOL_VERSION};
use crate::state::AppState;
use crate::types::GamePhase;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub protocol: &'static str,
    pub phase: GamePhase,
    pub players: usize,
}

/// GET /api/state
///
/// Same redacted snapshot the WebSocket clients receive.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<PublicState> {
    Json(state.public_state().await)
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let game = state.game.read().await;
    Json(HealthResponse {
        status: "ok",
        protocol: PROTOCOL_VERSION,
        phase: game.phase,
        players: game.players.len(),
    })
}
