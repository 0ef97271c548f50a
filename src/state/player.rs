use super::AppState;
use crate::error::GameError;
use crate::protocol::{ChatEntry, ServerMessage};
use crate::types::*;

const MAX_NAME_CHARS: usize = 20;
const MAX_CHAT_CHARS: usize = 200;
const UNTEAMED_COLOR: &str = "#999";

impl AppState {
    /// Add a player for this connection. The first player in becomes admin.
    ///
    /// Returns `Ok(None)` for a blank name, which is silently ignored.
    pub async fn join(&self, id: &str, name: &str) -> Result<Option<Player>, GameError> {
        let name: String = name.trim().chars().take(MAX_NAME_CHARS).collect();
        if name.is_empty() {
            return Ok(None);
        }

        let mut game = self.game.write().await;

        if let Some(player) = game.player_mut(id) {
            tracing::info!("Player {} renamed to {}", player.name, name);
            player.name = name.clone();
            let player = player.clone();
            self.broadcast_state(&game);
            return Ok(Some(player));
        }

        if game.players.len() >= self.config.max_players {
            tracing::warn!("Rejecting join from {}: game is full", name);
            return Err(GameError::GameFull(self.config.max_players));
        }

        let player = Player {
            id: id.to_string(),
            name,
            team: None,
            is_admin: game.players.is_empty(),
        };
        game.players.push(player.clone());
        tracing::info!("{} joined (admin: {})", player.name, player.is_admin);

        self.broadcast_state(&game);
        self.broadcast_notice(format!("{} joined the game!", player.name));
        Ok(Some(player))
    }

    /// Move a player onto a team while in the lobby
    pub async fn choose_team(&self, id: &str, team: TeamId) -> Result<(), GameError> {
        let mut game = self.game.write().await;
        let current = game.player(id).ok_or(GameError::NotJoined)?.team;

        if game.phase != GamePhase::Lobby {
            return Err(GameError::WrongPhase("change teams"));
        }
        if current == Some(team) {
            return Ok(());
        }
        if game.team_size(team) >= self.config.team_capacity {
            return Err(GameError::TeamFull {
                name: game.teams.get(team).name.clone(),
                capacity: self.config.team_capacity,
            });
        }

        let name = match game.player_mut(id) {
            Some(player) => {
                player.team = Some(team);
                player.name.clone()
            }
            None => return Err(GameError::NotJoined),
        };
        game.refresh_rosters();

        let team_name = game.teams.get(team).name.clone();
        tracing::info!("{} joined {}", name, team_name);
        self.broadcast_state(&game);
        self.broadcast_notice(format!("{} joined {}", name, team_name));
        Ok(())
    }

    /// Relay a chat line from a joined player
    pub async fn chat(&self, id: &str, text: &str) -> Result<(), GameError> {
        let game = self.game.read().await;
        let player = game.player(id).ok_or(GameError::NotJoined)?;

        if text.trim().is_empty() {
            return Ok(());
        }

        let team_color = match player.team {
            Some(team) => game.teams.get(team).color.clone(),
            None => UNTEAMED_COLOR.to_string(),
        };

        self.broadcast_to_all(ServerMessage::ChatMessage {
            entry: ChatEntry {
                system: false,
                player: Some(player.name.clone()),
                team: player.team,
                team_color: Some(team_color),
                text: text.chars().take(MAX_CHAT_CHARS).collect(),
            },
        });
        Ok(())
    }

    /// Remove a departed connection. Hands admin to the earliest remaining
    /// player if needed.
    pub async fn disconnect(&self, id: &str) -> Option<Player> {
        let mut game = self.game.write().await;
        let pos = game.players.iter().position(|p| p.id == id)?;
        let player = game.players.remove(pos);
        game.answers.remove(id);
        game.refresh_rosters();

        if player.is_admin {
            if let Some(next) = game.players.first_mut() {
                next.is_admin = true;
                tracing::info!("Admin passed from {} to {}", player.name, next.name);
            }
        }

        tracing::info!("{} left the game", player.name);
        self.broadcast_notice(format!("{} left the game.", player.name));
        self.broadcast_state(&game);
        Some(player)
    }
}
