use crate::protocol::ServerMessage;

/// Soft rejection of a player action. Never fatal to the session; reported to
/// the requesting client only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Join the game first")]
    NotJoined,

    #[error("Only the admin can {0}")]
    NotAdmin(&'static str),

    #[error("Cannot {0} right now")]
    WrongPhase(&'static str),

    #[error("Team {name} is full (max {capacity})")]
    TeamFull { name: String, capacity: usize },

    #[error("Each team needs at least 1 player!")]
    TeamsIncomplete,

    #[error("The game is full (max {0} players)")]
    GameFull(usize),

    #[error("Pick a team first")]
    NoTeam,

    #[error("Answer {0} is not one of the options")]
    InvalidAnswer(usize),
}

impl GameError {
    /// Stable identifier for clients
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NotJoined => "NOT_JOINED",
            GameError::NotAdmin(_) => "NOT_ADMIN",
            GameError::WrongPhase(_) => "WRONG_PHASE",
            GameError::TeamFull { .. } => "TEAM_FULL",
            GameError::TeamsIncomplete => "TEAMS_INCOMPLETE",
            GameError::GameFull(_) => "GAME_FULL",
            GameError::NoTeam => "NO_TEAM",
            GameError::InvalidAnswer(_) => "INVALID_ANSWER",
        }
    }
}

impl From<GameError> for ServerMessage {
    fn from(e: GameError) -> Self {
        ServerMessage::Error {
            code: e.code().to_string(),
            msg: e.to_string(),
        }
    }
}
