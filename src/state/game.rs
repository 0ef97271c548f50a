use super::AppState;
use crate::error::GameError;
use crate::protocol::{Outcome, QuestionPayload, ServerMessage};
use crate::questions;
use crate::types::*;

impl AppState {
    fn require_admin(game: &Game, id: &str, action: &'static str) -> Result<(), GameError> {
        match game.player(id) {
            Some(player) if player.is_admin => Ok(()),
            Some(_) => Err(GameError::NotAdmin(action)),
            None => Err(GameError::NotJoined),
        }
    }

    /// Start a match from the lobby. Needs at least one player per team.
    pub async fn start_game(&self, id: &str) -> Result<(), GameError> {
        let mut game = self.game.write().await;
        Self::require_admin(&game, id, "start the game")?;

        if game.phase != GamePhase::Lobby {
            return Err(GameError::WrongPhase("start the game"));
        }
        if TeamId::ALL.iter().any(|team| game.team_size(*team) == 0) {
            return Err(GameError::TeamsIncomplete);
        }

        game.questions = questions::pick_questions(self.config.questions_per_game);
        game.question_index = None;
        game.history.clear();
        game.teams.a.score = 0;
        game.teams.b.score = 0;

        tracing::info!(
            "Game started with {} questions, {} players",
            game.questions.len(),
            game.players.len()
        );
        self.advance_question(&mut game).await;
        Ok(())
    }

    /// Move on from a revealed question
    pub async fn next_question(&self, id: &str) -> Result<(), GameError> {
        let mut game = self.game.write().await;
        Self::require_admin(&game, id, "advance")?;

        if game.phase != GamePhase::Reveal {
            return Err(GameError::WrongPhase("advance"));
        }

        self.advance_question(&mut game).await;
        Ok(())
    }

    /// Back to the lobby with a fresh question draw. Players stay, teams don't.
    pub async fn reset_game(&self, id: &str) -> Result<(), GameError> {
        let mut game = self.game.write().await;
        Self::require_admin(&game, id, "reset the game")?;

        self.cancel_timer().await;

        game.questions = questions::pick_questions(self.config.questions_per_game);
        game.phase = GamePhase::Lobby;
        game.question_index = None;
        game.answers.clear();
        game.team_answers.clear();
        game.history.clear();
        game.timer_value = 0;
        game.round_epoch += 1;
        game.teams.a.score = 0;
        game.teams.b.score = 0;
        for player in game.players.iter_mut() {
            player.team = None;
        }
        game.refresh_rosters();

        tracing::info!("Game reset");
        self.broadcast_to_all(ServerMessage::GameReset);
        self.broadcast_state(&game);
        Ok(())
    }

    /// Step to the next question, or finish the match after the last one
    async fn advance_question(&self, game: &mut Game) {
        let index = game.question_index.map_or(0, |i| i + 1);
        game.question_index = Some(index);
        game.round_epoch += 1;

        let Some(question) = game.questions.get(index).cloned() else {
            self.cancel_timer().await;
            game.phase = GamePhase::Finished;
            game.timer_value = 0;

            let scores = game.teams.scores();
            let winner = Outcome::from_scores(scores);
            tracing::info!("Game over: A={} B={} winner={:?}", scores.a, scores.b, winner);

            self.broadcast_state(game);
            self.broadcast_to_all(ServerMessage::GameOver { scores, winner });
            return;
        };

        game.phase = GamePhase::Question;
        game.answers.clear();
        game.team_answers.clear();
        game.timer_value = self.config.question_seconds;

        tracing::info!(
            "Question {}/{} ({})",
            index + 1,
            game.questions.len(),
            question.category
        );
        self.broadcast_state(game);
        self.broadcast_to_all(ServerMessage::NewQuestion {
            question: QuestionPayload::new(&question, index, game.questions.len()),
        });

        self.start_countdown(game.round_epoch).await;
    }
}
