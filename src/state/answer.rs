use super::AppState;
use crate::error::GameError;
use crate::types::*;

impl AppState {
    /// Record a player's choice. The first submission per team locks that
    /// team's answer; once both teams are locked the reveal is scheduled.
    pub async fn submit_answer(&self, id: &str, answer_index: usize) -> Result<(), GameError> {
        let mut game = self.game.write().await;
        let player = game.player(id).ok_or(GameError::NotJoined)?;
        let team = player.team.ok_or(GameError::NoTeam)?;
        let name = player.name.clone();

        if game.phase != GamePhase::Question {
            return Err(GameError::WrongPhase("answer"));
        }
        let options = game.current_question().map_or(0, |q| q.options.len());
        if answer_index >= options {
            return Err(GameError::InvalidAnswer(answer_index));
        }

        game.answers.insert(id.to_string(), answer_index);

        if game.team_answers.contains_key(&team) {
            tracing::debug!("{} answered after {:?} already locked", name, team);
            return Ok(());
        }

        game.team_answers.insert(
            team,
            TeamAnswer {
                answer: answer_index,
                locked_by: name.clone(),
                locked_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        let team_name = game.teams.get(team).name.clone();
        tracing::info!("{} locked for {}", name, team_name);

        self.broadcast_state(&game);
        self.broadcast_notice(format!("{} locked in their answer!", team_name));

        if game.both_locked() {
            tracing::debug!("Both teams locked, revealing shortly");
            self.schedule_reveal(game.round_epoch).await;
        }
        Ok(())
    }
}
