use super::AppState;
use crate::protocol::ServerMessage;
use crate::types::*;

impl AppState {
    /// Score the current question and show the answers.
    ///
    /// Only acts while a question is open, so a second trigger for the same
    /// question (timer expiry racing a double lock) is a no-op. Returns
    /// whether the reveal happened.
    pub(super) fn reveal(&self, game: &mut Game) -> bool {
        if game.phase != GamePhase::Question {
            return false;
        }
        let Some(question) = game.current_question().cloned() else {
            return false;
        };

        game.phase = GamePhase::Reveal;

        let mut winner = None;
        for team in TeamId::ALL {
            let correct = game
                .team_answers
                .get(&team)
                .is_some_and(|lock| lock.answer == question.correct);
            if correct {
                game.teams.get_mut(team).score += self.config.points_per_correct;
                // Single slot: when both are right, B overwrites A
                winner = Some(team);
            }
        }

        let summary = |team: TeamId| {
            game.team_answers.get(&team).map(|lock| AnswerSummary {
                answer: question.options[lock.answer].clone(),
                correct: lock.answer == question.correct,
            })
        };
        let entry = HistoryEntry {
            question: question.q.clone(),
            correct: question.correct_text().to_string(),
            team_a: summary(TeamId::A),
            team_b: summary(TeamId::B),
        };
        game.history.push(entry);

        let scores = game.teams.scores();
        tracing::info!(
            "Revealed question {}: winner={:?}, A={} B={}",
            game.question_index.map_or(0, |i| i + 1),
            winner,
            scores.a,
            scores.b
        );

        self.broadcast_state(game);
        self.broadcast_to_all(ServerMessage::RevealResult {
            correct_index: question.correct,
            correct_answer: question.correct_text().to_string(),
            team_answers: game.team_answers.clone(),
            winner,
            scores,
        });
        true
    }
}
