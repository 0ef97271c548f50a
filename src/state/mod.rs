mod answer;
mod game;
mod player;
mod reveal;
mod timer;

use crate::protocol::{ChatEntry, PublicState, ServerMessage};
use crate::questions;
use crate::types::*;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;

/// Shared application state
///
/// Holds the single match. Every action takes the game write lock for its
/// whole duration, so actions and timer callbacks never interleave.
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<RwLock<Game>>,
    pub config: Arc<GameConfig>,
    /// Broadcast channel for messages addressed to every connected client
    pub broadcast: broadcast::Sender<ServerMessage>,
    /// Countdown or pending reveal for the current question
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let (tx, _rx) = broadcast::channel(256);
        let game = Game::new(questions::pick_questions(config.questions_per_game));
        Self {
            game: Arc::new(RwLock::new(game)),
            config: Arc::new(config),
            broadcast: tx,
            timer: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a message to all connected clients
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // Ignore send errors (no receivers connected is fine)
        let _ = self.broadcast.send(msg);
    }

    fn broadcast_state(&self, game: &Game) {
        self.broadcast_to_all(ServerMessage::StateUpdate {
            state: PublicState::from(game),
        });
    }

    fn broadcast_notice(&self, text: String) {
        self.broadcast_to_all(ServerMessage::ChatMessage {
            entry: ChatEntry::system(text),
        });
    }

    /// Redacted snapshot for clients
    pub async fn public_state(&self) -> PublicState {
        PublicState::from(&*self.game.read().await)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::protocol::{Outcome, PublicTeamAnswer};
    use std::time::Duration;
    use tokio::sync::broadcast::Receiver;

    const ALICE: &str = "conn-alice";
    const BOB: &str = "conn-bob";

    fn drain(rx: &mut Receiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    fn count_reveals(messages: &[ServerMessage]) -> usize {
        messages
            .iter()
            .filter(|m| matches!(m, ServerMessage::RevealResult { .. }))
            .count()
    }

    /// Alice (admin) on A, Bob on B, still in the lobby
    async fn lobby_with_two_teams() -> AppState {
        let state = AppState::new();
        state.join(ALICE, "Alice").await.unwrap();
        state.join(BOB, "Bob").await.unwrap();
        state.choose_team(ALICE, TeamId::A).await.unwrap();
        state.choose_team(BOB, TeamId::B).await.unwrap();
        state
    }

    async fn correct_index(state: &AppState) -> usize {
        state.game.read().await.current_question().unwrap().correct
    }

    #[tokio::test]
    async fn test_join_first_player_is_admin() {
        let state = AppState::new();
        let alice = state.join(ALICE, "  Alice  ").await.unwrap().unwrap();
        let bob = state.join(BOB, "Bob").await.unwrap().unwrap();

        assert_eq!(alice.name, "Alice");
        assert!(alice.is_admin);
        assert!(!bob.is_admin);
        assert_eq!(alice.team, None);
    }

    #[tokio::test]
    async fn test_join_ignores_blank_name_and_truncates() {
        let state = AppState::new();
        assert_eq!(state.join(ALICE, "   ").await, Ok(None));
        assert!(state.game.read().await.players.is_empty());

        let player = state
            .join(ALICE, "A very long display name indeed")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(player.name.chars().count(), 20);
    }

    #[tokio::test]
    async fn test_join_rejects_when_full() {
        let state = AppState::new();
        for i in 0..6 {
            state.join(&format!("conn-{i}"), "Player").await.unwrap();
        }
        let result = state.join("conn-late", "Late").await;
        assert_eq!(result, Err(GameError::GameFull(6)));
        assert_eq!(state.game.read().await.players.len(), 6);
    }

    #[tokio::test]
    async fn test_rejoin_renames_and_keeps_admin() {
        let state = lobby_with_two_teams().await;
        let renamed = state.join(ALICE, "Alicia").await.unwrap().unwrap();
        assert_eq!(renamed.name, "Alicia");
        assert!(renamed.is_admin);
        assert_eq!(renamed.team, Some(TeamId::A));
    }

    #[tokio::test]
    async fn test_choose_team_capacity() {
        let state = AppState::new();
        for i in 0..4 {
            state.join(&format!("conn-{i}"), "Player").await.unwrap();
        }
        for i in 0..3 {
            state.choose_team(&format!("conn-{i}"), TeamId::A).await.unwrap();
        }

        let before = state.game.read().await.teams.a.players.clone();
        let result = state.choose_team("conn-3", TeamId::A).await;
        assert!(matches!(result, Err(GameError::TeamFull { capacity: 3, .. })));

        let game = state.game.read().await;
        assert_eq!(game.teams.a.players, before);
        assert_eq!(game.player("conn-3").unwrap().team, None);
    }

    #[tokio::test]
    async fn test_choose_team_moves_between_rosters() {
        let state = lobby_with_two_teams().await;
        state.choose_team(ALICE, TeamId::B).await.unwrap();

        let game = state.game.read().await;
        assert!(game.teams.a.players.is_empty());
        assert_eq!(game.teams.b.players, vec![ALICE.to_string(), BOB.to_string()]);
    }

    #[tokio::test]
    async fn test_choose_team_only_in_lobby() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        assert_eq!(
            state.choose_team(BOB, TeamId::A).await,
            Err(GameError::WrongPhase("change teams"))
        );
    }

    #[tokio::test]
    async fn test_start_requires_admin_and_both_teams() {
        let state = AppState::new();
        state.join(ALICE, "Alice").await.unwrap();
        state.join(BOB, "Bob").await.unwrap();
        state.choose_team(ALICE, TeamId::A).await.unwrap();

        assert_eq!(
            state.start_game(BOB).await,
            Err(GameError::NotAdmin("start the game"))
        );
        assert_eq!(state.start_game(ALICE).await, Err(GameError::TeamsIncomplete));
        assert_eq!(state.game.read().await.phase, GamePhase::Lobby);
    }

    #[tokio::test]
    async fn test_start_broadcasts_first_question() {
        let state = lobby_with_two_teams().await;
        let mut rx = state.broadcast.subscribe();
        state.start_game(ALICE).await.unwrap();

        let messages = drain(&mut rx);
        let question = messages
            .iter()
            .find_map(|m| match m {
                ServerMessage::NewQuestion { question } => Some(question.clone()),
                _ => None,
            })
            .expect("Expected NewQuestion");
        assert_eq!(question.index, 0);
        assert_eq!(question.total, 15);
        assert_eq!(question.options.len(), 4);

        let game = state.game.read().await;
        assert_eq!(game.phase, GamePhase::Question);
        assert_eq!(game.timer_value, 30);
    }

    #[tokio::test]
    async fn test_first_lock_wins() {
        let state = lobby_with_two_teams().await;
        state.join("conn-carol", "Carol").await.unwrap();
        state.choose_team("conn-carol", TeamId::A).await.unwrap();
        state.start_game(ALICE).await.unwrap();

        state.submit_answer(ALICE, 1).await.unwrap();
        state.submit_answer("conn-carol", 3).await.unwrap();

        let game = state.game.read().await;
        let lock = &game.team_answers[&TeamId::A];
        assert_eq!(lock.answer, 1);
        assert_eq!(lock.locked_by, "Alice");
        assert_eq!(game.answers["conn-carol"], 3);
    }

    #[tokio::test]
    async fn test_submit_requires_team_and_valid_index() {
        let state = lobby_with_two_teams().await;
        state.join("conn-dave", "Dave").await.unwrap();
        state.start_game(ALICE).await.unwrap();

        assert_eq!(state.submit_answer("conn-dave", 0).await, Err(GameError::NoTeam));
        assert_eq!(
            state.submit_answer(ALICE, 4).await,
            Err(GameError::InvalidAnswer(4))
        );
        assert!(state.game.read().await.team_answers.is_empty());
    }

    #[tokio::test]
    async fn test_locks_hidden_until_reveal() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        state.submit_answer(ALICE, 0).await.unwrap();

        let snapshot = state.public_state().await;
        assert_eq!(
            snapshot.team_answers[&TeamId::A],
            PublicTeamAnswer::Hidden { locked: true }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_lock_reveals_after_delay() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        let correct = correct_index(&state).await;
        let mut rx = state.broadcast.subscribe();

        state.submit_answer(ALICE, correct).await.unwrap();
        state.submit_answer(BOB, correct).await.unwrap();
        assert_eq!(state.game.read().await.phase, GamePhase::Question);

        tokio::time::sleep(Duration::from_millis(600)).await;

        let game = state.game.read().await;
        assert_eq!(game.phase, GamePhase::Reveal);
        assert_eq!(game.teams.scores(), Scores { a: 10, b: 10 });
        assert_eq!(game.history.len(), 1);
        drop(game);

        let messages = drain(&mut rx);
        assert_eq!(count_reveals(&messages), 1);
        let winner = messages.iter().find_map(|m| match m {
            ServerMessage::RevealResult { winner, .. } => Some(*winner),
            _ => None,
        });
        // Both correct: the single winner slot ends on B
        assert_eq!(winner, Some(Some(TeamId::B)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_expiry_reveals_once() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        let correct = correct_index(&state).await;
        let mut rx = state.broadcast.subscribe();

        state.submit_answer(ALICE, correct).await.unwrap();
        tokio::time::sleep(Duration::from_secs(31)).await;

        let game = state.game.read().await;
        assert_eq!(game.phase, GamePhase::Reveal);
        assert_eq!(game.timer_value, 0);
        assert_eq!(game.teams.scores(), Scores { a: 10, b: 0 });
        let entry = &game.history[0];
        assert!(entry.team_a.as_ref().unwrap().correct);
        assert!(entry.team_b.is_none());
        drop(game);

        let messages = drain(&mut rx);
        let ticks = messages
            .iter()
            .filter(|m| matches!(m, ServerMessage::TimerTick { .. }))
            .count();
        assert_eq!(ticks, 30);
        assert_eq!(count_reveals(&messages), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_lock_near_expiry_does_not_double_reveal() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        let mut rx = state.broadcast.subscribe();

        tokio::time::sleep(Duration::from_millis(29_900)).await;
        state.submit_answer(ALICE, 0).await.unwrap();
        state.submit_answer(BOB, 1).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(count_reveals(&drain(&mut rx)), 1);
        assert_eq!(state.game.read().await.history.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extra_submissions_after_double_lock_do_not_rereveal() {
        let state = lobby_with_two_teams().await;
        state.join("conn-carol", "Carol").await.unwrap();
        state.choose_team("conn-carol", TeamId::A).await.unwrap();
        state.start_game(ALICE).await.unwrap();
        let mut rx = state.broadcast.subscribe();

        state.submit_answer(ALICE, 0).await.unwrap();
        state.submit_answer(BOB, 0).await.unwrap();
        state.submit_answer("conn-carol", 2).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(count_reveals(&drain(&mut rx)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_question_admin_only_from_reveal() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        assert_eq!(
            state.next_question(ALICE).await,
            Err(GameError::WrongPhase("advance"))
        );

        state.submit_answer(ALICE, 0).await.unwrap();
        state.submit_answer(BOB, 0).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(
            state.next_question(BOB).await,
            Err(GameError::NotAdmin("advance"))
        );
        state.next_question(ALICE).await.unwrap();

        let game = state.game.read().await;
        assert_eq!(game.phase, GamePhase::Question);
        assert_eq!(game.question_index, Some(1));
        assert!(game.team_answers.is_empty());
        assert!(game.answers.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_returns_to_lobby() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        let correct = correct_index(&state).await;
        state.submit_answer(ALICE, correct).await.unwrap();
        state.submit_answer(BOB, correct).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        let old_questions = state.game.read().await.questions.clone();
        let mut rx = state.broadcast.subscribe();
        state.reset_game(ALICE).await.unwrap();

        let messages = drain(&mut rx);
        assert!(matches!(messages[0], ServerMessage::GameReset));
        assert!(matches!(messages[1], ServerMessage::StateUpdate { .. }));

        let game = state.game.read().await;
        assert_eq!(game.phase, GamePhase::Lobby);
        assert_eq!(game.teams.scores(), Scores { a: 0, b: 0 });
        assert!(game.teams.a.players.is_empty());
        assert!(game.teams.b.players.is_empty());
        assert!(game.history.is_empty());
        assert_eq!(game.question_index, None);
        assert_eq!(game.questions.len(), 15);
        assert_ne!(game.questions, old_questions);
        assert_eq!(game.players.len(), 2);
        assert!(game.players.iter().all(|p| p.team.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_running_timer() {
        let state = lobby_with_two_teams().await;
        state.start_game(ALICE).await.unwrap();
        state.reset_game(ALICE).await.unwrap();
        let mut rx = state.broadcast.subscribe();

        tokio::time::sleep(Duration::from_secs(40)).await;

        let messages = drain(&mut rx);
        assert!(messages.is_empty(), "stale timer fired: {:?}", messages);
        assert_eq!(state.game.read().await.phase, GamePhase::Lobby);
    }

    #[tokio::test]
    async fn test_reset_requires_admin() {
        let state = lobby_with_two_teams().await;
        assert_eq!(
            state.reset_game(BOB).await,
            Err(GameError::NotAdmin("reset the game"))
        );
    }

    #[tokio::test]
    async fn test_disconnect_promotes_next_player() {
        let state = lobby_with_two_teams().await;
        let mut rx = state.broadcast.subscribe();

        let left = state.disconnect(ALICE).await.unwrap();
        assert_eq!(left.name, "Alice");

        let game = state.game.read().await;
        assert!(game.player(ALICE).is_none());
        assert!(game.player(BOB).unwrap().is_admin);
        assert!(game.teams.a.players.is_empty());
        drop(game);

        let messages = drain(&mut rx);
        assert!(matches!(
            &messages[0],
            ServerMessage::ChatMessage { entry } if entry.text == "Alice left the game."
        ));

        state.disconnect(BOB).await.unwrap();
        assert!(state.game.read().await.players.is_empty());
        assert!(state.disconnect(BOB).await.is_none());
    }

    #[tokio::test]
    async fn test_chat_truncates_and_colors() {
        let state = lobby_with_two_teams().await;
        state.join("conn-eve", "Eve").await.unwrap();
        let mut rx = state.broadcast.subscribe();

        state.chat(ALICE, &"x".repeat(300)).await.unwrap();
        state.chat("conn-eve", "hi").await.unwrap();
        state.chat(BOB, "   ").await.unwrap();

        let entries: Vec<ChatEntry> = drain(&mut rx)
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::ChatMessage { entry } => Some(entry),
                _ => None,
            })
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text.len(), 200);
        assert_eq!(entries[0].team, Some(TeamId::A));
        assert_eq!(entries[0].team_color.as_deref(), Some("#FF4D6D"));
        assert_eq!(entries[1].team, None);
        assert_eq!(entries[1].team_color.as_deref(), Some("#999"));
    }

    #[tokio::test]
    async fn test_chat_requires_join() {
        let state = AppState::new();
        assert_eq!(state.chat("ghost", "boo").await, Err(GameError::NotJoined));
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_after_last_question() {
        let config = GameConfig {
            questions_per_game: 2,
            ..GameConfig::default()
        };
        let state = AppState::with_config(config);
        state.join(ALICE, "Alice").await.unwrap();
        state.join(BOB, "Bob").await.unwrap();
        state.choose_team(ALICE, TeamId::A).await.unwrap();
        state.choose_team(BOB, TeamId::B).await.unwrap();
        state.start_game(ALICE).await.unwrap();

        for _ in 0..2 {
            let correct = correct_index(&state).await;
            state.submit_answer(ALICE, correct).await.unwrap();
            state.submit_answer(BOB, (correct + 1) % 4).await.unwrap();
            tokio::time::sleep(Duration::from_secs(1)).await;
            state.next_question(ALICE).await.unwrap();
        }

        let game = state.game.read().await;
        assert_eq!(game.phase, GamePhase::Finished);
        assert_eq!(game.teams.scores(), Scores { a: 20, b: 0 });
        drop(game);

        assert_eq!(
            state.start_game(ALICE).await,
            Err(GameError::WrongPhase("start the game"))
        );
        assert_eq!(Outcome::from_scores(Scores { a: 20, b: 0 }), Outcome::A);
    }
}
