use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    Join {
        name: String,
    },
    ChooseTeam {
        team: TeamId,
    },
    StartGame,
    SubmitAnswer {
        answer_index: usize,
    },
    NextQuestion,
    ResetGame,
    ChatMessage {
        text: String,
    },
    RequestState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once to a freshly connected client
    Welcome {
        protocol: String,
        connection_id: PlayerId,
        state: PublicState,
    },
    StateUpdate {
        state: PublicState,
    },
    Joined {
        id: PlayerId,
        is_admin: bool,
        name: String,
    },
    ChatMessage {
        entry: ChatEntry,
    },
    TimerTick {
        seconds_remaining: u32,
    },
    NewQuestion {
        question: QuestionPayload,
    },
    RevealResult {
        correct_index: usize,
        correct_answer: String,
        team_answers: BTreeMap<TeamId, TeamAnswer>,
        /// Last correct team in A, B order; both teams may have scored
        winner: Option<TeamId>,
        scores: Scores,
    },
    GameOver {
        scores: Scores,
        winner: Outcome,
    },
    GameReset,
    Error {
        code: String,
        msg: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    A,
    B,
    #[serde(rename = "draw")]
    Draw,
}

impl Outcome {
    pub fn from_scores(scores: Scores) -> Self {
        match scores.a.cmp(&scores.b) {
            std::cmp::Ordering::Greater => Outcome::A,
            std::cmp::Ordering::Less => Outcome::B,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Question as shown to clients (no correct index)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionPayload {
    pub q: String,
    pub options: [String; 4],
    pub category: String,
    pub index: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatEntry {
    #[serde(default)]
    pub system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_color: Option<String>,
    pub text: String,
}

impl ChatEntry {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            system: true,
            player: None,
            team: None,
            team_color: None,
            text: text.into(),
        }
    }
}

/// Team lock as exposed to clients. Until the reveal only the fact that a
/// team has locked is visible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PublicTeamAnswer {
    Revealed(TeamAnswer),
    Hidden { locked: bool },
}

/// Redacted snapshot of the match sent to every client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicState {
    pub phase: GamePhase,
    pub teams: Teams,
    pub players: Vec<Player>,
    pub current_question: Option<QuestionPayload>,
    pub team_answers: BTreeMap<TeamId, PublicTeamAnswer>,
    pub timer_value: u32,
    pub question_history: Vec<HistoryEntry>,
    pub total_questions: usize,
}

impl From<&Game> for PublicState {
    fn from(game: &Game) -> Self {
        let team_answers = game
            .team_answers
            .iter()
            .map(|(team, lock)| {
                let view = if game.phase == GamePhase::Reveal {
                    PublicTeamAnswer::Revealed(lock.clone())
                } else {
                    PublicTeamAnswer::Hidden { locked: true }
                };
                (*team, view)
            })
            .collect();

        let current_question = game.question_index.and_then(|index| {
            game.questions
                .get(index)
                .map(|q| QuestionPayload::new(q, index, game.questions.len()))
        });

        Self {
            phase: game.phase,
            teams: game.teams.clone(),
            players: game.players.clone(),
            current_question,
            team_answers,
            timer_value: game.timer_value,
            question_history: game.history.clone(),
            total_questions: game.questions.len(),
        }
    }
}

impl QuestionPayload {
    pub fn new(question: &Question, index: usize, total: usize) -> Self {
        Self {
            q: question.q.clone(),
            options: question.options.clone(),
            category: question.category.clone(),
            index,
            total,
        }
    }
}
