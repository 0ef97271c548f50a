use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Opaque connection id, assigned on WebSocket upgrade
pub type PlayerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    /// Fixed iteration order used for scoring and reveal
    pub const ALL: [TeamId; 2] = [TeamId::A, TeamId::B];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Lobby,
    Question,
    Reveal,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub team_capacity: usize,
    pub max_players: usize,
    pub questions_per_game: usize,
    pub question_seconds: u32,
    pub points_per_correct: u32,
    pub reveal_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            team_capacity: 3,
            max_players: 6,
            questions_per_game: 15,
            question_seconds: 30,
            points_per_correct: 10,
            reveal_delay_ms: 500,
        }
    }
}

impl GameConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Option<TeamId>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub color: String,
    /// Derived from `Player::team`, rebuilt on every roster change
    pub players: Vec<PlayerId>,
    pub score: u32,
}

impl Team {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            players: Vec::new(),
            score: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teams {
    #[serde(rename = "A")]
    pub a: Team,
    #[serde(rename = "B")]
    pub b: Team,
}

impl Default for Teams {
    fn default() -> Self {
        Self {
            a: Team::new("Team Alpha", "#FF4D6D"),
            b: Team::new("Team Beta", "#4CC9F0"),
        }
    }
}

impl Teams {
    pub fn get(&self, id: TeamId) -> &Team {
        match id {
            TeamId::A => &self.a,
            TeamId::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, id: TeamId) -> &mut Team {
        match id {
            TeamId::A => &mut self.a,
            TeamId::B => &mut self.b,
        }
    }

    pub fn scores(&self) -> Scores {
        Scores {
            a: self.a.score,
            b: self.b.score,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scores {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
}

/// A multiple-choice question from the built-in bank
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub q: String,
    pub options: [String; 4],
    pub correct: usize,
    pub category: String,
}

impl Question {
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct]
    }
}

/// First answer submitted by any member of a team for the current question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamAnswer {
    pub answer: usize,
    pub locked_by: String,
    pub locked_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerSummary {
    pub answer: String,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub question: String,
    pub correct: String,
    pub team_a: Option<AnswerSummary>,
    pub team_b: Option<AnswerSummary>,
}

/// The one match held by the server
#[derive(Debug, Clone)]
pub struct Game {
    pub phase: GamePhase,
    pub teams: Teams,
    /// Ordered by join time; admin promotion picks the earliest remaining
    pub players: Vec<Player>,
    pub questions: Vec<Question>,
    pub question_index: Option<usize>,
    pub answers: BTreeMap<PlayerId, usize>,
    pub team_answers: BTreeMap<TeamId, TeamAnswer>,
    pub timer_value: u32,
    pub history: Vec<HistoryEntry>,
    /// Bumped whenever a question starts or the match leaves the question flow,
    /// so timer callbacks from an earlier question can tell they are stale.
    pub round_epoch: u64,
}

impl Game {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            phase: GamePhase::Lobby,
            teams: Teams::default(),
            players: Vec::new(),
            questions,
            question_index: None,
            answers: BTreeMap::new(),
            team_answers: BTreeMap::new(),
            timer_value: 0,
            history: Vec::new(),
            round_epoch: 0,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question_index.and_then(|i| self.questions.get(i))
    }

    pub fn team_size(&self, team: TeamId) -> usize {
        self.players.iter().filter(|p| p.team == Some(team)).count()
    }

    /// Rebuild both rosters from the players' team assignments
    pub fn refresh_rosters(&mut self) {
        for team in TeamId::ALL {
            let roster = self
                .players
                .iter()
                .filter(|p| p.team == Some(team))
                .map(|p| p.id.clone())
                .collect();
            self.teams.get_mut(team).players = roster;
        }
    }

    pub fn both_locked(&self) -> bool {
        TeamId::ALL
            .iter()
            .all(|team| self.team_answers.contains_key(team))
    }
}
