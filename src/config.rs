//! Environment-driven configuration
//!
//! Every value has a sensible default so the server runs without any
//! environment at all. Unparsable or zero values fall back to the default.

use crate::questions;
use crate::types::GameConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Read a positive number from the environment, falling back on anything else
fn env_positive<T>(key: &str, default: T) -> T
where
    T: FromStr + PartialEq + Default + Copy + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value != T::default() => value,
            _ => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

impl GameConfig {
    /// Load game tuning from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let questions_per_game =
            env_positive("TRIVIA_QUESTIONS_PER_GAME", defaults.questions_per_game)
                .min(questions::bank_size());

        Self {
            team_capacity: env_positive("TRIVIA_TEAM_CAPACITY", defaults.team_capacity),
            max_players: env_positive("TRIVIA_MAX_PLAYERS", defaults.max_players),
            questions_per_game,
            question_seconds: env_positive("TRIVIA_QUESTION_SECONDS", defaults.question_seconds),
            points_per_correct: env_positive(
                "TRIVIA_POINTS_PER_CORRECT",
                defaults.points_per_correct,
            ),
            reveal_delay_ms: env_positive("TRIVIA_REVEAL_DELAY_MS", defaults.reveal_delay_ms),
        }
    }
}

/// Process-level settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory served as the fallback for non-API routes
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3001)),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = match std::env::var("TRIVIA_BIND") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Invalid TRIVIA_BIND {:?}: {}", raw, e);
                defaults.bind
            }),
            Err(_) => defaults.bind,
        };

        let static_dir = std::env::var("TRIVIA_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Self { bind, static_dir }
    }
}
