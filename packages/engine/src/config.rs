//! Engine configuration.
//!
//! One `GameConfig` per engine instance (one instance per room). Values can
//! be overridden through `ENGINE_*` environment variables; anything missing
//! or unparsable falls back to the default.

use std::time::Duration;

/// Tunable parameters for a game room.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Target hand size outside of in-flight transitions.
    pub hand_size: usize,
    /// Minimum player count to start (the virtual player counts).
    pub min_players: usize,
    /// Default point limit; overridable per game with `limit <n>`.
    pub point_limit: u32,
    /// Default number of blank cards mixed into the pool at game start.
    pub blank_cards: usize,
    /// Warning fired while still waiting for players.
    pub waiting_soon: Duration,
    /// Hard deadline for the lobby; aborts if the creator is still alone.
    pub waiting_hard: Duration,
    /// Warning fired while submissions are still pending.
    pub play_soon: Duration,
    /// Hard deadline for submissions; the round resolves with whatever
    /// was played.
    pub play_hard: Duration,
    /// Warning fired while the czar is deciding.
    pub choose_soon: Duration,
    /// Hard deadline for the czar; the round restarts without a point.
    pub choose_hard: Duration,
    /// Seed for the game RNG. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 10,
            min_players: 3,
            point_limit: 5,
            blank_cards: 0,
            waiting_soon: Duration::from_secs(60),
            waiting_hard: Duration::from_secs(180),
            play_soon: Duration::from_secs(90),
            play_hard: Duration::from_secs(180),
            choose_soon: Duration::from_secs(60),
            choose_hard: Duration::from_secs(120),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Environment variables must be set by the runtime environment; durations
    /// are whole seconds.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            hand_size: env_parse("ENGINE_HAND_SIZE", d.hand_size),
            min_players: env_parse("ENGINE_MIN_PLAYERS", d.min_players),
            point_limit: env_parse("ENGINE_POINT_LIMIT", d.point_limit),
            blank_cards: env_parse("ENGINE_BLANK_CARDS", d.blank_cards),
            waiting_soon: env_secs("ENGINE_WAITING_SOON_SECS", d.waiting_soon),
            waiting_hard: env_secs("ENGINE_WAITING_HARD_SECS", d.waiting_hard),
            play_soon: env_secs("ENGINE_PLAY_SOON_SECS", d.play_soon),
            play_hard: env_secs("ENGINE_PLAY_HARD_SECS", d.play_hard),
            choose_soon: env_secs("ENGINE_CHOOSE_SOON_SECS", d.choose_soon),
            choose_hard: env_secs("ENGINE_CHOOSE_HARD_SECS", d.choose_hard),
            rng_seed: std::env::var("ENGINE_RNG_SEED")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
