//! The per-room session aggregate.

use std::collections::HashMap;

use crate::config::GameConfig;
use crate::domain::cards::{BlackId, WhiteId};
use crate::domain::score::Scoreboard;

/// Name of the optional virtual opponent. Counted as a player, auto-submits
/// its plays, never judges.
pub const VIRTUAL_PLAYER: &str = "Rando";

/// Everything one game accumulates between create and reset.
#[derive(Debug, Default)]
pub struct GameSession {
    /// Seating order; czar rotation walks this list.
    pub players: Vec<String>,
    pub creator: String,
    pub hands: HashMap<String, Vec<WhiteId>>,
    pub scores: Scoreboard,
    /// Round counter, starting at 0.
    pub round: u32,
    /// The active call card while a round is running.
    pub black: Option<BlackId>,
    pub czar_index: usize,
    /// This round's submissions.
    pub played: HashMap<String, Vec<WhiteId>>,
    /// Joined mid-round; merged in at the next round start.
    pub pending: Vec<String>,
    pub point_limit: u32,
    pub blank_cards: usize,
    pub virtual_player: bool,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            point_limit: config.point_limit,
            blank_cards: config.blank_cards,
            ..Self::default()
        }
    }

    pub fn czar(&self) -> Option<&str> {
        self.players.get(self.czar_index).map(String::as_str)
    }

    pub fn is_player(&self, nick: &str) -> bool {
        self.players.iter().any(|p| p == nick)
    }

    pub fn is_pending(&self, nick: &str) -> bool {
        self.pending.iter().any(|p| p == nick)
    }

    pub fn is_czar(&self, nick: &str) -> bool {
        self.czar() == Some(nick)
    }

    /// Rotate the czar to the next human player.
    pub fn advance_czar(&mut self) {
        if self.players.is_empty() {
            self.czar_index = 0;
            return;
        }
        for _ in 0..self.players.len() {
            self.czar_index = (self.czar_index + 1) % self.players.len();
            if self.players[self.czar_index] != VIRTUAL_PLAYER {
                return;
            }
        }
    }

    /// Drop a player from the seating order, keeping the czar pointer on the
    /// same player — or, if the czar left, on the next seat.
    pub fn remove_player(&mut self, nick: &str) -> bool {
        let Some(idx) = self.players.iter().position(|p| p == nick) else {
            return false;
        };
        self.players.remove(idx);
        if idx < self.czar_index {
            self.czar_index -= 1;
        }
        if !self.players.is_empty() {
            self.czar_index %= self.players.len();
        } else {
            self.czar_index = 0;
        }
        // A removed seat may leave the pointer on the virtual player.
        if self.czar() == Some(VIRTUAL_PLAYER) {
            self.advance_czar();
        }
        true
    }

    /// Players expected to submit this round but who have not yet.
    pub fn waiting_on(&self) -> Vec<&str> {
        self.players
            .iter()
            .enumerate()
            .filter(|&(i, p)| i != self.czar_index && !self.played.contains_key(p.as_str()))
            .map(|(_, p)| p.as_str())
            .collect()
    }

    /// Everyone but the czar has submitted.
    pub fn all_played(&self) -> bool {
        !self.players.is_empty() && self.played.len() == self.players.len() - 1
    }
}
