//! Deck: the set registry and the four live collections.
//!
//! Cards live in arenas owned by the deck; everything else moves ids around.
//! Per color, `pool` and `used` partition the cards of the active sets: a
//! draw moves pool → used, a return moves used → pool, so `|pool| + |used|`
//! is constant while the active sets are unchanged. A card referenced by a
//! hand is accounted in `used`, never in `pool`.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::domain::cards::{BlackCard, BlackId, CardSet, WhiteCard, WhiteId};
use crate::domain::cards_serde::CardSetFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardColor {
    Black,
    White,
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardColor::Black => write!(f, "black"),
            CardColor::White => write!(f, "white"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("the {0} pool is empty")]
    EmptyPool(CardColor),
    #[error("card instance is not in the {0} used pile")]
    NotFound(CardColor),
    #[error("unknown card set: {0}")]
    UnknownSet(String),
}

/// Registry of all known card sets plus the live pools.
#[derive(Debug, Default)]
pub struct Deck {
    blacks: Vec<BlackCard>,
    whites: Vec<WhiteCard>,
    /// Sets by display name; BTreeMap keeps listings lexicographic.
    sets: BTreeMap<String, CardSet>,
    /// Display names of the currently active sets, in activation order.
    active: Vec<String>,
    black_pool: Vec<BlackId>,
    black_used: Vec<BlackId>,
    white_pool: Vec<WhiteId>,
    white_used: Vec<WhiteId>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a persisted set into the registry. Does not activate it;
    /// activation happens through [`Deck::add_set`] or on reset for
    /// default sets. A set with the same display name is replaced in the
    /// registry (its previous cards stay in the arena but are no longer
    /// reachable through any set).
    pub fn register(&mut self, file: CardSetFile) -> String {
        let black = file
            .black
            .into_iter()
            .map(|c| self.intern_black(BlackCard::new(c.text, c.gaps)))
            .collect();
        let white = file
            .white
            .into_iter()
            .map(|text| self.intern_white(WhiteCard::new(text)))
            .collect();

        let set = CardSet {
            name: file.name,
            default_active: file.default_active,
            black,
            white,
        };
        let set_display = set.display();
        // Replacing an active set must pull its old instances out of the
        // live collections first, or they would be stranded there.
        if self.sets.contains_key(&set_display) {
            let _ = self.remove_set(&set_display);
        }
        debug!(set = %set_display, "registered card set");
        self.sets.insert(set_display.clone(), set);
        set_display
    }

    /// Clear the pools, the used piles and the active list, then activate
    /// every default set again.
    pub fn reset(&mut self) {
        self.black_pool.clear();
        self.black_used.clear();
        self.white_pool.clear();
        self.white_used.clear();
        self.active.clear();

        let defaults: Vec<String> = self
            .sets
            .values()
            .filter(|s| s.default_active)
            .map(CardSet::display)
            .collect();
        for name in defaults {
            // The name came out of the registry a moment ago.
            let _ = self.add_set(&name);
        }
    }

    /// Draw one black card uniformly at random; pool → used.
    pub fn draw_black(&mut self, rng: &mut impl Rng) -> Result<BlackId, DeckError> {
        if self.black_pool.is_empty() {
            return Err(DeckError::EmptyPool(CardColor::Black));
        }
        let idx = rng.gen_range(0..self.black_pool.len());
        let id = self.black_pool.swap_remove(idx);
        self.black_used.push(id);
        Ok(id)
    }

    /// Attempt `n` uniform draws; pool → used each. If the pool empties
    /// mid-draw, fewer than `n` come back — a degraded fill, not an error.
    pub fn draw_white(&mut self, rng: &mut impl Rng, n: usize) -> Vec<WhiteId> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            if self.white_pool.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..self.white_pool.len());
            let id = self.white_pool.swap_remove(idx);
            self.white_used.push(id);
            drawn.push(id);
        }
        drawn
    }

    /// Move a specific black instance from used back to the pool.
    pub fn return_black(&mut self, id: BlackId) -> Result<(), DeckError> {
        let pos = self
            .black_used
            .iter()
            .position(|&c| c == id)
            .ok_or(DeckError::NotFound(CardColor::Black))?;
        self.black_used.swap_remove(pos);
        self.black_pool.push(id);
        Ok(())
    }

    /// Move specific white instances from used back to the pool.
    pub fn return_whites(&mut self, ids: &[WhiteId]) -> Result<(), DeckError> {
        for &id in ids {
            let pos = self
                .white_used
                .iter()
                .position(|&c| c == id)
                .ok_or(DeckError::NotFound(CardColor::White))?;
            self.white_used.swap_remove(pos);
            self.white_pool.push(id);
        }
        Ok(())
    }

    /// Activate a set: its exact instances join the pools. No-op if the set
    /// is already active.
    pub fn add_set(&mut self, display_name: &str) -> Result<(), DeckError> {
        let set = self
            .sets
            .get(display_name)
            .ok_or_else(|| DeckError::UnknownSet(display_name.to_string()))?;
        let (black, white) = (set.black.clone(), set.white.clone());
        if self.active.iter().any(|n| n == display_name) {
            return Ok(());
        }
        self.black_pool.extend(black);
        self.white_pool.extend(white);
        self.active.push(display_name.to_string());
        Ok(())
    }

    /// Deactivate a set: its instances leave the live collections. No-op if
    /// the set is not active. Instances are stripped from the pool and,
    /// defensively, from the used pile; callers gate this operation so that
    /// no affected card can be in a hand.
    pub fn remove_set(&mut self, display_name: &str) -> Result<(), DeckError> {
        let set = self
            .sets
            .get(display_name)
            .ok_or_else(|| DeckError::UnknownSet(display_name.to_string()))?;
        let (black, white) = (set.black.clone(), set.white.clone());
        let Some(pos) = self.active.iter().position(|n| n == display_name) else {
            return Ok(());
        };
        self.active.remove(pos);

        for id in black {
            strip(&mut self.black_pool, &mut self.black_used, id);
        }
        for id in white {
            strip(&mut self.white_pool, &mut self.white_used, id);
        }
        Ok(())
    }

    /// Mix `n` fresh blank cards into the white pool. Blanks belong to no
    /// set; a deck reset discards them.
    pub fn add_blanks(&mut self, n: usize) {
        for _ in 0..n {
            let id = self.intern_white(WhiteCard::blank());
            self.white_pool.push(id);
        }
    }

    /// Every registered set's display name, lexicographically sorted.
    pub fn list_all_sets(&self) -> Vec<String> {
        // BTreeMap iterates in key order.
        self.sets.keys().cloned().collect()
    }

    /// Every active set's display name, lexicographically sorted.
    pub fn list_active_sets(&self) -> Vec<String> {
        let mut names = self.active.clone();
        names.sort();
        names
    }

    pub fn black(&self, id: BlackId) -> &BlackCard {
        &self.blacks[id.0 as usize]
    }

    pub fn white(&self, id: WhiteId) -> &WhiteCard {
        &self.whites[id.0 as usize]
    }

    pub fn white_mut(&mut self, id: WhiteId) -> &mut WhiteCard {
        &mut self.whites[id.0 as usize]
    }

    /// Fill the black card's gaps with the given white instances' display
    /// texts.
    pub fn compose(&self, black: BlackId, whites: &[WhiteId]) -> String {
        let fills: Vec<&str> = whites.iter().map(|&id| self.white(id).display()).collect();
        self.black(black).insert(&fills)
    }

    pub fn black_pool_len(&self) -> usize {
        self.black_pool.len()
    }

    pub fn black_used_len(&self) -> usize {
        self.black_used.len()
    }

    pub fn white_pool_len(&self) -> usize {
        self.white_pool.len()
    }

    pub fn white_used_len(&self) -> usize {
        self.white_used.len()
    }

    fn intern_black(&mut self, card: BlackCard) -> BlackId {
        let id = BlackId(self.blacks.len() as u32);
        self.blacks.push(card);
        id
    }

    fn intern_white(&mut self, card: WhiteCard) -> WhiteId {
        let id = WhiteId(self.whites.len() as u32);
        self.whites.push(card);
        id
    }
}

fn strip<T: Copy + PartialEq>(pool: &mut Vec<T>, used: &mut Vec<T>, id: T) {
    if let Some(pos) = pool.iter().position(|&c| c == id) {
        pool.swap_remove(pos);
    } else if let Some(pos) = used.iter().position(|&c| c == id) {
        used.swap_remove(pos);
    }
}
