//! Domain layer: pure game data and helpers, no I/O and no timers.

pub mod cards;
pub mod cards_serde;
pub mod deck;
pub mod phase;
pub mod score;
pub mod session;

#[cfg(test)]
mod tests_props_deck;

// Re-exports for ergonomics
pub use cards::{BlackCard, BlackId, CardSet, WhiteCard, WhiteId};
pub use cards_serde::CardSetFile;
pub use deck::{Deck, DeckError};
pub use phase::{Phase, TimeoutKind};
pub use score::Scoreboard;
pub use session::{GameSession, VIRTUAL_PLAYER};
