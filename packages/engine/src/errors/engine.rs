//! Structural and fatal failures.

use thiserror::Error;

use crate::domain::deck::DeckError;

/// A failure the core cannot attribute to the issuing player.
///
/// Callers of [`crate::engine::Game::handle_command`] are expected to
/// announce a generic error and invoke [`crate::engine::Game::reset`] when
/// one of these escapes; reset is safe from any phase.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("invariant violated: {0}")]
    Invariant(String),
}
