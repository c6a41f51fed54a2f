//! Error handling for the game core.
//!
//! Three layers, converted upward with `From`:
//! - [`user::UserError`] — a player did something wrong; its `Display` is the
//!   notice sent back to that player. Never mutates state, never broadcast.
//! - [`engine::EngineError`] — structural or fatal conditions. Not swallowed:
//!   the runtime announces a generic failure and resets the session.
//! - [`CommandError`] — what a command handler returns.

pub mod engine;
pub mod user;

pub use engine::EngineError;
pub use user::UserError;

use crate::domain::deck::DeckError;

/// Outcome of a command handler.
///
/// The router notices `User` rejections to the issuer and propagates
/// `Engine` failures to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<DeckError> for CommandError {
    fn from(err: DeckError) -> Self {
        Self::Engine(err.into())
    }
}
