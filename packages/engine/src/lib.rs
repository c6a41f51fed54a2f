#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod announce;
pub mod commands;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod test_support;

// Re-exports for public API
pub use announce::Announcer;
pub use config::GameConfig;
pub use domain::cards::{BlackCard, BlackId, CardSet, WhiteCard, WhiteId};
pub use domain::cards_serde::CardSetFile;
pub use domain::deck::Deck;
pub use domain::phase::{Phase, TimeoutKind};
pub use domain::score::Scoreboard;
pub use engine::runtime::{spawn_engine, EngineEvent, EngineHandle};
pub use engine::timers::{TimerScheduler, TokioScheduler};
pub use engine::Game;
pub use errors::engine::EngineError;
pub use errors::user::UserError;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
