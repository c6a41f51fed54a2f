//! The engine actor.
//!
//! One queue carries both inbound commands and fired timers; each event is
//! processed to completion before the next, so handlers never race and no
//! lock guards the session. This is the single logical thread of control.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::announce::Announcer;
use crate::config::GameConfig;
use crate::domain::deck::Deck;
use crate::domain::phase::TimeoutKind;
use crate::engine::timers::TokioScheduler;
use crate::engine::Game;

/// One unit of work for the engine.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    Command {
        player: String,
        command: String,
        args: String,
        private: bool,
    },
    Timeout {
        epoch: u64,
        kind: TimeoutKind,
    },
}

/// Sending side of a spawned engine.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineEvent>,
}

impl EngineHandle {
    /// Feed one inbound action. Returns `false` if the engine is gone.
    pub async fn command(&self, player: &str, command: &str, args: &str, private: bool) -> bool {
        self.tx
            .send(EngineEvent::Command {
                player: player.to_string(),
                command: command.to_string(),
                args: args.to_string(),
                private,
            })
            .await
            .is_ok()
    }

    /// Raw sender, for wiring additional event sources.
    pub fn sender(&self) -> mpsc::Sender<EngineEvent> {
        self.tx.clone()
    }
}

/// Spawn the engine for one room. The returned handle is the only way in;
/// dropping every handle shuts the engine down once the queue drains.
pub fn spawn_engine(deck: Deck, config: GameConfig, announcer: Arc<dyn Announcer>) -> EngineHandle {
    let (tx, mut rx) = mpsc::channel::<EngineEvent>(64);
    let scheduler = TokioScheduler::new(tx.clone());
    let mut game = Game::new(deck, config, announcer, Box::new(scheduler));

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let outcome = match event {
                EngineEvent::Command {
                    player,
                    command,
                    args,
                    private,
                } => game.handle_command(&player, &command, &args, private),
                EngineEvent::Timeout { epoch, kind } => game.handle_timeout(epoch, kind),
            };

            // A handler failure must not poison the room: announce a generic
            // error and fall back to a clean idle session.
            if let Err(err) = outcome {
                error!(error = %err, "handler failed, resetting the session");
                game.broadcast("Something went wrong. The game has been reset.");
                game.reset();
            }
        }
        info!("engine queue closed, shutting down");
    });

    EngineHandle { tx }
}
