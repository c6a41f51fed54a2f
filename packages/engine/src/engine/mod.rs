//! Game orchestration: the aggregate root and the phase state machine.
//!
//! One [`Game`] per room. Commands and fired timers arrive one at a time
//! (see [`runtime`]); a handler either fully commits its state change and
//! its messages, or mutates nothing.

mod choosing;
mod playing;
pub mod runtime;
pub mod timers;
mod virtual_player;
mod waiting;

#[cfg(test)]
mod tests_blanks;
#[cfg(test)]
mod tests_rounds;

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::announce::Announcer;
use crate::commands::{self, CommandSpec};
use crate::config::GameConfig;
use crate::domain::cards_serde::CardSetFile;
use crate::domain::deck::Deck;
use crate::domain::phase::{Phase, TimeoutKind};
use crate::domain::session::GameSession;
use crate::engine::timers::TimerScheduler;
use crate::errors::EngineError;

/// The aggregate root for one room.
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) deck: Deck,
    pub(crate) session: GameSession,
    pub(crate) phase: Phase,
    /// Identifies the current phase instance; bumped on every transition
    /// and on reset, so a timer armed for an earlier instance can never
    /// act on a later one.
    pub(crate) epoch: u64,
    announcer: Arc<dyn Announcer>,
    pub(crate) scheduler: Box<dyn TimerScheduler>,
    pub(crate) rng: ChaCha8Rng,
}

impl Game {
    pub fn new(
        deck: Deck,
        config: GameConfig,
        announcer: Arc<dyn Announcer>,
        scheduler: Box<dyn TimerScheduler>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let session = GameSession::new(&config);
        Self {
            config,
            deck,
            session,
            phase: Phase::Idle,
            epoch: 0,
            announcer,
            scheduler,
            rng,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Process one inbound action.
    pub fn handle_command(
        &mut self,
        player: &str,
        command: &str,
        args: &str,
        private: bool,
    ) -> Result<(), EngineError> {
        debug!(player, command, private, "inbound command");
        commands::dispatch(self, player, command, args, private)
    }

    /// Process one fired timer. A timer bound to a phase instance that is
    /// no longer active observes the epoch mismatch and becomes a no-op.
    pub fn handle_timeout(&mut self, epoch: u64, kind: TimeoutKind) -> Result<(), EngineError> {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, ?kind, "stale timer dropped");
            return Ok(());
        }

        match (self.phase.clone(), kind) {
            (Phase::Idle, _) => {}
            (Phase::WaitingForPlayers, TimeoutKind::Soon) => {
                if self.session.players.len() < self.config.min_players {
                    self.broadcast(&format!(
                        "The game needs at least {} players to start. Join now!",
                        self.config.min_players
                    ));
                }
            }
            (Phase::WaitingForPlayers, TimeoutKind::Hard) => {
                if self.session.players.len() == 1 {
                    self.broadcast("Nobody joined. The game is cancelled.");
                    self.reset();
                } else {
                    // Enough company to keep the lobby open; nudge again
                    // under a fresh phase instance.
                    self.arm_phase_timers();
                }
            }
            (Phase::PlayingRound, TimeoutKind::Soon) => {
                if !self.session.all_played() {
                    self.broadcast(&format!(
                        "Hurry up! Still waiting for {}.",
                        self.session.waiting_on().join(", ")
                    ));
                }
            }
            (Phase::PlayingRound, TimeoutKind::Hard) => {
                self.broadcast("Time is up.");
                playing::complete_round(self)?;
            }
            (Phase::ChoosingWinner { .. }, TimeoutKind::Soon) => {
                let czar = self.session.czar().unwrap_or_default().to_string();
                self.broadcast(&format!("{czar}, pick a winner!"));
            }
            (Phase::ChoosingWinner { .. }, TimeoutKind::Hard) => {
                choosing::timeout_restart(self)?;
            }
        }
        Ok(())
    }

    /// Clear all state and cancel all timers. Safe to call from any phase,
    /// idempotent, and the designated answer to a fatal handler error.
    pub fn reset(&mut self) {
        info!(phase = self.phase.name(), "resetting session");
        self.scheduler.cancel();
        self.epoch += 1;
        self.session = GameSession::new(&self.config);
        self.deck.reset();
        self.phase = Phase::Idle;
    }

    /// Register an externally fetched set. The registry and pools are the
    /// core's only involvement; fetching and persistence live outside.
    pub fn import_set(&mut self, file: CardSetFile) -> String {
        let name = self.deck.register(file);
        info!(set = %name, "imported card set");
        name
    }

    pub(crate) fn phase_table(&self) -> &'static [CommandSpec] {
        match &self.phase {
            Phase::Idle => waiting::IDLE_COMMANDS,
            Phase::WaitingForPlayers => waiting::WAITING_COMMANDS,
            Phase::PlayingRound => playing::PLAYING_COMMANDS,
            Phase::ChoosingWinner { .. } => choosing::CHOOSING_COMMANDS,
        }
    }

    /// Cancel the previous phase's timers and arm the pair for the current
    /// phase under a new epoch. Idle arms nothing but still invalidates.
    pub(crate) fn arm_phase_timers(&mut self) {
        let (soon, hard) = match &self.phase {
            Phase::Idle => {
                self.scheduler.cancel();
                self.epoch += 1;
                return;
            }
            Phase::WaitingForPlayers => (self.config.waiting_soon, self.config.waiting_hard),
            Phase::PlayingRound => (self.config.play_soon, self.config.play_hard),
            Phase::ChoosingWinner { .. } => (self.config.choose_soon, self.config.choose_hard),
        };
        self.scheduler.cancel();
        self.epoch += 1;
        debug!(epoch = self.epoch, phase = self.phase.name(), "arming phase timers");
        self.scheduler.arm(self.epoch, soon, hard);
    }

    /// End the game: announce the winner(s) and return to idle.
    pub(crate) fn finish(&mut self) -> Result<(), EngineError> {
        let line = {
            let winners = self.session.scores.winners();
            if winners.is_empty() {
                "The game is over!".to_string()
            } else {
                format!("The game is over! {} won!", winners.join(" and "))
            }
        };
        self.broadcast(&line);
        if !self.session.scores.is_empty() {
            let scores = self.session.scores.render();
            self.broadcast(&scores);
        }
        self.reset();
        Ok(())
    }

    /// The player count dropped below the minimum mid-game.
    pub(crate) fn stop_short(&mut self) {
        self.broadcast("Not enough players left. The game is stopped.");
        self.reset();
    }

    pub(crate) fn broadcast(&self, text: &str) {
        self.announcer.broadcast(text);
    }

    pub(crate) fn notice(&self, player: &str, text: &str) {
        self.announcer.notice(player, text);
    }

    pub(crate) fn reply(&self, player: &str, text: &str) {
        self.announcer.reply(player, text);
    }

    /// `Your hand: [0] ... [1] ...` for the given player, if dealt.
    pub(crate) fn hand_line(&self, nick: &str) -> Option<String> {
        let hand = self.session.hands.get(nick)?;
        let parts: Vec<String> = hand
            .iter()
            .enumerate()
            .map(|(i, &id)| format!("[{i}] {}", self.deck.white(id).display()))
            .collect();
        Some(format!("Your hand: {}.", parts.join(" ")))
    }
}
