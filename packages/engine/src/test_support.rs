//! Test doubles for the announcer and scheduler seams, plus deck builders.
//!
//! Shared between in-source unit tests and the `tests/` integration suite,
//! and usable by downstream transports for their own tests.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::announce::Announcer;
use crate::config::GameConfig;
use crate::domain::cards_serde::{BlackCardFile, CardSetFile};
use crate::domain::deck::Deck;
use crate::engine::timers::TimerScheduler;

/// One captured outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Broadcast(String),
    Notice(String, String),
    Reply(String, String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Message::Broadcast(t) => t,
            Message::Notice(_, t) => t,
            Message::Reply(_, t) => t,
        }
    }
}

/// Announcer that records everything, in order.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    log: Mutex<Vec<Message>>,
}

impl RecordingAnnouncer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn log(&self) -> Vec<Message> {
        self.log.lock().clone()
    }

    /// Every message text, newline-joined, for `contains` assertions.
    pub fn transcript(&self) -> String {
        self.log
            .lock()
            .iter()
            .map(|m| m.text().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter_map(|m| match m {
                Message::Broadcast(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    /// Notices sent to one player.
    pub fn notices_to(&self, player: &str) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter_map(|m| match m {
                Message::Notice(p, t) if p == player => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<Message> {
        self.log.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

impl Announcer for RecordingAnnouncer {
    fn broadcast(&self, text: &str) {
        self.log.lock().push(Message::Broadcast(text.to_string()));
    }

    fn notice(&self, player: &str, text: &str) {
        self.log
            .lock()
            .push(Message::Notice(player.to_string(), text.to_string()));
    }

    fn reply(&self, player: &str, text: &str) {
        self.log
            .lock()
            .push(Message::Reply(player.to_string(), text.to_string()));
    }
}

/// One recorded scheduler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerOp {
    Arm { epoch: u64 },
    Cancel,
}

/// Scheduler that records arm/cancel calls instead of spawning timers.
/// Tests fire timeouts by calling `Game::handle_timeout` directly.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    ops: Arc<Mutex<Vec<SchedulerOp>>>,
}

impl RecordingScheduler {
    /// Returns the scheduler and a shared view of its call log.
    pub fn new() -> (Self, Arc<Mutex<Vec<SchedulerOp>>>) {
        let ops = Arc::new(Mutex::new(Vec::new()));
        (Self { ops: ops.clone() }, ops)
    }
}

impl TimerScheduler for RecordingScheduler {
    fn arm(&mut self, epoch: u64, _soon: Duration, _hard: Duration) {
        self.ops.lock().push(SchedulerOp::Arm { epoch });
    }

    fn cancel(&mut self) {
        self.ops.lock().push(SchedulerOp::Cancel);
    }
}

/// A deck with one default set of `blacks` one-gap call cards and `whites`
/// plain response cards, mirroring the dummy decks the scenario tests use.
pub fn test_deck(blacks: usize, whites: usize) -> Deck {
    let mut deck = Deck::new();
    deck.register(CardSetFile {
        name: "Base Set".to_string(),
        default_active: true,
        black: (0..blacks)
            .map(|i| BlackCardFile {
                text: format!("dummy card {i} %s."),
                gaps: 1,
            })
            .collect(),
        white: (0..whites).map(|i| format!("answer {i}")).collect(),
    });
    deck.reset();
    deck
}

/// Deterministic config for scenario tests.
pub fn test_config() -> GameConfig {
    GameConfig {
        rng_seed: Some(42),
        ..GameConfig::default()
    }
}
