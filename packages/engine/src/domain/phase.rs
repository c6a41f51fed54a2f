//! Game progression phases and timer kinds.

/// Overall game progression phases.
///
/// Each variant carries only the data that exists solely in that phase; the
/// rest of the round state lives in
/// [`GameSession`](crate::domain::session::GameSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No game running. Initial and terminal.
    Idle,
    /// A game was created; players are joining.
    WaitingForPlayers,
    /// Non-czar players are submitting cards.
    PlayingRound,
    /// The czar is choosing among the shuffled candidates.
    ChoosingWinner {
        /// Submitting players in the randomized display order; the czar's
        /// pick indexes into this.
        order: Vec<String>,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::WaitingForPlayers => "waiting_for_players",
            Phase::PlayingRound => "playing_round",
            Phase::ChoosingWinner { .. } => "choosing_winner",
        }
    }
}

/// The two delayed callbacks armed per phase instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    /// Warning; fires only if the blocking condition still holds.
    Soon,
    /// Forces the phase's timeout transition.
    Hard,
}
