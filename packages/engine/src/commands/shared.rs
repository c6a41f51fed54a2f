//! Commands available in every phase.
//!
//! This fragment is included by reference into dispatch after the active
//! phase's own table, so a phase can shadow a shared name but never has to
//! copy it.

use crate::commands::CommandSpec;
use crate::domain::phase::Phase;
use crate::engine::Game;
use crate::errors::{CommandError, UserError};

pub(crate) static SHARED_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "list_sets",
        aliases: &["la", "sets"],
        needs_player: false,
        private_only: false,
        run: list_sets,
    },
    CommandSpec {
        name: "list_used_sets",
        aliases: &["lu", "active"],
        needs_player: false,
        private_only: false,
        run: list_used_sets,
    },
    CommandSpec {
        name: "scores",
        aliases: &["sc", "score"],
        needs_player: false,
        private_only: false,
        run: scores,
    },
    CommandSpec {
        name: "status",
        aliases: &[],
        needs_player: false,
        private_only: false,
        run: status,
    },
    CommandSpec {
        name: "cards",
        aliases: &["hand"],
        needs_player: true,
        private_only: false,
        run: cards,
    },
];

fn list_sets(game: &mut Game, _nick: &str, _args: &str) -> Result<(), CommandError> {
    let names = game.deck.list_all_sets();
    if names.is_empty() {
        game.broadcast("No sets are loaded.");
    } else {
        game.broadcast(&format!("Sets: {}.", indexed(&names)));
    }
    Ok(())
}

fn list_used_sets(game: &mut Game, _nick: &str, _args: &str) -> Result<(), CommandError> {
    let names = game.deck.list_active_sets();
    if names.is_empty() {
        game.broadcast("No sets are active.");
    } else {
        game.broadcast(&format!("Active sets: {}.", indexed(&names)));
    }
    Ok(())
}

fn scores(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    if game.session.scores.is_empty() {
        game.notice(nick, "No scores yet.");
    } else {
        game.broadcast(&game.session.scores.render());
    }
    Ok(())
}

fn status(game: &mut Game, _nick: &str, _args: &str) -> Result<(), CommandError> {
    let session = &game.session;
    let line = match &game.phase {
        Phase::Idle => "No game in progress.".to_string(),
        Phase::WaitingForPlayers => format!(
            "Waiting for players: {}. {} so far.",
            session.players.join(", "),
            session.players.len()
        ),
        Phase::PlayingRound => {
            let black = session
                .black
                .map(|id| game.deck.black(id).display())
                .unwrap_or_default();
            format!(
                "{} players. Black card: {} Waiting for {}.",
                session.players.len(),
                black,
                session.waiting_on().join(", ")
            )
        }
        Phase::ChoosingWinner { .. } => {
            let black = session
                .black
                .map(|id| game.deck.black(id).display())
                .unwrap_or_default();
            format!(
                "{} players. Black card: {} Waiting for card czar {}.",
                session.players.len(),
                black,
                session.czar().unwrap_or_default()
            )
        }
    };
    game.broadcast(&line);
    Ok(())
}

fn cards(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    let line = game.hand_line(nick).ok_or(UserError::HandsNotDealt)?;
    game.notice(nick, &line);
    Ok(())
}

fn indexed(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| format!("[{i}] {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}
