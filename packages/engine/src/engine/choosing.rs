//! The judging phase: the czar picks a winner among the shuffled
//! candidates, or the round restarts on timeout.

use tracing::info;

use crate::commands::CommandSpec;
use crate::domain::phase::Phase;
use crate::engine::{playing, Game};
use crate::errors::{CommandError, EngineError, UserError};

pub(crate) static CHOOSING_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "pick",
        aliases: &["p", "play"],
        needs_player: true,
        private_only: false,
        run: pick,
    },
    CommandSpec {
        name: "leave",
        aliases: &["l"],
        needs_player: true,
        private_only: false,
        run: leave,
    },
    CommandSpec {
        name: "join",
        aliases: &["j"],
        needs_player: false,
        private_only: false,
        run: playing::join_pending,
    },
];

fn pick(game: &mut Game, nick: &str, args: &str) -> Result<(), CommandError> {
    if !game.session.is_czar(nick) {
        return Err(UserError::NotCzar.into());
    }
    let Phase::ChoosingWinner { order } = &game.phase else {
        return Err(EngineError::Invariant("choosing handler outside choosing phase".into()).into());
    };

    let choice: usize = args
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or(UserError::ChooseACard)?;
    let winner = order.get(choice).cloned().ok_or(UserError::InvalidNumber)?;

    let black = game
        .session
        .black
        .ok_or_else(|| EngineError::Invariant("no active black card".into()))?;
    let cards = game
        .session
        .played
        .get(&winner)
        .cloned()
        .ok_or_else(|| EngineError::Invariant("candidate without a submission".into()))?;
    let composed = game.deck.compose(black, &cards);

    // The winner may have left since submitting; the round still advances,
    // only the point is lost.
    if game.session.scores.contains(&winner) {
        game.session.scores.award(&winner);
        game.broadcast(&format!("{winner} wins with \"{composed}\"."));
        let scores = game.session.scores.render();
        game.broadcast(&scores);
    } else {
        game.broadcast(&format!(
            "{winner} wins with \"{composed}\", but they left the game. No point awarded."
        ));
    }
    info!(winner = %winner, round = game.session.round, "round decided");

    game.session.advance_czar();
    game.session.round += 1;
    playing::begin_round(game)?;
    Ok(())
}

/// The czar never decided: no point, nothing advances, the same round is
/// dealt again.
pub(crate) fn timeout_restart(game: &mut Game) -> Result<(), EngineError> {
    let czar = game.session.czar().unwrap_or_default().to_string();
    game.broadcast(&format!(
        "{czar} took too long to choose. Restarting the round."
    ));
    playing::restart_round(game)
}

fn leave(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    let was_czar = game.session.is_czar(nick);
    game.session.remove_player(nick);
    game.session.scores.remove(nick);
    game.session.hands.remove(nick);
    // The submission stays: the czar may still pick it, just without a
    // point going anywhere.
    game.broadcast(&format!(
        "{nick} has left the game. {} players remaining.",
        game.session.players.len()
    ));

    if game.session.players.len() < game.config.min_players {
        game.stop_short();
        return Ok(());
    }
    if was_czar {
        game.broadcast("The card czar has left. Restarting the round.");
        playing::restart_round(game)?;
    }
    Ok(())
}
