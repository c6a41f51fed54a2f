//! Command dispatch.
//!
//! Every phase owns a static table of [`CommandSpec`]s, built once at
//! compile time; a shared fragment (set listings, status, scores, hand) is
//! included by reference into the lookup rather than copied per phase.
//! Unknown command names produce no output at all.

pub mod shared;

use tracing::debug;

use crate::engine::Game;
use crate::errors::{CommandError, EngineError, UserError};

/// A phase command handler. Either fully commits its state change and emits
/// messages, or mutates nothing (rejections surface as `UserError`).
pub type Handler = fn(&mut Game, &str, &str) -> Result<(), CommandError>;

/// One dispatchable command.
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Reject with a notice unless the issuer is a current player.
    pub needs_player: bool,
    /// Only valid when the action arrived through a private channel.
    pub private_only: bool,
    pub run: Handler,
}

impl CommandSpec {
    fn matches(&self, command: &str) -> bool {
        self.name == command || self.aliases.contains(&command)
    }
}

fn lookup<'a>(table: &'a [CommandSpec], command: &str) -> Option<&'a CommandSpec> {
    table.iter().find(|spec| spec.matches(command))
}

/// Resolve and run one inbound action against the active phase.
///
/// Command names are case-insensitive. Permission flags are checked before
/// the handler runs; a failed flag emits the rejection notice and nothing
/// else. `UserError`s from the handler become notices to the issuer;
/// `EngineError`s propagate to the caller.
pub(crate) fn dispatch(
    game: &mut Game,
    player: &str,
    command: &str,
    args: &str,
    private: bool,
) -> Result<(), EngineError> {
    let command = command.to_lowercase();
    let table = game.phase_table();

    let Some(spec) = lookup(table, &command).or_else(|| lookup(shared::SHARED_COMMANDS, &command))
    else {
        debug!(player, command = %command, "unknown command ignored");
        return Ok(());
    };

    if spec.needs_player && !game.session.is_player(player) {
        game.notice(player, &UserError::NotPlaying.to_string());
        return Ok(());
    }
    if spec.private_only && !private {
        game.notice(player, &UserError::PrivateOnly.to_string());
        return Ok(());
    }

    match (spec.run)(game, player, args) {
        Ok(()) => Ok(()),
        Err(CommandError::User(err)) => {
            debug!(player, command = spec.name, %err, "command rejected");
            game.notice(player, &err.to_string());
            Ok(())
        }
        Err(CommandError::Engine(err)) => Err(err),
    }
}
