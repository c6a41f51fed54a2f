//! Idle and lobby commands: creating a game, joining, configuring,
//! toggling card sets, and starting the first round.

use rand::seq::SliceRandom;
use tracing::info;

use crate::commands::CommandSpec;
use crate::domain::phase::Phase;
use crate::domain::session::{GameSession, VIRTUAL_PLAYER};
use crate::engine::{playing, Game};
use crate::errors::{CommandError, EngineError, UserError};

pub(crate) static IDLE_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "create",
        aliases: &["c"],
        needs_player: false,
        private_only: false,
        run: create,
    },
    CommandSpec {
        name: "add_set",
        aliases: &["a"],
        needs_player: false,
        private_only: false,
        run: add_set,
    },
    CommandSpec {
        name: "remove_set",
        aliases: &["r"],
        needs_player: false,
        private_only: false,
        run: remove_set,
    },
];

pub(crate) static WAITING_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "join",
        aliases: &["j"],
        needs_player: false,
        private_only: false,
        run: join,
    },
    CommandSpec {
        name: "leave",
        aliases: &["l"],
        needs_player: true,
        private_only: false,
        run: leave,
    },
    CommandSpec {
        name: "start",
        aliases: &["st"],
        needs_player: true,
        private_only: false,
        run: start,
    },
    CommandSpec {
        name: "limit",
        aliases: &[],
        needs_player: true,
        private_only: false,
        run: limit,
    },
    CommandSpec {
        name: "blanks",
        aliases: &[],
        needs_player: true,
        private_only: false,
        run: blanks,
    },
    CommandSpec {
        name: "bot",
        aliases: &["rando"],
        needs_player: true,
        private_only: false,
        run: bot,
    },
    CommandSpec {
        name: "add_set",
        aliases: &["a"],
        needs_player: false,
        private_only: false,
        run: add_set,
    },
    CommandSpec {
        name: "remove_set",
        aliases: &["r"],
        needs_player: false,
        private_only: false,
        run: remove_set,
    },
];

fn create(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    let mut session = GameSession::new(&game.config);
    session.creator = nick.to_string();
    session.players.push(nick.to_string());
    game.session = session;
    game.phase = Phase::WaitingForPlayers;
    game.arm_phase_timers();

    info!(creator = nick, "game created");
    game.broadcast("Game is created.");
    Ok(())
}

fn join(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    if game.session.is_player(nick) {
        return Err(UserError::AlreadyPlaying.into());
    }
    game.session.players.push(nick.to_string());
    game.broadcast(&format!(
        "{nick} has joined the game. {} players total.",
        game.session.players.len()
    ));
    Ok(())
}

fn leave(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    if nick == game.session.creator {
        game.broadcast(&format!("{nick} has cancelled the game."));
        game.reset();
        return Ok(());
    }
    game.session.remove_player(nick);
    game.broadcast(&format!(
        "{nick} has left the game. {} players remaining.",
        game.session.players.len()
    ));
    Ok(())
}

fn start(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    if nick != game.session.creator {
        return Err(UserError::NotCreator {
            creator: game.session.creator.clone(),
        }
        .into());
    }
    if game.session.players.len() < game.config.min_players {
        game.reply(
            nick,
            &format!(
                "Need at least {} players to start a game.",
                game.config.min_players
            ),
        );
        return Ok(());
    }

    // Seed the pool, seat everyone, pick the first czar among humans.
    game.deck.add_blanks(game.session.blank_cards);
    for player in game.session.players.clone() {
        game.session.scores.register(&player);
    }
    game.session.players.shuffle(&mut game.rng);

    let humans: Vec<usize> = game
        .session
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.as_str() != VIRTUAL_PLAYER)
        .map(|(i, _)| i)
        .collect();
    let czar = humans
        .as_slice()
        .choose(&mut game.rng)
        .copied()
        .ok_or_else(|| EngineError::Invariant("no human player to act as czar".into()))?;
    game.session.czar_index = czar;
    game.session.round = 0;

    info!(players = game.session.players.len(), "game started");
    playing::begin_round(game)?;
    Ok(())
}

fn limit(game: &mut Game, nick: &str, args: &str) -> Result<(), CommandError> {
    require_creator(game, nick)?;
    let n: u32 = parse_first(args)?;
    if n == 0 {
        return Err(UserError::InvalidNumber.into());
    }
    game.session.point_limit = n;
    game.broadcast(&format!("Point limit is set to {n}."));
    Ok(())
}

fn blanks(game: &mut Game, nick: &str, args: &str) -> Result<(), CommandError> {
    require_creator(game, nick)?;
    let n: usize = parse_first(args)?;
    game.session.blank_cards = n;
    game.broadcast(&format!("{n} blank cards will be mixed into the deck."));
    Ok(())
}

fn bot(game: &mut Game, _nick: &str, _args: &str) -> Result<(), CommandError> {
    if game.session.virtual_player {
        return Err(UserError::BotAlreadyIn.into());
    }
    game.session.virtual_player = true;
    game.session.players.push(VIRTUAL_PLAYER.to_string());
    game.broadcast(&format!(
        "{VIRTUAL_PLAYER} has joined the game. {} players total.",
        game.session.players.len()
    ));
    Ok(())
}

/// `add_set all` or `add_set <index>...`, indices into the sorted full
/// listing. Available only while no round is in progress.
fn add_set(game: &mut Game, _nick: &str, args: &str) -> Result<(), CommandError> {
    let all = game.deck.list_all_sets();
    let chosen = if args.trim() == "all" {
        all.clone()
    } else {
        resolve_indices(&all, args)?
    };
    for name in &chosen {
        game.deck.add_set(name).map_err(EngineError::from)?;
    }
    announce_active(game);
    Ok(())
}

/// `remove_set <index>...`, indices into the sorted active listing.
fn remove_set(game: &mut Game, _nick: &str, args: &str) -> Result<(), CommandError> {
    let active = game.deck.list_active_sets();
    let chosen = resolve_indices(&active, args)?;
    for name in &chosen {
        game.deck.remove_set(name).map_err(EngineError::from)?;
    }
    announce_active(game);
    Ok(())
}

fn announce_active(game: &Game) {
    let active = game.deck.list_active_sets();
    if active.is_empty() {
        game.broadcast("No sets are active.");
    } else {
        game.broadcast(&format!("Active sets: {}.", active.join(", ")));
    }
}

fn resolve_indices(names: &[String], args: &str) -> Result<Vec<String>, CommandError> {
    let mut chosen = Vec::new();
    for tok in args.split_whitespace() {
        let idx: usize = tok.parse().map_err(|_| UserError::NotANumber)?;
        let name = names.get(idx).ok_or(UserError::NoSuchSet)?;
        chosen.push(name.clone());
    }
    if chosen.is_empty() {
        return Err(UserError::NotANumber.into());
    }
    Ok(chosen)
}

fn require_creator(game: &Game, nick: &str) -> Result<(), UserError> {
    if nick != game.session.creator {
        return Err(UserError::NotCreator {
            creator: game.session.creator.clone(),
        });
    }
    Ok(())
}

fn parse_first<T: std::str::FromStr>(args: &str) -> Result<T, UserError> {
    args.split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or(UserError::NotANumber)
}
