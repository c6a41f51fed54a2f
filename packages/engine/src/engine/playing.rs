//! The submission phase: dealing, picking, blank writing, hand swapping,
//! and the transition into winner choosing.

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::commands::CommandSpec;
use crate::domain::cards::WhiteId;
use crate::domain::deck::DeckError;
use crate::domain::phase::Phase;
use crate::domain::session::VIRTUAL_PLAYER;
use crate::engine::{virtual_player, Game};
use crate::errors::{CommandError, EngineError, UserError};

pub(crate) static PLAYING_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "pick",
        aliases: &["p", "play"],
        needs_player: true,
        private_only: false,
        run: pick,
    },
    CommandSpec {
        name: "write",
        aliases: &["w"],
        needs_player: true,
        private_only: true,
        run: write,
    },
    CommandSpec {
        name: "swap",
        aliases: &[],
        needs_player: true,
        private_only: false,
        run: swap,
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
        run: join_pending,
    },
];

/// Start (or restart) the round the session points at: merge pending
/// joiners, run the win/exhaustion checks, top up hands, draw the call
/// card, announce, and let the virtual player move.
pub(crate) fn begin_round(game: &mut Game) -> Result<(), EngineError> {
    let joiners: Vec<String> = game.session.pending.drain(..).collect();
    for nick in joiners {
        if game.session.is_player(&nick) {
            continue;
        }
        game.session.players.push(nick.clone());
        game.session.scores.register(&nick);
        game.broadcast(&format!(
            "{nick} has joined the game. {} players total.",
            game.session.players.len()
        ));
    }

    if game.session.scores.highest() >= game.session.point_limit {
        return game.finish();
    }

    // Top everyone up to a full hand. A shortfall means the white pool is
    // exhausted and the game cannot continue.
    let hand_size = game.config.hand_size;
    for nick in game.session.players.clone() {
        let have = game.session.hands.get(&nick).map_or(0, Vec::len);
        if have >= hand_size {
            continue;
        }
        let drawn = game.deck.draw_white(&mut game.rng, hand_size - have);
        let short = drawn.len() < hand_size - have;
        game.session.hands.entry(nick).or_default().extend(drawn);
        if short {
            game.broadcast("The deck is out of white cards.");
            return game.finish();
        }
    }

    let black = match game.deck.draw_black(&mut game.rng) {
        Ok(id) => id,
        Err(DeckError::EmptyPool(_)) => {
            game.broadcast("The deck is out of black cards.");
            return game.finish();
        }
        Err(err) => return Err(err.into()),
    };
    game.session.black = Some(black);
    game.session.played.clear();

    game.phase = Phase::PlayingRound;
    game.arm_phase_timers();

    let czar = game.session.czar().unwrap_or_default().to_string();
    info!(
        round = game.session.round,
        czar = %czar,
        players = game.session.players.len(),
        "round started"
    );
    game.broadcast(&format!(
        "Round {}. The card czar is {}. This round's card is...",
        game.session.round, czar
    ));
    game.broadcast(&game.deck.black(black).display());

    let gaps = game.deck.black(black).gaps;
    for nick in game.session.players.clone() {
        if nick == czar || nick == VIRTUAL_PLAYER {
            continue;
        }
        let example: Vec<String> = (0..gaps).map(|i| i.to_string()).collect();
        let noun = if gaps == 1 { "card" } else { "cards" };
        game.notice(
            &nick,
            &format!(
                "You need to play {gaps} {noun}, like \"pick {}\".",
                example.join(" ")
            ),
        );
        if let Some(line) = game.hand_line(&nick) {
            game.notice(&nick, &line);
        }
    }

    virtual_player::auto_play(game)?;
    if game.phase == Phase::Idle {
        // The virtual player aborted the game.
        return Ok(());
    }
    check_completion(game)
}

/// Transition to ChoosingWinner once everyone but the czar has submitted.
pub(crate) fn check_completion(game: &mut Game) -> Result<(), EngineError> {
    if game.session.all_played() {
        complete_round(game)
    } else {
        Ok(())
    }
}

/// Resolve the submission phase with whatever was played. Fewer than two
/// submissions cannot be judged; that retries the same round.
pub(crate) fn complete_round(game: &mut Game) -> Result<(), EngineError> {
    if game.session.played.len() < 2 {
        game.broadcast("Not enough players submitted a play. Restarting the round.");
        return restart_round(game);
    }

    // Submitted instances leave their hands now; the players get refills
    // at the next round start.
    let submissions: Vec<(String, Vec<WhiteId>)> = game
        .session
        .played
        .iter()
        .map(|(p, c)| (p.clone(), c.clone()))
        .collect();
    for (nick, cards) in &submissions {
        if let Some(hand) = game.session.hands.get_mut(nick) {
            hand.retain(|id| !cards.contains(id));
        }
    }

    let mut order: Vec<String> = game
        .session
        .players
        .iter()
        .filter(|p| game.session.played.contains_key(p.as_str()))
        .cloned()
        .collect();
    order.shuffle(&mut game.rng);

    let czar = game.session.czar().unwrap_or_default().to_string();
    game.phase = Phase::ChoosingWinner {
        order: order.clone(),
    };
    game.arm_phase_timers();

    game.broadcast(&format!(
        "Everyone has played. Now {czar} has to choose a winner. Candidates are:"
    ));
    let black = game
        .session
        .black
        .ok_or_else(|| EngineError::Invariant("no active black card".into()))?;
    for (i, nick) in order.iter().enumerate() {
        let cards = game.session.played.get(nick).cloned().unwrap_or_default();
        game.broadcast(&format!("[{i}] {}", game.deck.compose(black, &cards)));
    }
    Ok(())
}

/// Retry the current round from scratch: the call card goes back to the
/// pool, submissions are forgotten, and the round is dealt again.
pub(crate) fn restart_round(game: &mut Game) -> Result<(), EngineError> {
    if let Some(black) = game.session.black.take() {
        game.deck.return_black(black)?;
    }
    game.session.played.clear();
    begin_round(game)
}

fn pick(game: &mut Game, nick: &str, args: &str) -> Result<(), CommandError> {
    if game.session.is_czar(nick) {
        return Err(UserError::CzarCannotPlay.into());
    }
    let black = game
        .session
        .black
        .ok_or_else(|| EngineError::Invariant("no active black card".into()))?;
    let gaps = game.deck.black(black).gaps;

    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < gaps {
        return Err(UserError::NotEnoughCards { needed: gaps }.into());
    }
    if parts.len() > gaps {
        return Err(UserError::TooManyCards { needed: gaps }.into());
    }

    let hand = game
        .session
        .hands
        .get(nick)
        .ok_or(UserError::HandsNotDealt)?;
    let mut choice: Vec<WhiteId> = Vec::with_capacity(gaps);
    for tok in parts {
        let idx: usize = tok.parse().map_err(|_| UserError::NotADigit)?;
        let &id = hand.get(idx).ok_or(UserError::NoSuchCard)?;
        if game.deck.white(id).is_blank {
            return Err(UserError::BlankCard.into());
        }
        if choice.contains(&id) {
            return Err(UserError::DuplicateCard.into());
        }
        choice.push(id);
    }

    game.notice(
        nick,
        &format!("You chose to play \"{}\"", game.deck.compose(black, &choice)),
    );
    game.session.played.insert(nick.to_string(), choice);
    debug!(player = nick, submitted = game.session.played.len(), "play recorded");
    check_completion(game)?;
    Ok(())
}

/// Personalize a blank card: `write <index> <text>`, private channel only.
/// The card keeps its identity but loses its blank flag for good.
fn write(game: &mut Game, nick: &str, args: &str) -> Result<(), CommandError> {
    let (idx_tok, text) = args
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(UserError::NothingWritten)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(UserError::NothingWritten.into());
    }
    let idx: usize = idx_tok.parse().map_err(|_| UserError::NotADigit)?;

    let hand = game
        .session
        .hands
        .get(nick)
        .ok_or(UserError::HandsNotDealt)?;
    let &id = hand.get(idx).ok_or(UserError::NoSuchCard)?;
    if !game.deck.white(id).is_blank {
        return Err(UserError::NotBlank.into());
    }

    game.deck.white_mut(id).write(text);
    game.notice(
        nick,
        &format!("Your card now reads: \"{}\".", game.deck.white(id).display()),
    );
    Ok(())
}

/// Trade one point for a fresh hand. Not for the czar, not after
/// submitting, not without a point to spend.
fn swap(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    if game.session.is_czar(nick) {
        return Err(UserError::CzarCannotPlay.into());
    }
    if game.session.played.contains_key(nick) {
        return Err(UserError::AlreadyPlayed.into());
    }
    if game.session.scores.get(nick).unwrap_or(0) == 0 {
        return Err(UserError::NoPointsToSwap.into());
    }

    game.session.scores.deduct(nick);
    let old = game
        .session
        .hands
        .get_mut(nick)
        .map(std::mem::take)
        .unwrap_or_default();
    game.deck.return_whites(&old).map_err(EngineError::from)?;
    let fresh = game.deck.draw_white(&mut game.rng, game.config.hand_size);
    game.session.hands.insert(nick.to_string(), fresh);

    game.broadcast(&format!("{nick} trades a point for a fresh hand."));
    if let Some(line) = game.hand_line(nick) {
        game.notice(nick, &line);
    }
    Ok(())
}

fn leave(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    let was_czar = game.session.is_czar(nick);
    game.session.remove_player(nick);
    game.session.scores.remove(nick);
    game.session.hands.remove(nick);
    game.session.played.remove(nick);
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
        restart_round(game)?;
    } else {
        check_completion(game)?;
    }
    Ok(())
}

/// Joining mid-round queues the player for the next round start.
pub(crate) fn join_pending(game: &mut Game, nick: &str, _args: &str) -> Result<(), CommandError> {
    if game.session.is_player(nick) || game.session.is_pending(nick) {
        return Err(UserError::AlreadyPlaying.into());
    }
    game.session.pending.push(nick.to_string());
    game.notice(nick, "You'll be dealt in at the start of the next round.");
    Ok(())
}
