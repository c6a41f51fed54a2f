//! The optional virtual opponent.
//!
//! Rando submits at round start by taking the first `gaps` non-blank cards
//! from its hand. Blanks it cannot write on are discarded and replaced
//! first; a hand it cannot play from at all aborts the whole game rather
//! than skipping the seat silently.

use tracing::{debug, warn};

use crate::domain::cards::WhiteId;
use crate::domain::session::VIRTUAL_PLAYER;
use crate::engine::Game;
use crate::errors::EngineError;

pub(crate) fn auto_play(game: &mut Game) -> Result<(), EngineError> {
    if !game.session.virtual_player {
        return Ok(());
    }
    let black = game
        .session
        .black
        .ok_or_else(|| EngineError::Invariant("no active black card".into()))?;
    let gaps = game.deck.black(black).gaps;

    let hand = game
        .session
        .hands
        .get(VIRTUAL_PLAYER)
        .cloned()
        .unwrap_or_default();
    if !hand.is_empty() && hand.iter().all(|&id| game.deck.white(id).is_blank) {
        warn!("virtual player holds only blanks, aborting the game");
        game.broadcast(&format!(
            "{VIRTUAL_PLAYER} drew nothing but blank cards. The game is aborted."
        ));
        game.reset();
        return Ok(());
    }

    // Swap out blanks before computing the pick. Replacements are drawn
    // before the blanks go back so they cannot be redrawn immediately.
    let blanks: Vec<WhiteId> = hand
        .iter()
        .copied()
        .filter(|&id| game.deck.white(id).is_blank)
        .collect();
    if !blanks.is_empty() {
        let replacements = game.deck.draw_white(&mut game.rng, blanks.len());
        let hand_mut = game
            .session
            .hands
            .get_mut(VIRTUAL_PLAYER)
            .ok_or_else(|| EngineError::Invariant("virtual player has no hand".into()))?;
        hand_mut.retain(|id| !blanks.contains(id));
        hand_mut.extend(replacements);
        game.deck.return_whites(&blanks)?;
    }

    let hand = game
        .session
        .hands
        .get(VIRTUAL_PLAYER)
        .cloned()
        .unwrap_or_default();
    let choice: Vec<WhiteId> = hand
        .iter()
        .copied()
        .filter(|&id| !game.deck.white(id).is_blank)
        .take(gaps)
        .collect();
    if choice.len() < gaps {
        warn!(
            needed = gaps,
            available = choice.len(),
            "virtual player cannot fill the card, aborting the game"
        );
        game.broadcast(&format!(
            "{VIRTUAL_PLAYER} can't fill this card. The game is aborted."
        ));
        game.reset();
        return Ok(());
    }

    debug!(cards = choice.len(), "virtual player submitted");
    game.session.played.insert(VIRTUAL_PLAYER.to_string(), choice);
    Ok(())
}
