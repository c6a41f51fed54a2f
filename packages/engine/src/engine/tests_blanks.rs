//! Blank cards, the private `write` command, and the virtual player.

use crate::domain::phase::Phase;
use crate::domain::session::VIRTUAL_PLAYER;
use crate::engine::test_harness::Harness;
use crate::test_support::test_deck;

/// A lobby whose white pool holds nothing but blanks, so every dealt card
/// needs writing before it can be played.
fn all_blank_harness() -> Harness {
    let mut h = Harness::with_deck(test_deck(5, 0));
    h.d("a", "create", "");
    h.d("a", "blanks", "30");
    h.d("b", "join", "");
    h.d("c", "join", "");
    h.d("a", "start", "");
    h.force_czar("a");
    h
}

#[test]
fn blanks_command_sets_the_count() {
    let mut h = Harness::new(5, 40);
    h.d("a", "create", "");
    h.d("a", "blanks", "5");
    assert_eq!(h.game.session().blank_cards, 5);
    assert!(h
        .transcript()
        .contains("5 blank cards will be mixed into the deck."));
}

#[test]
fn a_blank_card_is_unplayable_until_written() {
    let mut h = all_blank_harness();

    h.d("b", "pick", "0");
    assert!(h.announcer.notices_to("b").contains(
        &"That card is blank. Write something on it before playing it.".to_string()
    ));
    assert!(h.game.session().played.is_empty());

    h.dp("b", "write", "0 a handwritten answer");
    assert!(h
        .announcer
        .notices_to("b")
        .iter()
        .any(|n| n.contains("Your card now reads: \"a handwritten answer\".")));

    let id = h.game.session().hands["b"][0];
    assert!(!h.game.deck().white(id).is_blank);

    h.d("b", "pick", "0");
    assert_eq!(h.game.session().played["b"], vec![id]);
}

#[test]
fn write_requires_a_private_channel() {
    let mut h = all_blank_harness();

    h.d("b", "write", "0 seen by everyone");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"This command only works in a private message.".to_string()));

    let id = h.game.session().hands["b"][0];
    assert!(h.game.deck().white(id).is_blank);
}

#[test]
fn write_rejects_non_blank_cards_and_empty_text() {
    let mut h = Harness::started(5, 40, &["a", "b", "c"]);

    h.dp("b", "write", "0 graffiti");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"That card is not blank.".to_string()));

    h.dp("b", "write", "0");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"Write what? Give me a card number and a text.".to_string()));
}

#[test]
fn the_written_card_keeps_its_identity() {
    let mut h = all_blank_harness();

    let id = h.game.session().hands["b"][0];
    h.dp("b", "write", "0 the same instance");

    // Same physical instance in the hand, new text, blank flag gone.
    assert_eq!(h.game.session().hands["b"][0], id);
    assert_eq!(h.game.deck().white(id).text, "the same instance");
    assert!(!h.game.deck().white(id).is_blank);
}

#[test]
fn the_virtual_player_joins_counts_and_submits() {
    let mut h = Harness::new(20, 60);
    h.d("a", "create", "");
    h.d("b", "join", "");
    h.d("a", "bot", "");
    assert_eq!(h.game.session().players.len(), 3);
    assert!(h.transcript().contains("Rando has joined the game."));

    h.d("a", "start", "");
    h.force_czar("a");
    assert_ne!(h.game.session().czar(), Some(VIRTUAL_PLAYER));

    // Rando has already played; one human submission completes the round.
    assert!(h.game.session().played.contains_key(VIRTUAL_PLAYER));
    h.d("b", "pick", "0");
    assert!(matches!(h.game.phase(), Phase::ChoosingWinner { .. }));
}

#[test]
fn the_virtual_player_can_win() {
    let mut h = Harness::new(20, 60);
    h.d("a", "create", "");
    h.d("b", "join", "");
    h.d("a", "bot", "");
    h.d("a", "start", "");
    h.force_czar("a");

    h.d("b", "pick", "0");
    let idx = h.candidate_index(VIRTUAL_PLAYER);
    h.d("a", "pick", &idx.to_string());

    assert!(h.transcript().contains("Rando wins with"));
    assert_eq!(h.game.session().scores.get(VIRTUAL_PLAYER), Some(1));
}

#[test]
fn enabling_the_bot_twice_is_rejected() {
    let mut h = Harness::new(5, 40);
    h.d("a", "create", "");
    h.d("a", "bot", "");
    h.d("a", "bot", "");

    assert_eq!(
        h.game
            .session()
            .players
            .iter()
            .filter(|p| p.as_str() == VIRTUAL_PLAYER)
            .count(),
        1
    );
    assert!(h
        .announcer
        .notices_to("a")
        .contains(&"Rando is already playing.".to_string()));
}

#[test]
fn an_all_blank_bot_hand_aborts_the_game() {
    let mut h = Harness::with_deck(test_deck(5, 0));
    h.d("a", "create", "");
    h.d("a", "blanks", "30");
    h.d("b", "join", "");
    h.d("a", "bot", "");
    h.d("a", "start", "");

    assert!(h
        .transcript()
        .contains("Rando drew nothing but blank cards. The game is aborted."));
    assert_eq!(h.game.phase(), &Phase::Idle);
}

#[test]
fn the_bot_discards_blanks_before_picking() {
    // 25 real cards and 5 blanks: whoever holds a blank gets it replaced
    // for the bot's pick, and the submission is never blank.
    let mut h = Harness::with_deck(test_deck(5, 25));
    h.d("a", "create", "");
    h.d("a", "blanks", "5");
    h.d("b", "join", "");
    h.d("a", "bot", "");
    h.d("a", "start", "");
    h.force_czar("a");

    let played = &h.game.session().played[VIRTUAL_PLAYER];
    assert_eq!(played.len(), 1);
    assert!(!h.game.deck().white(played[0]).is_blank);
    let hand = &h.game.session().hands[VIRTUAL_PLAYER];
    assert!(hand.iter().all(|&id| !h.game.deck().white(id).is_blank));
}
