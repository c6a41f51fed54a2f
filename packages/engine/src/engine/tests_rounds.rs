//! Round progression scenarios, mirroring the flows the original bot's
//! suite exercises: submitting, judging, leaving, joining mid-round, and
//! the end of the game.

use crate::domain::phase::Phase;
use crate::domain::session::GameSession;
use crate::engine::test_harness::Harness;
use crate::test_support::test_deck;

fn playing(h: &Harness) -> bool {
    matches!(h.game.phase(), Phase::PlayingRound)
}

fn choosing(h: &Harness) -> bool {
    matches!(h.game.phase(), Phase::ChoosingWinner { .. })
}

#[test]
fn full_round_to_a_winner() {
    let mut h = Harness::started(5, 40, &["a", "b", "c"]);
    assert!(playing(&h));

    h.d("b", "pick", "0");
    h.d("c", "pick", "0");
    assert!(h.transcript().contains("has to choose a winner"));
    assert!(choosing(&h));

    let idx = h.candidate_index("b");
    h.d("a", "pick", &idx.to_string());

    assert!(h.transcript().contains("b wins with"));
    assert_eq!(h.game.session().scores.get("b"), Some(1));
    assert!(playing(&h));
    assert_eq!(h.game.session().round, 1);
}

#[test]
fn the_czar_may_not_submit() {
    let mut h = Harness::started(5, 40, &["a", "b", "c"]);
    h.d("a", "pick", "0");

    assert!(h.game.session().played.is_empty());
    assert!(h.announcer.notices_to("a").contains(
        &"You are the card czar. You choose the winner after everyone else has played."
            .to_string()
    ));
}

#[test]
fn pick_arity_must_match_the_gaps() {
    let mut h = Harness::started(5, 40, &["a", "b", "c"]);

    h.d("b", "pick", "");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"Not enough cards. 1 needed.".to_string()));

    h.d("b", "pick", "0 1");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"Too many cards. 1 needed.".to_string()));

    assert!(h.game.session().played.is_empty());
    assert!(playing(&h));
}

#[test]
fn pick_validates_indices() {
    let mut h = Harness::started(5, 40, &["a", "b", "c"]);

    h.d("b", "pick", "ten");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"Pick a digit.".to_string()));

    h.d("b", "pick", "99");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"You don't have that card.".to_string()));

    assert!(h.game.session().played.is_empty());
}

#[test]
fn pick_rejects_duplicate_cards() {
    let mut deck = test_deck(0, 40);
    deck.register(crate::domain::cards_serde::CardSetFile {
        name: "Doubles".to_string(),
        default_active: true,
        black: vec![crate::domain::cards_serde::BlackCardFile {
            text: "%s and %s.".to_string(),
            gaps: 2,
        }],
        white: vec![],
    });
    deck.reset();

    let mut h = Harness::with_deck(deck);
    h.d("a", "create", "");
    h.d("b", "join", "");
    h.d("c", "join", "");
    h.d("a", "start", "");
    h.force_czar("a");

    h.d("b", "pick", "0 0");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"You can't play the same card twice.".to_string()));
    assert!(h.game.session().played.is_empty());

    h.d("b", "pick", "0 1");
    assert_eq!(h.game.session().played["b"].len(), 2);
}

#[test]
fn round_completes_exactly_when_all_but_the_czar_played() {
    let mut h = Harness::started(20, 60, &["a", "b", "c", "d"]);

    h.d("b", "pick", "0");
    assert!(playing(&h));
    h.d("c", "pick", "0");
    assert!(playing(&h));
    h.d("d", "pick", "0");
    assert!(choosing(&h));

    // The czar never appears among the submissions.
    assert!(!h.game.session().played.contains_key("a"));
    assert_eq!(h.game.session().played.len(), 3);
}

#[test]
fn submitted_cards_leave_the_hand_and_come_back_as_refills() {
    let mut h = Harness::started(20, 60, &["a", "b", "c"]);

    h.d("b", "pick", "0");
    h.d("c", "pick", "0");
    assert_eq!(h.game.session().hands["b"].len(), 9);

    let idx = h.candidate_index("b");
    h.d("a", "pick", &idx.to_string());
    for nick in ["a", "b", "c"] {
        assert_eq!(h.game.session().hands[nick].len(), 10);
    }
}

#[test]
fn czar_leaving_restarts_the_round() {
    let mut h = Harness::started(20, 60, &["a", "b", "c", "d"]);
    assert_eq!(h.game.session().players.len(), 4);

    h.d("b", "pick", "0");
    h.d("a", "leave", "");

    assert_eq!(h.game.session().players.len(), 3);
    assert!(h.game.session().played.is_empty());
    assert_ne!(h.game.session().czar(), Some("a"));
    assert!(h.transcript().contains("Restarting the round."));
    assert!(playing(&h));
    assert_eq!(h.game.session().round, 0);
}

#[test]
fn a_mid_round_joiner_is_dealt_in_next_round() {
    let mut h = Harness::started(20, 60, &["a", "b", "c"]);

    h.d("d", "join", "");
    assert!(!h.game.session().is_player("d"));
    assert!(h.game.session().is_pending("d"));

    h.d("b", "pick", "0");
    h.d("c", "pick", "0");
    let idx = h.candidate_index("b");
    h.d("a", "pick", &idx.to_string());

    assert!(h.game.session().is_player("d"));
    assert_eq!(h.game.session().hands["d"].len(), 10);
    assert!(h.game.session().scores.contains("d"));
}

#[test]
fn joiner_during_choosing_survives_a_czar_walkout() {
    let mut h = Harness::started(20, 60, &["a", "b", "c", "d"]);

    h.d("b", "pick", "0");
    h.d("c", "pick", "0");
    h.d("d", "pick", "0");
    assert!(choosing(&h));

    h.d("e", "join", "");
    h.d("a", "leave", "");

    // Same round, re-dealt, with the newcomer seated.
    assert!(playing(&h));
    assert_eq!(h.game.session().round, 0);
    assert!(h.game.session().is_player("e"));
    let round_zero = h
        .transcript()
        .matches("Round 0.")
        .count();
    assert_eq!(round_zero, 2);
}

#[test]
fn picking_a_departed_winner_awards_no_point() {
    let mut h = Harness::started(20, 60, &["a", "b", "c", "d"]);

    h.d("b", "pick", "0");
    h.d("c", "pick", "0");
    h.d("d", "pick", "0");
    let idx = h.candidate_index("b");

    h.d("b", "leave", "");
    h.d("a", "pick", &idx.to_string());

    assert!(h.transcript().contains("No point awarded."));
    assert!(!h.game.session().scores.contains("b"));
    // The round still advances.
    assert!(playing(&h));
    assert_eq!(h.game.session().round, 1);
}

#[test]
fn reaching_the_point_limit_ends_the_game() {
    let mut h = Harness::started(20, 200, &["a", "b", "c"]);
    h.game.session.point_limit = 2;

    for _ in 0..2 {
        h.force_czar("a");
        h.d("b", "pick", "0");
        h.d("c", "pick", "0");
        let idx = h.candidate_index("b");
        h.d("a", "pick", &idx.to_string());
    }

    assert!(h.transcript().contains("The game is over! b won!"));
    assert_eq!(h.game.phase(), &Phase::Idle);
    assert!(h.game.session().players.is_empty());
}

#[test]
fn an_empty_black_pool_ends_the_game() {
    let mut h = Harness::started(1, 60, &["a", "b", "c"]);

    h.d("b", "pick", "0");
    h.d("c", "pick", "0");
    let idx = h.candidate_index("b");
    h.d("a", "pick", &idx.to_string());

    assert!(h.transcript().contains("The deck is out of black cards."));
    assert!(h.transcript().contains("The game is over! b won!"));
    assert_eq!(h.game.phase(), &Phase::Idle);
}

#[test]
fn dropping_below_three_players_stops_the_game() {
    let mut h = Harness::started(20, 60, &["a", "b", "c"]);

    h.d("b", "leave", "");

    assert!(h.transcript().contains("Not enough players left."));
    assert_eq!(h.game.phase(), &Phase::Idle);
}

#[test]
fn swap_trades_a_point_for_a_fresh_hand() {
    let mut h = Harness::started(20, 60, &["a", "b", "c"]);
    h.game.session.scores.award("b");

    let before = h.game.session().hands["b"].clone();
    h.d("b", "swap", "");

    assert_eq!(h.game.session().scores.get("b"), Some(0));
    assert_eq!(h.game.session().hands["b"].len(), 10);
    assert_ne!(h.game.session().hands["b"], before);
    assert!(h.transcript().contains("b trades a point for a fresh hand."));
}

#[test]
fn swap_needs_a_point_and_an_open_round() {
    let mut h = Harness::started(20, 60, &["a", "b", "c"]);

    h.d("b", "swap", "");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"You need at least one point to swap your hand.".to_string()));

    h.game.session.scores.award("b");
    h.d("b", "pick", "0");
    h.d("b", "swap", "");
    assert!(h
        .announcer
        .notices_to("b")
        .contains(&"You already played this round.".to_string()));
    assert_eq!(h.game.session().scores.get("b"), Some(1));
}

#[test]
fn status_follows_the_phase() {
    let mut h = Harness::started(20, 60, &["a", "b", "c", "d"]);

    h.d("a", "status", "");
    let status = h.announcer.broadcasts().pop().unwrap();
    assert!(status.contains("4 players"));
    assert!(status.contains("Black card:"));
    assert!(status.contains("Waiting for"));

    h.d("a", "cards", "");
    assert!(h
        .announcer
        .notices_to("a")
        .iter()
        .any(|n| n.starts_with("Your hand:")));

    h.d("b", "pick", "0");
    h.d("c", "pick", "0");
    h.d("d", "pick", "0");
    h.d("a", "status", "");
    let status = h.announcer.broadcasts().pop().unwrap();
    assert!(status.contains("Waiting for card czar a"));
}

#[test]
fn reset_is_idempotent_from_any_phase() {
    let mut h = Harness::started(20, 60, &["a", "b", "c"]);
    h.d("b", "pick", "0");

    h.game.reset();
    assert_eq!(h.game.phase(), &Phase::Idle);
    let epoch = h.game.epoch();

    h.game.reset();
    assert_eq!(h.game.phase(), &Phase::Idle);
    assert_eq!(h.game.session().players, GameSession::default().players);
    assert!(h.game.epoch() > epoch);

    // A fresh game can start right away.
    h.d("a", "create", "");
    assert_eq!(h.game.phase(), &Phase::WaitingForPlayers);
}
