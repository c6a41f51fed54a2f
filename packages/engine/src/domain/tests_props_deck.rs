//! Property tests for the deck's live collections.
//!
//! Contract under test: for any sequence of draw/return operations on one
//! color, `|pool| + |used|` stays constant while the active sets are
//! unchanged.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::WhiteId;
use crate::domain::cards_serde::{BlackCardFile, CardSetFile};
use crate::domain::deck::Deck;

#[derive(Debug, Clone)]
enum Op {
    DrawBlack,
    ReturnBlack,
    DrawWhite(usize),
    ReturnWhites(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::DrawBlack),
        Just(Op::ReturnBlack),
        (1usize..=12).prop_map(Op::DrawWhite),
        (1usize..=12).prop_map(Op::ReturnWhites),
    ]
}

fn seeded_deck(blacks: usize, whites: usize) -> Deck {
    let mut deck = Deck::new();
    deck.register(CardSetFile {
        name: "Prop Set".to_string(),
        default_active: true,
        black: (0..blacks)
            .map(|i| BlackCardFile {
                text: format!("call {i} %s."),
                gaps: 1,
            })
            .collect(),
        white: (0..whites).map(|i| format!("response {i}")).collect(),
    });
    deck.reset();
    deck
}

proptest! {
    /// Draws and returns shuffle cards between pool and used, never in or
    /// out of the deck.
    #[test]
    fn prop_pool_plus_used_is_conserved(
        ops in prop::collection::vec(op_strategy(), 1..64),
        seed in any::<u64>(),
        blacks in 1usize..8,
        whites in 1usize..40,
    ) {
        let mut deck = seeded_deck(blacks, whites);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut black_out: Vec<_> = Vec::new();
        let mut white_out: Vec<WhiteId> = Vec::new();

        for op in ops {
            match op {
                Op::DrawBlack => {
                    if let Ok(id) = deck.draw_black(&mut rng) {
                        black_out.push(id);
                    }
                }
                Op::ReturnBlack => {
                    if let Some(id) = black_out.pop() {
                        deck.return_black(id).expect("drawn card must be in used");
                    }
                }
                Op::DrawWhite(n) => {
                    white_out.extend(deck.draw_white(&mut rng, n));
                }
                Op::ReturnWhites(n) => {
                    let n = n.min(white_out.len());
                    let batch: Vec<WhiteId> = white_out.drain(..n).collect();
                    deck.return_whites(&batch).expect("drawn cards must be in used");
                }
            }

            prop_assert_eq!(deck.black_pool_len() + deck.black_used_len(), blacks);
            prop_assert_eq!(deck.white_pool_len() + deck.white_used_len(), whites);
        }
    }

    /// Best-effort white draws never hand out more cards than the pool held.
    #[test]
    fn prop_draw_white_never_overdraws(
        n in 0usize..64,
        whites in 0usize..32,
        seed in any::<u64>(),
    ) {
        let mut deck = seeded_deck(1, whites);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let drawn = deck.draw_white(&mut rng, n);
        prop_assert_eq!(drawn.len(), n.min(whites));
        prop_assert_eq!(deck.white_used_len(), drawn.len());
    }
}
