//! Core card types: black call cards, white response cards, card sets.
//!
//! Black cards are compared by value. White cards are compared by instance:
//! the deck arena assigns every white card a stable [`WhiteId`], and hands,
//! pools and submissions hold ids, so the exact drawn instance can be removed
//! from a hand even when two cards carry identical text.

/// Reusable gap token inside a black card's text, repeated once per gap.
pub const GAP_MARKER: &str = "%s";

/// What a gap looks like when the card is shown unfilled.
pub const GAP_DISPLAY: &str = "___";

/// Display text of a blank card that has not been written on yet.
pub const BLANK_DISPLAY: &str =
    "BLANK CARD: to play it you first have to write something on it, \
     like \"write <card id> <text>\" in a private message";

/// Stable identity of a black card inside one deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlackId(pub(crate) u32);

/// Stable identity of a white card inside one deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WhiteId(pub(crate) u32);

/// Prompt card with zero or more gaps to be filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackCard {
    pub text: String,
    pub gaps: usize,
}

impl BlackCard {
    pub fn new(text: impl Into<String>, gaps: usize) -> Self {
        Self {
            text: text.into(),
            gaps,
        }
    }

    /// The card as announced before anyone plays: gaps shown as `___`.
    pub fn display(&self) -> String {
        self.text.replace(GAP_MARKER, GAP_DISPLAY)
    }

    /// Substitute the chosen cards into the gaps.
    ///
    /// A single chosen card fills *every* gap occurrence, so one card can
    /// answer a multi-gap prompt. Multiple cards fill gaps left to right.
    /// A card without gap tokens gets the choices appended, space-separated.
    /// Produces a display string only; the card itself is never mutated.
    pub fn insert(&self, fills: &[&str]) -> String {
        if self.text.contains(GAP_MARKER) {
            if let [only] = fills {
                return self.text.replace(GAP_MARKER, only);
            }
            let mut s = self.text.clone();
            for fill in fills {
                s = s.replacen(GAP_MARKER, fill, 1);
            }
            return s;
        }

        if fills.is_empty() {
            return self.text.clone();
        }
        format!("{} {}", self.text, fills.join(" "))
    }
}

/// Response card. May start blank and be personalized later with `write`.
///
/// Deliberately not `PartialEq`: white cards are identified by [`WhiteId`],
/// never by content.
#[derive(Debug, Clone)]
pub struct WhiteCard {
    pub text: String,
    pub is_blank: bool,
}

impl WhiteCard {
    /// A regular card. Trailing periods are stripped so the text composes
    /// into a sentence.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: trim_trailing_dots(text.into()),
            is_blank: false,
        }
    }

    /// A fresh, unwritten blank card.
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            is_blank: true,
        }
    }

    /// Personalize a blank card. The card keeps its identity but from now
    /// on reads (and plays) as the supplied text.
    pub fn write(&mut self, text: impl Into<String>) {
        self.text = trim_trailing_dots(text.into());
        self.is_blank = false;
    }

    pub fn display(&self) -> &str {
        if self.is_blank {
            BLANK_DISPLAY
        } else {
            &self.text
        }
    }
}

fn trim_trailing_dots(mut s: String) -> String {
    while s.ends_with('.') {
        s.pop();
    }
    s
}

/// A named, independently toggleable bundle of cards.
///
/// Holds ids into the owning deck's arenas; the deck moves these exact
/// instances in and out of the live pools when the set is toggled.
#[derive(Debug, Clone)]
pub struct CardSet {
    pub name: String,
    pub default_active: bool,
    pub(crate) black: Vec<BlackId>,
    pub(crate) white: Vec<WhiteId>,
}

impl CardSet {
    /// Display name used by the set listings: `Name (black/white)`.
    pub fn display(&self) -> String {
        format!("{} ({}/{})", self.name, self.black.len(), self.white.len())
    }
}
