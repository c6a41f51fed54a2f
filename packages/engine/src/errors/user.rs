//! Player-visible rejections.
//!
//! The `Display` text of each variant is exactly what the issuing player
//! receives as a notice. A handler returning one of these has performed no
//! state mutation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("You are not playing.")]
    NotPlaying,
    #[error("You are already playing.")]
    AlreadyPlaying,
    #[error("This command only works in a private message.")]
    PrivateOnly,
    #[error("Only {creator} can do that.")]
    NotCreator { creator: String },
    #[error("You are the card czar. You choose the winner after everyone else has played.")]
    CzarCannotPlay,
    #[error("You are not the card czar.")]
    NotCzar,
    #[error("Not enough cards. {needed} needed.")]
    NotEnoughCards { needed: usize },
    #[error("Too many cards. {needed} needed.")]
    TooManyCards { needed: usize },
    #[error("Pick a digit.")]
    NotADigit,
    #[error("You don't have that card.")]
    NoSuchCard,
    #[error("You can't play the same card twice.")]
    DuplicateCard,
    #[error("That card is blank. Write something on it before playing it.")]
    BlankCard,
    #[error("That card is not blank.")]
    NotBlank,
    #[error("Choose a card.")]
    ChooseACard,
    #[error("Invalid number.")]
    InvalidNumber,
    #[error("Give me a number.")]
    NotANumber,
    #[error("No such set.")]
    NoSuchSet,
    #[error("You already played this round.")]
    AlreadyPlayed,
    #[error("You need at least one point to swap your hand.")]
    NoPointsToSwap,
    #[error("Hands are dealt when the game starts.")]
    HandsNotDealt,
    #[error("Write what? Give me a card number and a text.")]
    NothingWritten,
    #[error("Rando is already playing.")]
    BotAlreadyIn,
}
