use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum TurnError {
    #[error("It is not your turn")]
    NotYourTurn,
    #[error("Another action is still in progress")]
    ActionLocked,
    #[error("That card does not match the discard pile")]
    IllegalMove,
    #[error("That card is not in your hand")]
    CardNotInHand,
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

pub type Result<T, E = TurnError> = std::result::Result<T, E>;
