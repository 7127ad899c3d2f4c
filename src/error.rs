use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Card;

/// Errors that can occur when manipulating the game state.
///
/// A rejected call never changes the game, so the driver can re-prompt and carry on.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("player {0} has been eliminated")]
    PlayerEliminated(PlayerId),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("snapshot decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Details of invalid player actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("{0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("{0} cannot be played on the current pile")]
    IllegalCard(Card),
    #[error("a draw stack is pending; stack a draw card or take the penalty")]
    StackPending,
    #[error("no draw stack is pending")]
    NoStackPending,
    #[error("color roulette must be resolved first")]
    RoulettePending,
    #[error("a hand swap or discard-all follow-up must be resolved first")]
    FollowUpPending,
    #[error("no matching follow-up is pending")]
    NoFollowUpPending,
    #[error("cannot swap hands with seat {0}")]
    InvalidSwapTarget(PlayerId),
}
