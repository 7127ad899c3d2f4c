//! Seeded cores of the narrator-driven party games that share the table with the card game.

pub mod imposter;
pub mod mafia;

use thiserror::Error;

pub use imposter::{DEFAULT_WORDS, ImposterRound};
pub use mafia::{MafiaPlayer, MafiaSetup, Narrator, Phase, Role, Team, UndoRecord};

/// Errors raised by the party-game helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartyError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(usize),
    #[error("player {0} is already out")]
    AlreadyEliminated(usize),
    #[error("player {0} is still in the game")]
    NotEliminated(usize),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("invalid setup: {0}")]
    InvalidSetup(&'static str),
}

pub(crate) fn validate_names(names: &[String], minimum: usize) -> Result<(), PartyError> {
    if names.len() < minimum {
        return Err(PartyError::InvalidSetup("not enough players"));
    }
    for (idx, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(PartyError::InvalidSetup("player names must not be empty"));
        }
        if names[..idx].contains(name) {
            return Err(PartyError::InvalidSetup("player names must be unique"));
        }
    }
    Ok(())
}
