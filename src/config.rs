use serde::{Deserialize, Serialize};

use crate::card::{DeckVariant, HAND_SIZE, MAX_PLAYERS, MERCY_LIMIT, MIN_PLAYERS};
use crate::error::GameError;
use crate::player::PlayerSeat;

pub const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// How a draw card may be laid onto an active draw stack.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum StackRule {
    /// The stacked card's draw value must be at least the top card's.
    #[default]
    AtLeastTop,
    /// Any stackable draw card may be added regardless of the top card.
    AnyDraw,
}

/// Rules and randomness for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: u64,
    pub variant: DeckVariant,
    pub stack_rule: StackRule,
    pub hand_size: usize,
    /// Hand size at which a player is eliminated.
    pub mercy_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            variant: DeckVariant::Standard,
            stack_rule: StackRule::AtLeastTop,
            hand_size: HAND_SIZE,
            mercy_limit: MERCY_LIMIT,
        }
    }
}

impl GameConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        if self.mercy_limit <= self.hand_size {
            return Err(GameError::InvalidConfiguration(
                "mercy limit must exceed the starting hand size",
            ));
        }
        Ok(())
    }
}

/// Checks seat count and name uniqueness.
pub fn validate_seats(seats: &[PlayerSeat]) -> Result<(), GameError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats.len()) {
        return Err(GameError::InvalidConfiguration(
            "players must be between 2 and 10",
        ));
    }
    for (idx, seat) in seats.iter().enumerate() {
        if seat.name.trim().is_empty() {
            return Err(GameError::InvalidConfiguration("player names must not be empty"));
        }
        if seats[..idx].iter().any(|other| other.name == seat.name) {
            return Err(GameError::InvalidConfiguration("player names must be unique"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let seats = vec![PlayerSeat::cpu("Kim"), PlayerSeat::human("Kim")];
        assert!(matches!(
            validate_seats(&seats),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_single_player() {
        assert!(validate_seats(&[PlayerSeat::cpu("Solo")]).is_err());
    }

    #[test]
    fn mercy_limit_must_exceed_hand() {
        let config = GameConfig {
            mercy_limit: 7,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(GameConfig::default().validate().is_ok());
    }
}
