//! Opaque save blob for a game in progress.
//!
//! The UI decides when to snapshot; this module only turns the data model into bytes
//! and back. Randomness is not captured: a restored game is reseeded by the caller.

use serde::{Deserialize, Serialize};

use crate::action::{Direction, PendingEffect, PlayerId};
use crate::card::{Card, Color};
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::error::GameError;
use crate::player::Player;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub players: Vec<Player>,
    pub deck: Deck,
    pub discard: Vec<Card>,
    pub current_color: Color,
    pub direction: Direction,
    pub current_player: PlayerId,
    pub stacked_draw_count: u32,
    pub pending: Option<PendingEffect>,
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serde::encode_to_vec(
            self,
            bincode::config::standard(),
        )?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        let (snapshot, _) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(snapshot)
    }
}
