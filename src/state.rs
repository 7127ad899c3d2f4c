use serde::{Deserialize, Serialize};

use crate::action::{Direction, PendingEffect, PlayerId};
use crate::card::{Card, Color};

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub is_human: bool,
    pub is_eliminated: bool,
    pub is_current: bool,
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// Game state snapshot from one seat's perspective, handed to bots and UIs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub top_card: Option<Card>,
    pub current_color: Color,
    pub stacked_draw_count: u32,
    pub pending: Option<PendingEffect>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub mercy_limit: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl PlayerView {
    pub fn is_stacking(&self) -> bool {
        self.stacked_draw_count > 0
    }

    pub fn self_state(&self) -> Option<&PlayerPublicState> {
        self.players.get(self.self_player)
    }

    /// Seat that acts after the current one, skipping eliminated seats.
    pub fn next_active_seat(&self) -> Option<PlayerId> {
        let seats = self.players.len() as isize;
        if seats == 0 {
            return None;
        }
        let mut seat = self.current_player as isize;
        for _ in 0..seats {
            seat = (seat + self.direction.step()).rem_euclid(seats);
            let player = &self.players[seat as usize];
            if !player.is_eliminated {
                return Some(player.id);
            }
        }
        None
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.hand.iter().filter(|c| c.color == Some(color)).count()
    }
}
