use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Zero-based seat index of a player within the game.
pub type PlayerId = usize;

/// Direction of play around the table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Seat offset: +1 clockwise, -1 counter-clockwise.
    pub fn step(&self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Effect left open by the last play that the driver has to resolve.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PendingEffect {
    /// A 7 was played; `player` picks a seat to swap hands with.
    SwapHands { player: PlayerId },
    /// Discard-all was played; `player` names the color to shed.
    DiscardAll { player: PlayerId },
    /// Color roulette was played; `target` draws until their chosen color shows up.
    ColorRoulette { target: PlayerId },
}

/// Decision available to a player on their turn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand. `color` names the new color for wild cards.
    Play { card: Card, color: Option<Color> },
    /// Resolve a pending 7 by swapping hands with another seat.
    SwapHands { with: PlayerId },
    /// Resolve a pending discard-all by shedding every card of a color.
    DiscardAll { color: Color },
    /// Take the accumulated draw penalty instead of stacking.
    AcceptPenalty,
    /// Draw until a playable card appears. Passes if none does.
    DrawUntilPlayable,
    /// Resolve a color roulette aimed at this player.
    SpinRoulette { color: Color },
}

impl Action {
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play { card, .. } => Some(*card),
            _ => None,
        }
    }
}
