//! Scoring utilities for simulations.
//!
//! Current scoring rule (winner-only):
//!   points = sum of card points left in every opponent's hand
//! Numbers score face value, colored actions 20, wilds 50. Eliminated opponents hold
//! nothing and add nothing.

use crate::action::PlayerId;
use crate::card::Card;
use crate::game::Game;

pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(Card::points).sum()
}

/// Compute the winner's points for a finished game.
pub fn winner_points(game: &Game, winner: PlayerId) -> u32 {
    game.players()
        .iter()
        .enumerate()
        .filter(|(id, _)| *id != winner)
        .map(|(_, player)| hand_points(player.hand()))
        .sum()
}
