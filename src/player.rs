use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Seat record handed to the builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeat {
    pub name: String,
    pub is_human: bool,
}

impl PlayerSeat {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
        }
    }

    pub fn cpu(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: false,
        }
    }
}

/// A seat at the table. Eliminated players keep their seat but are skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hand: Vec<Card>,
    is_human: bool,
    is_eliminated: bool,
}

impl Player {
    pub(crate) fn new(seat: PlayerSeat) -> Self {
        Self {
            name: seat.name,
            hand: Vec::new(),
            is_human: seat.is_human,
            is_eliminated: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn is_eliminated(&self) -> bool {
        self.is_eliminated
    }

    pub fn has_card(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.hand.iter().filter(|c| c.color == Some(color)).count()
    }

    pub(crate) fn take_card(&mut self, card: &Card) -> Option<Card> {
        let index = self.hand.iter().position(|c| c == card)?;
        Some(self.hand.remove(index))
    }

    pub(crate) fn receive(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn take_color(&mut self, color: Color) -> Vec<Card> {
        let (taken, kept): (Vec<Card>, Vec<Card>) = std::mem::take(&mut self.hand)
            .into_iter()
            .partition(|c| c.color == Some(color));
        self.hand = kept;
        taken
    }

    pub(crate) fn take_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    pub(crate) fn set_hand(&mut self, hand: Vec<Card>) {
        self.hand = hand;
    }

    /// Marks the player eliminated and hands back the cards they held.
    pub(crate) fn eliminate(&mut self) -> Vec<Card> {
        self.is_eliminated = true;
        self.take_hand()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardValue;

    #[test]
    fn take_card_removes_a_single_instance() {
        let mut player = Player::new(PlayerSeat::cpu("Ada"));
        let seven = Card::number(Color::Red, 7);
        player.receive(seven);
        player.receive(seven);
        assert_eq!(player.take_card(&seven), Some(seven));
        assert_eq!(player.hand_size(), 1);
        assert_eq!(player.take_card(&Card::number(Color::Blue, 7)), None);
    }

    #[test]
    fn take_color_skips_wilds() {
        let mut player = Player::new(PlayerSeat::cpu("Ada"));
        player.receive(Card::number(Color::Red, 1));
        player.receive(Card::wild(CardValue::Wild));
        player.receive(Card::action(Color::Red, CardValue::Skip));
        player.receive(Card::number(Color::Green, 1));
        let taken = player.take_color(Color::Red);
        assert_eq!(taken.len(), 2);
        assert_eq!(player.hand_size(), 2);
        assert_eq!(player.count_color(Color::Red), 0);
    }
}
