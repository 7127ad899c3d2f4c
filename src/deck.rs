use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Draw pile. The live end is the back of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Pops one card, or `None` when exhausted. Refilling from the discard pile is the
    /// caller's job.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Places a card so it is drawn last.
    pub fn put_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::card::{Color, DeckVariant, full_deck};

    #[test]
    fn draws_from_the_back() {
        let mut deck = Deck::new(vec![Card::number(Color::Red, 1), Card::number(Color::Red, 2)]);
        assert_eq!(deck.draw(), Some(Card::number(Color::Red, 2)));
        assert_eq!(deck.draw(), Some(Card::number(Color::Red, 1)));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn put_bottom_is_drawn_last() {
        let mut deck = Deck::new(vec![Card::number(Color::Blue, 3)]);
        deck.put_bottom(Card::number(Color::Blue, 9));
        assert_eq!(deck.draw(), Some(Card::number(Color::Blue, 3)));
        assert_eq!(deck.draw(), Some(Card::number(Color::Blue, 9)));
    }

    #[test]
    fn shuffle_is_seeded_and_keeps_cards() {
        let mut a = Deck::new(full_deck(DeckVariant::Standard));
        let mut b = Deck::new(full_deck(DeckVariant::Standard));
        a.shuffle(&mut StdRng::seed_from_u64(7));
        b.shuffle(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        let mut sorted_a: Vec<String> = a.cards().iter().map(|c| format!("{c:?}")).collect();
        let mut sorted_full: Vec<String> = full_deck(DeckVariant::Standard)
            .iter()
            .map(|c| format!("{c:?}"))
            .collect();
        sorted_a.sort();
        sorted_full.sort();
        assert_eq!(sorted_a, sorted_full);
    }
}
