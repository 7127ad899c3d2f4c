use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four suit colors. Wild cards have no color of their own.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rank or effect printed on a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardValue {
    /// Numbered card between 0 and 9.
    Number(u8),
    Skip,
    SkipEveryone,
    Reverse,
    DrawTwo,
    DiscardAll,
    Wild,
    WildDrawSix,
    WildDrawTen,
    WildReverseDrawFour,
    /// Next player draws until they reveal the color they name.
    WildColorRoulette,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number,
    Action,
    Wild,
}

/// Which cards go into a freshly built deck.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeckVariant {
    /// 108 cards: the classic colored set plus the draw-six/draw-ten/reverse-draw-four wilds.
    #[default]
    Standard,
    /// Standard plus skip-everyone, discard-all and color-roulette cards.
    NoMercy,
}

/// Immutable card value. Equality is structural.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Option<Color>,
    pub value: CardValue,
}

pub const HAND_SIZE: usize = 7;
pub const MERCY_LIMIT: usize = 25;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const STANDARD_DECK_SIZE: usize = 108;
pub const NO_MERCY_DECK_SIZE: usize = 128;

impl Card {
    pub const fn number(color: Color, value: u8) -> Self {
        Self {
            color: Some(color),
            value: CardValue::Number(value),
        }
    }

    /// Colored action card (skip, reverse, draw two, ...).
    pub const fn action(color: Color, value: CardValue) -> Self {
        Self {
            color: Some(color),
            value,
        }
    }

    pub const fn wild(value: CardValue) -> Self {
        Self { color: None, value }
    }

    pub fn kind(&self) -> CardKind {
        match self.value {
            CardValue::Number(_) => CardKind::Number,
            CardValue::Skip
            | CardValue::SkipEveryone
            | CardValue::Reverse
            | CardValue::DrawTwo
            | CardValue::DiscardAll => CardKind::Action,
            CardValue::Wild
            | CardValue::WildDrawSix
            | CardValue::WildDrawTen
            | CardValue::WildReverseDrawFour
            | CardValue::WildColorRoulette => CardKind::Wild,
        }
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.kind() == CardKind::Wild
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        self.kind() == CardKind::Number
    }

    /// Penalty this card adds to a draw stack.
    pub fn draw_value(&self) -> u32 {
        match self.value {
            CardValue::DrawTwo => 2,
            CardValue::WildReverseDrawFour => 4,
            CardValue::WildDrawSix => 6,
            CardValue::WildDrawTen => 10,
            _ => 0,
        }
    }

    /// Whether the card may be played onto an active draw stack. Color roulette never is.
    #[inline]
    pub fn is_stackable(&self) -> bool {
        self.draw_value() > 0
    }

    /// Points the card is worth in an opponent's hand at the end of a game.
    pub fn points(&self) -> u32 {
        match self.kind() {
            CardKind::Number => match self.value {
                CardValue::Number(v) => v as u32,
                _ => 0,
            },
            CardKind::Action => 20,
            CardKind::Wild => 50,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.value {
            CardValue::Number(v) => return write_colored(f, self.color, &v.to_string()),
            CardValue::Skip => "skip",
            CardValue::SkipEveryone => "skip everyone",
            CardValue::Reverse => "reverse",
            CardValue::DrawTwo => "+2",
            CardValue::DiscardAll => "discard all",
            CardValue::Wild => "wild",
            CardValue::WildDrawSix => "wild +6",
            CardValue::WildDrawTen => "wild +10",
            CardValue::WildReverseDrawFour => "wild reverse +4",
            CardValue::WildColorRoulette => "wild color roulette",
        };
        write_colored(f, self.color, label)
    }
}

fn write_colored(f: &mut fmt::Formatter<'_>, color: Option<Color>, label: &str) -> fmt::Result {
    match color {
        Some(color) => write!(f, "{color} {label}"),
        None => f.write_str(label),
    }
}

/// Builds the full deck for a variant in deterministic order (unshuffled).
pub fn full_deck(variant: DeckVariant) -> Vec<Card> {
    let capacity = match variant {
        DeckVariant::Standard => STANDARD_DECK_SIZE,
        DeckVariant::NoMercy => NO_MERCY_DECK_SIZE,
    };
    let mut deck = Vec::with_capacity(capacity);
    for color in Color::ALL {
        deck.push(Card::number(color, 0));
        for value in 1..=9 {
            deck.push(Card::number(color, value));
            deck.push(Card::number(color, value));
        }
        for value in [CardValue::Skip, CardValue::Reverse, CardValue::DrawTwo] {
            deck.push(Card::action(color, value));
            deck.push(Card::action(color, value));
        }
        if variant == DeckVariant::NoMercy {
            for value in [CardValue::SkipEveryone, CardValue::DiscardAll] {
                deck.push(Card::action(color, value));
                deck.push(Card::action(color, value));
            }
        }
    }
    for value in [
        CardValue::Wild,
        CardValue::WildDrawSix,
        CardValue::WildDrawTen,
        CardValue::WildReverseDrawFour,
    ] {
        deck.push(Card::wild(value));
        deck.push(Card::wild(value));
    }
    if variant == DeckVariant::NoMercy {
        deck.extend(std::iter::repeat(Card::wild(CardValue::WildColorRoulette)).take(4));
    }
    deck
}
