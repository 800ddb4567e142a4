use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cards in one standard pack.
pub const CARDS_PER_PACK: usize = 52;

/// One of the four suits of a standard pack.
/// Suits are cosmetic: they never influence a card's value or count weight.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

/// The rank of a card from Two through Ace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Blackjack value of the rank. Aces count 11 here; the hand total
    /// demotes them to 1 as needed.
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    /// Hi-Lo count weight: low cards +1, neutral 7-9, ten-valued cards and aces -1.
    pub fn count_weight(self) -> i32 {
        match self {
            Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// A single playing card. Value and count weight derive from the rank only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card
    pub suit: Suit,
    /// The rank of the card
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn count_weight(&self) -> i32 {
        self.rank.count_weight()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl Suit {
    pub fn glyph(self) -> char {
        match self {
            Suit::Clubs => '\u{2663}',
            Suit::Diamonds => '\u{2666}',
            Suit::Hearts => '\u{2665}',
            Suit::Spades => '\u{2660}',
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// `{}` renders the suit glyph (`10♥`); `{:#}` falls back to an ASCII letter (`10h`).
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = if f.alternate() {
            self.suit.letter()
        } else {
            self.suit.glyph()
        };
        write!(f, "{}{}", self.rank.symbol(), suit)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_pack() -> Vec<Card> {
    let mut v = Vec::with_capacity(CARDS_PER_PACK);
    for &r in &all_ranks() {
        for &s in &all_suits() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_cards_are_worth_ten() {
        for r in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(r.value(), 10);
        }
        assert_eq!(Rank::Ace.value(), 11);
        assert_eq!(Rank::Seven.value(), 7);
    }

    #[test]
    fn suit_never_changes_value_or_weight() {
        for r in all_ranks() {
            let values: Vec<(u8, i32)> = all_suits()
                .into_iter()
                .map(|s| {
                    let c = Card::new(r, s);
                    (c.value(), c.count_weight())
                })
                .collect();
            assert!(values.windows(2).all(|w| w[0] == w[1]), "{:?}", r);
        }
    }

    #[test]
    fn hilo_weights_balance_over_a_pack() {
        let sum: i32 = full_pack().iter().map(Card::count_weight).sum();
        assert_eq!(sum, 0);
    }

    #[test]
    fn display_uses_glyph_or_ascii() {
        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "10\u{2665}");
        assert_eq!(format!("{:#}", c), "10h");
        assert_eq!(format!("{:#}", Card::new(Rank::Ace, Suit::Spades)), "As");
    }
}
