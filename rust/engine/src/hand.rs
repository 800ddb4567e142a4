use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerMove;

/// Card count at which a live hand wins outright.
pub const CHARLIE_CARDS: usize = 7;

/// An ordered run of cards plus the moves declared on it.
///
/// Every derived property is recomputed from the two sequences on each call;
/// nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    moves: Vec<PlayerMove>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            moves: Vec::new(),
        }
    }

    pub fn add_card(&mut self, card: Card) -> &mut Self {
        self.cards.push(card);
        self
    }

    pub fn add_cards<I: IntoIterator<Item = Card>>(&mut self, cards: I) -> &mut Self {
        self.cards.extend(cards);
        self
    }

    pub fn record_move(&mut self, mv: PlayerMove) -> &mut Self {
        self.moves.push(mv);
        self
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> &[PlayerMove] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Best total and whether an ace still counts as 11 after reduction.
    fn evaluate(&self) -> (u8, bool) {
        let mut total: u32 = self.cards.iter().map(|c| c.value() as u32).sum();
        let mut soft_aces = self.cards.iter().filter(|c| c.is_ace()).count();
        while total > 21 && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        (total.min(u8::MAX as u32) as u8, soft_aces > 0)
    }

    pub fn total(&self) -> u8 {
        self.evaluate().0
    }

    /// At least one ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        self.evaluate().1
    }

    pub fn has_ace(&self) -> bool {
        self.cards.iter().any(Card::is_ace)
    }

    pub fn is_busted(&self) -> bool {
        self.total() > 21
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].value() == self.cards[1].value()
    }

    pub fn is_charlie(&self) -> bool {
        self.cards.len() == CHARLIE_CARDS && self.total() <= 21
    }

    pub fn last_move(&self) -> Option<PlayerMove> {
        self.moves.last().copied()
    }

    pub fn is_doubled(&self) -> bool {
        self.moves.contains(&PlayerMove::Double)
    }

    pub fn is_surrendered(&self) -> bool {
        self.last_move() == Some(PlayerMove::Surrender)
    }

    /// Doubling needs exactly two cards and no earlier double.
    pub fn can_double(&self) -> bool {
        self.cards.len() == 2 && !self.is_doubled()
    }

    /// Total of the first two cards dealt to this hand.
    pub fn opening_total(&self) -> Option<u8> {
        if self.cards.len() < 2 {
            return None;
        }
        Some(Hand::from_cards(self.cards[..2].to_vec()).total())
    }

    pub fn count_weight(&self) -> i32 {
        self.cards.iter().map(Card::count_weight).sum()
    }

    pub(crate) fn detach_second(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }
}

/// Cards separated by spaces followed by the total, e.g. `10♥ A♠ (21)`.
/// The alternate flag is passed through to each card.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if f.alternate() {
                write!(f, "{:#}", c)?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, " ({})", self.total())
    }
}
