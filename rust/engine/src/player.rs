use crate::cards::Card;
use crate::deck::Shoe;
use crate::errors::{GameError, SplitRejection};
use crate::hand::Hand;
use serde::{Deserialize, Serialize};

/// A move declared on a hand. Also the action vocabulary of the strategy engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerMove {
    /// Take one more card
    Hit,
    /// Keep the current total
    Stand,
    /// Take exactly one more card at double stake
    Double,
    /// Divide a pair into two hands
    Split,
    /// Give up half the stake
    Surrender,
}

impl PlayerMove {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerMove::Hit => "hit",
            PlayerMove::Stand => "stand",
            PlayerMove::Double => "double",
            PlayerMove::Split => "split",
            PlayerMove::Surrender => "surrender",
        }
    }
}

/// The single seat at the table: one hand, or two after a split.
#[derive(Debug, Clone, Default)]
pub struct Player {
    hands: Vec<Hand>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            hands: vec![Hand::new()],
        }
    }

    pub fn reset(&mut self) {
        self.hands = vec![Hand::new()];
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, id: usize) -> &Hand {
        &self.hands[id.min(self.hands.len() - 1)]
    }

    pub fn hand_mut(&mut self, id: usize) -> &mut Hand {
        let last = self.hands.len() - 1;
        &mut self.hands[id.min(last)]
    }

    pub fn is_split(&self) -> bool {
        self.hands.len() == 2
    }

    /// A natural only counts on the unsplit opening hand.
    pub fn has_blackjack(&self) -> bool {
        self.hands.len() == 1 && self.hands[0].is_blackjack()
    }

    /// Move the second card of the opening pair into a new hand.
    pub fn split(&mut self) -> Result<(), GameError> {
        if self.is_split() {
            return Err(GameError::InvalidSplitState(SplitRejection::AlreadySplit));
        }
        let first = &mut self.hands[0];
        if first.len() != 2 {
            return Err(GameError::InvalidSplitState(
                SplitRejection::WrongCardCount(first.len()),
            ));
        }
        if !first.is_pair() {
            return Err(GameError::InvalidSplitState(SplitRejection::NotAPair));
        }
        let detached = first
            .detach_second()
            .ok_or(GameError::InvalidSplitState(SplitRejection::WrongCardCount(1)))?;
        let mut second = Hand::from_cards(vec![detached]);
        second.record_move(PlayerMove::Split);
        self.hands.push(second);
        Ok(())
    }
}

/// The house: one hand plus exclusive ownership of the shoe.
#[derive(Debug)]
pub struct Dealer {
    hand: Hand,
    shoe: Shoe,
}

impl Dealer {
    pub fn new(shoe: Shoe) -> Self {
        Self {
            hand: Hand::new(),
            shoe,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Up-card is the first card the dealer gave itself.
    pub fn up_card(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    pub fn hole_card(&self) -> Option<Card> {
        self.hand.cards().get(1).copied()
    }

    pub fn has_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    pub fn reset(&mut self) {
        self.hand = Hand::new();
    }

    pub fn shuffle(&mut self) {
        self.shoe.shuffle();
    }

    pub fn should_reshuffle(&self) -> bool {
        self.shoe.should_reshuffle()
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = self.shoe.deal()?;
        self.hand.add_card(card);
        Ok(card)
    }

    pub fn deal_to(&mut self, player: &mut Player, hand_id: usize) -> Result<Card, GameError> {
        let card = self.shoe.deal()?;
        player.hand_mut(hand_id).add_card(card);
        Ok(card)
    }
}
