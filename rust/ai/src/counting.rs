//! Hi-Lo counting player: count deviations first, then the shape tables.

use hilo_engine::engine::PlayPolicy;
use hilo_engine::errors::GameError;
use hilo_engine::hand::Hand;
use hilo_engine::player::PlayerMove;

use crate::deviations;
use crate::tables::StrategyTables;

/// Strategy engine used by the simulator.
///
/// Pure: it keeps no state between calls, so the same hand, up-card, true
/// count and split eligibility always give the same move.
///
/// # Example
///
/// ```rust
/// use hilo_ai::counting::CountingStrategy;
/// use hilo_engine::cards::{Card, Rank, Suit};
/// use hilo_engine::engine::PlayPolicy;
/// use hilo_engine::hand::Hand;
/// use hilo_engine::player::PlayerMove;
///
/// let strategy = CountingStrategy::new().unwrap();
/// let hand = Hand::from_cards(vec![
///     Card::new(Rank::Ten, Suit::Clubs),
///     Card::new(Rank::Six, Suit::Hearts),
/// ]);
/// assert_eq!(strategy.decide(&hand, 10, 0.0, true).unwrap(), PlayerMove::Hit);
/// assert_eq!(strategy.decide(&hand, 10, 1.0, true).unwrap(), PlayerMove::Stand);
/// ```
#[derive(Debug, Clone)]
pub struct CountingStrategy {
    tables: StrategyTables,
    deviations: bool,
    name: &'static str,
}

impl CountingStrategy {
    /// Tables plus count deviations.
    pub fn new() -> Result<Self, GameError> {
        Ok(Self {
            tables: StrategyTables::standard()?,
            deviations: true,
            name: "hilo",
        })
    }

    /// Tables only; the true count is ignored.
    pub fn basic() -> Result<Self, GameError> {
        Ok(Self {
            tables: StrategyTables::standard()?,
            deviations: false,
            name: "basic",
        })
    }

    fn deviation(
        &self,
        hand: &Hand,
        up_card: u8,
        true_count: f64,
        can_split: bool,
    ) -> Option<PlayerMove> {
        if !self.deviations {
            return None;
        }
        let rule = deviations::find(hand.total(), up_card, true_count)?;
        match rule.action {
            PlayerMove::Split if !(can_split && hand.is_pair()) => None,
            PlayerMove::Double if !hand.can_double() => Some(PlayerMove::Hit),
            action => Some(action),
        }
    }
}

impl PlayPolicy for CountingStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn decide(
        &self,
        hand: &Hand,
        up_card: u8,
        true_count: f64,
        can_split: bool,
    ) -> Result<PlayerMove, GameError> {
        if let Some(action) = self.deviation(hand, up_card, true_count, can_split) {
            return Ok(action);
        }
        if hand.is_pair() && can_split {
            self.tables.pair_move(hand, up_card)
        } else if hand.is_soft() && hand.total() < 21 {
            self.tables.soft_move(hand, up_card)
        } else {
            self.tables.hard_move(hand, up_card)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilo_engine::cards::{Card, Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect())
    }

    #[test]
    fn split_deviation_needs_split_eligibility() {
        let s = CountingStrategy::new().unwrap();
        let tens = hand(&[Rank::King, Rank::Queen]);
        assert_eq!(s.decide(&tens, 6, 4.0, true).unwrap(), PlayerMove::Split);
        // discarded match falls through to the hard table
        assert_eq!(s.decide(&tens, 6, 4.0, false).unwrap(), PlayerMove::Stand);
        let not_pair = hand(&[Rank::King, Rank::Ace]);
        assert_ne!(s.decide(&not_pair, 6, 4.0, true).unwrap(), PlayerMove::Split);
    }

    #[test]
    fn double_deviation_downgrades_on_three_cards() {
        let s = CountingStrategy::new().unwrap();
        let ten = hand(&[Rank::Four, Rank::Two, Rank::Four]);
        assert_eq!(s.decide(&ten, 10, 5.0, false).unwrap(), PlayerMove::Hit);
        let two_card = hand(&[Rank::Six, Rank::Four]);
        assert_eq!(s.decide(&two_card, 10, 5.0, false).unwrap(), PlayerMove::Double);
        assert_eq!(s.decide(&two_card, 10, 0.0, false).unwrap(), PlayerMove::Hit);
    }

    #[test]
    fn basic_ignores_count() {
        let s = CountingStrategy::basic().unwrap();
        let sixteen = hand(&[Rank::Ten, Rank::Six]);
        assert_eq!(s.decide(&sixteen, 10, 6.0, true).unwrap(), PlayerMove::Hit);
        assert_eq!(s.name(), "basic");
    }

    #[test]
    fn soft_twenty_one_uses_hard_table() {
        let s = CountingStrategy::new().unwrap();
        let h = hand(&[Rank::Ace, Rank::Five, Rank::Five]);
        assert!(h.is_soft());
        assert_eq!(s.decide(&h, 7, 0.0, false).unwrap(), PlayerMove::Stand);
    }

    #[test]
    fn negative_count_hits_twelve_against_four() {
        let s = CountingStrategy::new().unwrap();
        let twelve = hand(&[Rank::Ten, Rank::Two]);
        assert_eq!(s.decide(&twelve, 4, 0.5, true).unwrap(), PlayerMove::Stand);
        assert_eq!(s.decide(&twelve, 4, -0.5, true).unwrap(), PlayerMove::Hit);
    }
}
