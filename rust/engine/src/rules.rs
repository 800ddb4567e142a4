use crate::cards::CARDS_PER_PACK;
use crate::errors::GameError;
use crate::hand::Hand;

/// The dealer draws while below this total, soft or hard.
pub const DEALER_STANDS_ON: u8 = 17;

/// Upper bound on cards one round can consume: two seven-card split hands
/// plus a dealer who draws seventeen one-point cards.
pub const MAX_CARDS_PER_ROUND: usize = 32;

/// Whether the opening hand must surrender before any strategy lookup.
///
/// Only hands with no pair and no ace qualify: hard 16 against 9, 10 or an
/// ace, and hard 15 against a ten.
///
/// # Examples
///
/// ```
/// use hilo_engine::cards::{Card, Rank, Suit};
/// use hilo_engine::hand::Hand;
/// use hilo_engine::rules::is_forced_surrender;
///
/// let h = Hand::from_cards(vec![
///     Card::new(Rank::Ten, Suit::Clubs),
///     Card::new(Rank::Six, Suit::Hearts),
/// ]);
/// assert!(is_forced_surrender(&h, 10));
/// assert!(!is_forced_surrender(&h, 8));
/// ```
pub fn is_forced_surrender(hand: &Hand, up_card: u8) -> bool {
    if hand.is_pair() || hand.has_ace() {
        return false;
    }
    let total = hand.total();
    (total == 16 && matches!(up_card, 9..=11)) || (total == 15 && up_card == 10)
}

pub fn dealer_must_draw(hand: &Hand) -> bool {
    hand.total() < DEALER_STANDS_ON
}

/// Rejects shoe parameters under which a round could run the shoe dry.
///
/// Penetration is only checked between rounds, so the cards left at the
/// threshold must cover the largest possible round.
pub fn validate_shoe(packs: u8, penetration: usize) -> Result<(), GameError> {
    if packs == 0 {
        return Err(GameError::InvalidConfig("packs must be >= 1".into()));
    }
    if penetration == 0 {
        return Err(GameError::InvalidConfig("penetration must be >= 1".into()));
    }
    let capacity = packs as usize * CARDS_PER_PACK;
    if penetration + MAX_CARDS_PER_ROUND > capacity {
        return Err(GameError::InvalidConfig(format!(
            "penetration {} leaves fewer than {} of {} cards for the last round",
            penetration, MAX_CARDS_PER_ROUND, capacity
        )));
    }
    Ok(())
}
