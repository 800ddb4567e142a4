use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_pack, Card, CARDS_PER_PACK};
use crate::errors::GameError;

/// Multi-pack shoe dealt from the front. Reshuffling always rebuilds every
/// pack, so between shuffles the shoe started from a whole number of packs.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    position: usize,
    packs: u8,
    penetration: usize,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Build and shuffle a shoe of `packs` packs that asks for a reshuffle once
    /// `penetration` cards have been dealt.
    pub fn new_with_seed(packs: u8, penetration: usize, seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            position: 0,
            packs,
            penetration,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        shoe.shuffle();
        shoe
    }

    /// A shoe whose first cards are `top` in that order, followed by the rest
    /// of the packs unshuffled. Used to replay exact scenarios.
    ///
    /// The shoe never exceeds `packs` full packs: when `top` repeats a card
    /// more often than the packs hold it, cards are cut from the bottom.
    pub fn stacked(packs: u8, penetration: usize, top: &[Card]) -> Self {
        let mut rest = Self::fresh_cards(packs);
        for c in top {
            if let Some(pos) = rest.iter().position(|r| r == c) {
                rest.remove(pos);
            }
        }
        let mut cards = top.to_vec();
        cards.extend(rest);
        cards.truncate(packs as usize * CARDS_PER_PACK);
        Self {
            cards,
            position: 0,
            packs,
            penetration,
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    fn fresh_cards(packs: u8) -> Vec<Card> {
        let mut v = Vec::with_capacity(packs as usize * CARDS_PER_PACK);
        for _ in 0..packs {
            v.extend(full_pack());
        }
        v
    }

    /// Discard everything and rebuild a full, freshly permuted shoe.
    pub fn shuffle(&mut self) {
        self.cards = Self::fresh_cards(self.packs);
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    /// True once at least `penetration` cards left the shoe since the last shuffle.
    pub fn should_reshuffle(&self) -> bool {
        self.position >= self.penetration
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        let card = self.cards.get(self.position).copied().ok_or_else(|| {
            tracing::error!(dealt = self.position, "deal attempted on an exhausted shoe");
            GameError::EmptyShoe
        })?;
        self.position += 1;
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn dealt(&self) -> usize {
        self.position
    }

    /// Packs left, rounded up.
    pub fn decks_remaining(&self) -> usize {
        self.remaining().div_ceil(CARDS_PER_PACK)
    }

    pub fn packs(&self) -> u8 {
        self.packs
    }

    pub fn penetration(&self) -> usize {
        self.penetration
    }
}
