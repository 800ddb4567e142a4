/// Running-count bookkeeping carried across rounds until the next shuffle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    /// Sum of count weights of every card settled since the last shuffle
    running_count: i32,
    /// Rounds settled since the last shuffle
    rounds_since_shuffle: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    pub fn rounds_since_shuffle(&self) -> u64 {
        self.rounds_since_shuffle
    }

    /// Running count per remaining deck. Zero during the first round after a
    /// shuffle, and zero when no deck remains.
    pub fn true_count(&self, decks_remaining: usize) -> f64 {
        if decks_remaining == 0 || self.rounds_since_shuffle == 0 {
            return 0.0;
        }
        self.running_count as f64 / decks_remaining as f64
    }

    /// Fold one settled round into the ledger.
    pub fn settle_round(&mut self, count_delta: i32) {
        self.running_count += count_delta;
        self.rounds_since_shuffle += 1;
    }

    pub fn reset(&mut self) {
        self.running_count = 0;
        self.rounds_since_shuffle = 0;
    }
}
