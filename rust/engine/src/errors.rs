use std::fmt;

use thiserror::Error;

/// Why a split request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRejection {
    /// The player already holds two hands
    AlreadySplit,
    /// The two cards differ in blackjack value
    NotAPair,
    /// The hand holds more (or fewer) than two cards
    WrongCardCount(usize),
}

impl fmt::Display for SplitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitRejection::AlreadySplit => write!(f, "hand was already split"),
            SplitRejection::NotAPair => write!(f, "cards are not a pair"),
            SplitRejection::WrongCardCount(n) => write!(f, "hand holds {} cards", n),
        }
    }
}

/// Fatal invariant violations raised by the engine. Bust, surrender, charlie
/// and push are ordinary outcomes and never travel through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Shoe is empty")]
    EmptyShoe,
    #[error("No pairs table entry for pair total {total} against up-card {up_card}")]
    UnreachablePairShape { total: u8, up_card: u8 },
    #[error("Invalid split: {0}")]
    InvalidSplitState(SplitRejection),
    #[error("Strategy table {table} is incomplete: {detail}")]
    IncompleteTable { table: &'static str, detail: String },
    #[error("Invalid session parameters: {0}")]
    InvalidConfig(String),
}
