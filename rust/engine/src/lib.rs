//! # hilo-engine: Blackjack Card-Counting Simulator Core
//!
//! Single-seat blackjack against the house, played from a multi-pack shoe
//! while a Hi-Lo running count is kept. The engine deals, asks a
//! [`engine::PlayPolicy`] for decisions, plays the dealer by the fixed
//! stand-on-17 rule and settles each round into a point value.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and Hi-Lo weights
//! - [`deck`] - Seeded multi-pack shoe with penetration tracking
//! - [`hand`] - Hand totals, soft/pair/blackjack/charlie properties
//! - [`player`] - Player seat, dealer and the move vocabulary
//! - [`rules`] - Table rules: forced surrender, dealer drawing, shoe limits
//! - [`game`] - Running count ledger and true count
//! - [`engine`] - Round state machine
//! - [`settlement`] - Point outcome of a finished round
//! - [`session`] - Session loop, tally and stop handle
//! - [`logger`] - Narrative sinks and JSONL round records
//! - [`errors`] - Error types for fatal invariant violations
//!
//! ## Quick Start
//!
//! ```rust
//! use hilo_engine::cards::{Card, Rank, Suit};
//! use hilo_engine::hand::Hand;
//!
//! let hand = Hand::from_cards(vec![
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Spades),
//! ]);
//! assert!(hand.is_blackjack());
//! assert_eq!(hand.total(), 21);
//! ```
//!
//! ## Deterministic Shoes
//!
//! ```rust
//! use hilo_engine::deck::Shoe;
//!
//! let mut a = Shoe::new_with_seed(6, 204, 42);
//! let mut b = Shoe::new_with_seed(6, 204, 42);
//! assert_eq!(a.deal().unwrap(), b.deal().unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod session;
pub mod settlement;
