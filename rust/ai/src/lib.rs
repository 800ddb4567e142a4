//! # hilo-ai: Strategy Engine for the Blackjack Simulator
//!
//! Decides every unforced player action. Decisions come from a fixed list of
//! true-count deviations, then from hard, soft and pairs lookup tables.
//!
//! ## Core Components
//!
//! - [`counting`] - [`counting::CountingStrategy`], the [`PlayPolicy`] implementation
//! - [`deviations`] - Count-deviation rules
//! - [`tables`] - Basic-strategy tables with construction-time completeness checks
//! - [`create_strategy`] - Factory by name
//!
//! ## Quick Start
//!
//! ```rust
//! use hilo_ai::create_strategy;
//! use hilo_engine::engine::Engine;
//! use hilo_engine::logger::NullNarrative;
//!
//! let strategy = create_strategy("hilo").unwrap();
//! let mut engine = Engine::with_seed(6, 204, 42).unwrap();
//! let outcome = engine.play_round(strategy.as_ref(), &mut NullNarrative).unwrap();
//! println!("round settled at {}", outcome.points);
//! ```
//!
//! ## Strategy Names
//!
//! - `"hilo"` - tables plus count deviations
//! - `"basic"` - tables only

use hilo_engine::engine::PlayPolicy;
use hilo_engine::errors::GameError;

pub mod counting;
pub mod deviations;
pub mod tables;

pub const STRATEGY_NAMES: [&str; 2] = ["hilo", "basic"];

/// Build a strategy by name.
///
/// ```rust
/// use hilo_ai::create_strategy;
///
/// assert_eq!(create_strategy("hilo").unwrap().name(), "hilo");
/// assert!(create_strategy("martingale").is_err());
/// ```
pub fn create_strategy(name: &str) -> Result<Box<dyn PlayPolicy>, GameError> {
    match name {
        "hilo" => Ok(Box::new(counting::CountingStrategy::new()?)),
        "basic" => Ok(Box::new(counting::CountingStrategy::basic()?)),
        other => Err(GameError::InvalidConfig(format!(
            "unknown strategy '{}' (expected one of: {})",
            other,
            STRATEGY_NAMES.join(", ")
        ))),
    }
}
