//! Deal command: plays a single round from a freshly shuffled shoe and prints
//! the full narrative, the final hands and the settlement.

use std::io::Write;

use hilo_ai::create_strategy;
use hilo_engine::engine::Engine;
use hilo_engine::logger::MemoryNarrative;
use hilo_engine::session::{DEFAULT_PACKS, DEFAULT_PENETRATION};

use crate::error::CliError;
use crate::formatters::supports_unicode;

/// Handle the deal command.
///
/// The same seed always deals the same round.
pub fn handle_deal_command(
    seed: Option<u64>,
    strategy: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let policy = create_strategy(strategy)?;
    let mut eng = Engine::with_seed(DEFAULT_PACKS, DEFAULT_PENETRATION, seed)?;
    eng.set_ascii_cards(!supports_unicode());

    let mut narrative = MemoryNarrative::new();
    let outcome = eng.play_round(policy.as_ref(), &mut narrative)?;

    writeln!(out, "Seed: {}", seed)?;
    for line in narrative.lines() {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "Settlement: {}", outcome.points)?;
    Ok(())
}
