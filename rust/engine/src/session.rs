//! Session loop: plays shoes back to back until the round budget is spent.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::deck::Shoe;
use crate::engine::{Engine, PlayPolicy};
use crate::errors::GameError;
use crate::logger::{Narrative, RoundRecord};
use crate::rules::validate_shoe;
use crate::settlement::Points;

pub const DEFAULT_PACKS: u8 = 6;
pub const DEFAULT_PENETRATION: usize = 204;
pub const DEFAULT_ROUNDS: u64 = 2_000;

/// Parameters fixed at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub packs: u8,
    /// Cards dealt before the shoe asks for a reshuffle
    pub penetration: usize,
    /// Round budget for the whole session
    pub rounds: u64,
    /// Shoe seed; `None` draws one at random
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            packs: DEFAULT_PACKS,
            penetration: DEFAULT_PENETRATION,
            rounds: DEFAULT_ROUNDS,
            seed: None,
        }
    }
}

/// Occurrence count per settlement value, ordered by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    counts: BTreeMap<Points, u64>,
    rounds: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, points: Points) {
        *self.counts.entry(points).or_insert(0) += 1;
        self.rounds += 1;
    }

    pub fn get(&self, points: Points) -> u64 {
        self.counts.get(&points).copied().unwrap_or(0)
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn is_empty(&self) -> bool {
        self.rounds == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Points, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    /// Net points over the session.
    pub fn net(&self) -> f64 {
        self.iter().map(|(k, v)| k.as_f64() * v as f64).sum()
    }
}

/// Shared flag that ends a session after the round in flight.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub rounds: u64,
    pub shoes: u64,
    pub seed: u64,
    /// Ended by the stop handle before the budget was spent
    pub stopped: bool,
    pub net: f64,
}

pub struct Session {
    engine: Engine,
    policy: Box<dyn PlayPolicy>,
    budget: u64,
    seed: u64,
    tally: Tally,
    shoes: u64,
    stop: StopHandle,
}

impl Session {
    pub fn new(config: SessionConfig, policy: Box<dyn PlayPolicy>) -> Result<Self, GameError> {
        validate_shoe(config.packs, config.penetration)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let engine = Engine::new(Shoe::new_with_seed(config.packs, config.penetration, seed));
        Self::build(engine, config.rounds, seed, policy)
    }

    /// Session over a prepared shoe, e.g. one stacked for a known scenario.
    pub fn with_shoe(
        shoe: Shoe,
        rounds: u64,
        policy: Box<dyn PlayPolicy>,
    ) -> Result<Self, GameError> {
        validate_shoe(shoe.packs(), shoe.penetration())?;
        Self::build(Engine::new(shoe), rounds, 0, policy)
    }

    fn build(
        engine: Engine,
        rounds: u64,
        seed: u64,
        policy: Box<dyn PlayPolicy>,
    ) -> Result<Self, GameError> {
        if rounds == 0 {
            return Err(GameError::InvalidConfig("rounds must be >= 1".into()));
        }
        Ok(Self {
            engine,
            policy,
            budget: rounds,
            seed,
            tally: Tally::new(),
            shoes: 1,
            stop: StopHandle::default(),
        })
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rounds_played(&self) -> u64 {
        self.tally.rounds()
    }

    pub fn shoes(&self) -> u64 {
        self.shoes
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_played() >= self.budget || self.stop.is_stopped()
    }

    /// Play the next round, reshuffling first if the shoe is spent.
    /// Returns `None` once the budget is used up or a stop was requested.
    pub fn play_round(
        &mut self,
        narrative: &mut dyn Narrative,
    ) -> Result<Option<RoundRecord>, GameError> {
        if self.is_finished() {
            return Ok(None);
        }
        if self.engine.should_reshuffle() {
            self.engine.reshuffle();
            self.shoes += 1;
        }
        let round = self.rounds_played() + 1;
        if narrative.enabled() {
            narrative.line(&format!("Round {} (shoe {})", round, self.shoes));
        }
        let outcome = self.engine.play_round(self.policy.as_ref(), narrative)?;
        self.tally.record(outcome.points);
        Ok(Some(RoundRecord {
            round,
            shoe: self.shoes,
            player_hands: outcome.player_hands,
            dealer_hand: outcome.dealer_hand,
            outcome: outcome.points,
            count_delta: outcome.count_delta,
            running_count: self.engine.ledger().running_count(),
            true_count: outcome.true_count,
            ts: None,
        }))
    }

    /// Run to completion, handing every settled round to `on_round`.
    pub fn run<E, F>(
        &mut self,
        narrative: &mut dyn Narrative,
        mut on_round: F,
    ) -> Result<SessionSummary, E>
    where
        E: From<GameError>,
        F: FnMut(&RoundRecord) -> Result<(), E>,
    {
        tracing::info!(
            budget = self.budget,
            seed = self.seed,
            policy = self.policy.name(),
            "session started"
        );
        while let Some(record) = self.play_round(narrative)? {
            on_round(&record)?;
        }
        let summary = self.summary();
        tracing::info!(
            rounds = summary.rounds,
            shoes = summary.shoes,
            stopped = summary.stopped,
            "session finished"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            rounds: self.rounds_played(),
            shoes: self.shoes,
            seed: self.seed,
            stopped: self.stop.is_stopped() && self.rounds_played() < self.budget,
            net: self.tally.net(),
        }
    }
}
