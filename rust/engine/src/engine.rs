use crate::deck::Shoe;
use crate::errors::GameError;
use crate::game::Ledger;
use crate::hand::Hand;
use crate::logger::Narrative;
use crate::player::{Dealer, Player, PlayerMove};
use crate::rules::{dealer_must_draw, is_forced_surrender, validate_shoe};
use crate::settlement::{settle, Points};

/// Decision source consulted by the round engine for every player action
/// that is not forced by the table rules.
///
/// Implementations must be pure: the same inputs always give the same move.
/// `Split` is only legal when `can_split` is true, and `Double` only when
/// [`Hand::can_double`] holds.
pub trait PlayPolicy {
    fn name(&self) -> &str;

    fn decide(
        &self,
        hand: &Hand,
        up_card: u8,
        true_count: f64,
        can_split: bool,
    ) -> Result<PlayerMove, GameError>;
}

/// Everything a finished round produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub points: Points,
    /// Sum of count weights of every card dealt this round
    pub count_delta: i32,
    /// True count in effect for the opening decision
    pub true_count: f64,
    pub player_hands: Vec<Hand>,
    pub dealer_hand: Hand,
}

/// Plays single rounds of one-seat blackjack against the house.
///
/// # Examples
///
/// ```
/// use hilo_engine::engine::{Engine, PlayPolicy};
/// use hilo_engine::errors::GameError;
/// use hilo_engine::hand::Hand;
/// use hilo_engine::logger::NullNarrative;
/// use hilo_engine::player::PlayerMove;
///
/// struct AlwaysStand;
/// impl PlayPolicy for AlwaysStand {
///     fn name(&self) -> &str { "stand" }
///     fn decide(&self, _: &Hand, _: u8, _: f64, _: bool) -> Result<PlayerMove, GameError> {
///         Ok(PlayerMove::Stand)
///     }
/// }
///
/// let mut engine = Engine::with_seed(6, 204, 7).unwrap();
/// let outcome = engine.play_round(&AlwaysStand, &mut NullNarrative).unwrap();
/// assert_eq!(engine.ledger().running_count(), outcome.count_delta);
/// ```
#[derive(Debug)]
pub struct Engine {
    dealer: Dealer,
    player: Player,
    ledger: Ledger,
    ascii_cards: bool,
}

fn narrate(narrative: &mut dyn Narrative, text: impl FnOnce() -> String) {
    if narrative.enabled() {
        narrative.line(&text());
    }
}

impl Engine {
    pub fn new(shoe: Shoe) -> Self {
        Self {
            dealer: Dealer::new(shoe),
            player: Player::new(),
            ledger: Ledger::new(),
            ascii_cards: false,
        }
    }

    /// Validated, freshly shuffled shoe of `packs` packs.
    pub fn with_seed(packs: u8, penetration: usize, seed: u64) -> Result<Self, GameError> {
        validate_shoe(packs, penetration)?;
        Ok(Self::new(Shoe::new_with_seed(packs, penetration, seed)))
    }

    /// Render cards with ASCII suit letters in narrative lines.
    pub fn set_ascii_cards(&mut self, ascii: bool) {
        self.ascii_cards = ascii;
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn shoe(&self) -> &Shoe {
        self.dealer.shoe()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn true_count(&self) -> f64 {
        self.ledger.true_count(self.dealer.shoe().decks_remaining())
    }

    pub fn should_reshuffle(&self) -> bool {
        self.dealer.should_reshuffle()
    }

    /// Rebuild the shoe and forget the count. Only valid between rounds.
    pub fn reshuffle(&mut self) {
        tracing::debug!(
            dealt = self.dealer.shoe().dealt(),
            running_count = self.ledger.running_count(),
            "reshuffling shoe"
        );
        self.dealer.shuffle();
        self.ledger.reset();
    }

    fn show(&self, hand: &Hand) -> String {
        if self.ascii_cards {
            format!("{:#}", hand)
        } else {
            hand.to_string()
        }
    }

    fn up_value(&self) -> u8 {
        self.dealer.up_card().map(|c| c.value()).unwrap_or(0)
    }

    /// Deal, play and settle one round, then fold its cards into the count.
    pub fn play_round(
        &mut self,
        policy: &dyn PlayPolicy,
        narrative: &mut dyn Narrative,
    ) -> Result<RoundOutcome, GameError> {
        self.dealer.reset();
        self.player.reset();

        self.dealer.draw()?;
        self.dealer.deal_to(&mut self.player, 0)?;
        self.dealer.draw()?;
        self.dealer.deal_to(&mut self.player, 0)?;

        let up = self.up_value();
        let opening_tc = self.true_count();
        narrate(narrative, || {
            let up_card = self
                .dealer
                .up_card()
                .map(|c| {
                    if self.ascii_cards {
                        format!("{:#}", c)
                    } else {
                        c.to_string()
                    }
                })
                .unwrap_or_default();
            format!(
                "Dealt: player {} vs dealer up-card {}",
                self.show(self.player.hand(0)),
                up_card
            )
        });

        let opening = self.player.hand(0);
        if opening.is_pair() && opening.has_ace() {
            self.split_aces(narrative)?;
        } else if self.player.has_blackjack() || self.dealer.has_blackjack() {
            narrate(narrative, || "Blackjack on the table, no player action".into());
        } else if is_forced_surrender(opening, up) {
            narrate(narrative, || "Surrender - player gives up half a point".into());
            self.player.hand_mut(0).record_move(PlayerMove::Surrender);
        } else {
            let mv = policy.decide(opening, up, opening_tc, true)?;
            self.player.hand_mut(0).record_move(mv);
            match mv {
                PlayerMove::Double => {
                    narrate(narrative, || "Double down - one more card".into());
                    self.dealer.deal_to(&mut self.player, 0)?;
                }
                PlayerMove::Hit => self.hit_until_done(policy, narrative)?,
                PlayerMove::Split => {
                    narrate(narrative, || "Split - playing two hands".into());
                    self.play_split(policy, narrative)?;
                }
                PlayerMove::Stand => narrate(narrative, || "Player stands".into()),
                PlayerMove::Surrender => {
                    narrate(narrative, || "Surrender - player gives up half a point".into())
                }
            }
        }

        self.dealer_turn(narrative)?;

        let points = settle(&self.player, self.dealer.hand());
        let count_delta = self.dealer.hand().count_weight()
            + self
                .player
                .hands()
                .iter()
                .map(Hand::count_weight)
                .sum::<i32>();
        let previous = self.ledger.running_count();
        self.ledger.settle_round(count_delta);

        narrate(narrative, || {
            format!("Dealer hand: {}", self.show(self.dealer.hand()))
        });
        for hand in self.player.hands() {
            narrate(narrative, || {
                let moves: Vec<&str> = hand.moves().iter().map(PlayerMove::as_str).collect();
                format!("Player hand: {} [{}]", self.show(hand), moves.join(", "))
            });
        }
        narrate(narrative, || format!("Player points: {}", points));
        narrate(narrative, || {
            format!(
                "Count: previous {} running {} rounds {} true {:.2} decks {}",
                previous,
                self.ledger.running_count(),
                self.ledger.rounds_since_shuffle(),
                self.true_count(),
                self.dealer.shoe().decks_remaining()
            )
        });

        Ok(RoundOutcome {
            points,
            count_delta,
            true_count: opening_tc,
            player_hands: self.player.hands().to_vec(),
            dealer_hand: self.dealer.hand().clone(),
        })
    }

    fn split_aces(&mut self, narrative: &mut dyn Narrative) -> Result<(), GameError> {
        narrate(narrative, || "Aces split - one card each".into());
        self.player.hand_mut(0).record_move(PlayerMove::Split);
        self.player.split()?;
        self.dealer.deal_to(&mut self.player, 0)?;
        self.dealer.deal_to(&mut self.player, 1)?;
        Ok(())
    }

    /// Opening hand hit: keep drawing until the policy stops, the hand busts,
    /// or it reaches a charlie.
    fn hit_until_done(
        &mut self,
        policy: &dyn PlayPolicy,
        narrative: &mut dyn Narrative,
    ) -> Result<(), GameError> {
        let up = self.up_value();
        loop {
            narrate(narrative, || "Hit - one more card".into());
            self.dealer.deal_to(&mut self.player, 0)?;
            let hand = self.player.hand(0);
            if hand.is_charlie() {
                narrate(narrative, || "Charlie - seven cards without busting".into());
                return Ok(());
            }
            if hand.is_busted() {
                return Ok(());
            }
            let mv = policy.decide(hand, up, self.true_count(), false)?;
            self.player.hand_mut(0).record_move(mv);
            match mv {
                PlayerMove::Hit => continue,
                PlayerMove::Double => {
                    self.dealer.deal_to(&mut self.player, 0)?;
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }
    }

    fn play_split(
        &mut self,
        policy: &dyn PlayPolicy,
        narrative: &mut dyn Narrative,
    ) -> Result<(), GameError> {
        let up = self.up_value();
        self.player.split()?;
        for id in 0..2 {
            self.dealer.deal_to(&mut self.player, id)?;
            loop {
                let hand = self.player.hand(id);
                if hand.is_busted() || hand.is_charlie() {
                    break;
                }
                let mv = policy.decide(hand, up, self.true_count(), false)?;
                self.player.hand_mut(id).record_move(mv);
                narrate(narrative, || format!("Split hand {}: {}", id + 1, mv.as_str()));
                match mv {
                    PlayerMove::Stand | PlayerMove::Surrender => break,
                    PlayerMove::Double => {
                        self.dealer.deal_to(&mut self.player, id)?;
                        break;
                    }
                    PlayerMove::Hit | PlayerMove::Split => {
                        self.dealer.deal_to(&mut self.player, id)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn dealer_turn(&mut self, narrative: &mut dyn Narrative) -> Result<(), GameError> {
        let hands_closed = self
            .player
            .hands()
            .iter()
            .all(|h| h.is_busted() || h.is_surrendered());
        if hands_closed || self.player.has_blackjack() || self.dealer.has_blackjack() {
            return Ok(());
        }
        while dealer_must_draw(self.dealer.hand()) {
            narrate(narrative, || "Dealer draws".into());
            self.dealer.draw()?;
        }
        Ok(())
    }
}
