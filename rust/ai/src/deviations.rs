//! Count-driven departures from the basic tables.

use hilo_engine::player::PlayerMove;
use hilo_engine::player::PlayerMove::{Double, Hit, Split, Stand};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Threshold {
    /// True count at or above the index
    AtLeast,
    /// True count at or below the index
    AtMost,
}

/// One rule: with `total` against `up_card`, play `action` once the true
/// count crosses `index` in the given direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Deviation {
    pub total: u8,
    pub up_card: u8,
    pub index: f64,
    pub direction: Threshold,
    pub action: PlayerMove,
}

impl Deviation {
    const fn at_least(total: u8, up_card: u8, index: f64, action: PlayerMove) -> Self {
        Self {
            total,
            up_card,
            index,
            direction: Threshold::AtLeast,
            action,
        }
    }

    const fn at_most(total: u8, up_card: u8, index: f64, action: PlayerMove) -> Self {
        Self {
            total,
            up_card,
            index,
            direction: Threshold::AtMost,
            action,
        }
    }

    pub fn matches(&self, total: u8, up_card: u8, true_count: f64) -> bool {
        if self.total != total || self.up_card != up_card {
            return false;
        }
        match self.direction {
            Threshold::AtLeast => true_count >= self.index,
            Threshold::AtMost => true_count <= self.index,
        }
    }
}

/// Checked in order; the first match wins. Up-card 11 is the ace.
///
/// Sixteen against ten stands on any positive count and twelve against four
/// hits on any negative one; zero itself never triggers a rule.
pub const DEVIATIONS: [Deviation; 17] = [
    Deviation::at_least(16, 10, 0.0, Stand),
    Deviation::at_least(16, 9, 8.0, Stand),
    Deviation::at_least(15, 10, 4.0, Stand),
    Deviation::at_least(12, 2, 3.0, Stand),
    Deviation::at_least(12, 3, 2.0, Stand),
    Deviation::at_most(12, 4, 0.0, Hit),
    Deviation::at_most(13, 2, -1.0, Hit),
    Deviation::at_most(13, 3, -1.0, Hit),
    Deviation::at_most(13, 4, -1.0, Hit),
    Deviation::at_most(13, 5, -1.0, Hit),
    Deviation::at_most(13, 6, -1.0, Hit),
    Deviation::at_least(10, 10, 4.0, Double),
    Deviation::at_least(10, 11, 4.0, Double),
    Deviation::at_least(9, 2, 1.0, Double),
    Deviation::at_least(9, 7, 3.0, Double),
    Deviation::at_least(20, 5, 5.0, Split),
    Deviation::at_least(20, 6, 4.0, Split),
];

/// First rule matching the situation. A true count of exactly zero is
/// neutral and never triggers a rule.
pub fn find(total: u8, up_card: u8, true_count: f64) -> Option<&'static Deviation> {
    if true_count == 0.0 {
        return None;
    }
    DEVIATIONS
        .iter()
        .find(|d| d.matches(total, up_card, true_count))
}
