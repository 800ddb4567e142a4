//! Basic-strategy lookup tables keyed by hand total and dealer up-card.
//!
//! Each row lists one code per up-card from 2 through ace:
//!
//! | code | meaning |
//! |------|---------|
//! | `H`  | hit |
//! | `S`  | stand |
//! | `P`  | split |
//! | `D`  | double, or hit when doubling is not allowed |
//! | `Ds` | double, or stand when doubling is not allowed |

use std::collections::BTreeMap;

use hilo_engine::errors::GameError;
use hilo_engine::hand::Hand;
use hilo_engine::player::PlayerMove;

/// Lowest and highest dealer up-card values; an ace counts 11.
pub const UP_CARD_MIN: u8 = 2;
pub const UP_CARD_MAX: u8 = 11;
const COLUMNS: usize = (UP_CARD_MAX - UP_CARD_MIN + 1) as usize;

const HARD_ROWS: &str = "
    9   H  D  D  D  D  H  H  H  H  H
    10  D  D  D  D  D  D  D  D  H  H
    11  D  D  D  D  D  D  D  D  D  D
    12  H  H  S  S  S  H  H  H  H  H
    13  S  S  S  S  S  H  H  H  H  H
    14  S  S  S  S  S  H  H  H  H  H
    15  S  S  S  S  S  H  H  H  H  H
    16  S  S  S  S  S  H  H  H  H  H
";

const SOFT_ROWS: &str = "
    13  H  H  H  D  D  H  H  H  H  H
    14  H  H  H  D  D  H  H  H  H  H
    15  H  H  D  D  D  H  H  H  H  H
    16  H  H  D  D  D  H  H  H  H  H
    17  H  D  D  D  D  H  H  H  H  H
    18  Ds Ds Ds Ds Ds S  S  H  H  H
    19  S  S  S  S  Ds S  S  S  S  S
    20  S  S  S  S  S  S  S  S  S  S
";

/// Keyed by the value of one card of the pair.
const PAIR_ROWS: &str = "
    2   P  P  P  P  P  P  H  H  H  H
    3   P  P  P  P  P  P  H  H  H  H
    4   H  H  H  P  P  H  H  H  H  H
    5   D  D  D  D  D  D  D  D  H  H
    6   P  P  P  P  P  H  H  H  H  H
    7   P  P  P  P  P  P  H  H  H  H
    8   P  P  P  P  P  P  P  P  P  P
    9   P  P  P  P  P  S  P  P  S  S
    10  S  S  S  S  S  S  S  S  S  S
    11  P  P  P  P  P  P  P  P  P  P
";

/// Hard totals below this always hit; the table starts here.
pub const HARD_FIRST: u8 = 9;
/// Hard totals from here up always stand.
pub const HARD_STAND: u8 = 17;
pub const SOFT_FIRST: u8 = 13;
pub const SOFT_LAST: u8 = 20;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Code {
    Hit,
    Stand,
    Split,
    DoubleOrHit,
    DoubleOrStand,
}

impl Code {
    fn parse(s: &str) -> Option<Code> {
        match s {
            "H" => Some(Code::Hit),
            "S" => Some(Code::Stand),
            "P" => Some(Code::Split),
            "D" => Some(Code::DoubleOrHit),
            "Ds" => Some(Code::DoubleOrStand),
            _ => None,
        }
    }

    /// Resolve against the hand's current double eligibility.
    pub fn resolve(self, can_double: bool) -> PlayerMove {
        match self {
            Code::Hit => PlayerMove::Hit,
            Code::Stand => PlayerMove::Stand,
            Code::Split => PlayerMove::Split,
            Code::DoubleOrHit if can_double => PlayerMove::Double,
            Code::DoubleOrHit => PlayerMove::Hit,
            Code::DoubleOrStand if can_double => PlayerMove::Double,
            Code::DoubleOrStand => PlayerMove::Stand,
        }
    }
}

type Rows = BTreeMap<u8, [Code; COLUMNS]>;

fn parse_rows(table: &'static str, text: &str) -> Result<Rows, GameError> {
    let incomplete = |detail: String| GameError::IncompleteTable { table, detail };
    let mut rows = Rows::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut fields = line.split_whitespace();
        let key: u8 = fields
            .next()
            .and_then(|k| k.parse().ok())
            .ok_or_else(|| incomplete(format!("bad row key in `{}`", line)))?;
        let codes: Vec<Code> = fields
            .map(|f| Code::parse(f).ok_or_else(|| incomplete(format!("unknown code `{}`", f))))
            .collect::<Result<_, _>>()?;
        let codes: [Code; COLUMNS] = codes.try_into().map_err(|v: Vec<Code>| {
            incomplete(format!("row {} has {} columns, expected {}", key, v.len(), COLUMNS))
        })?;
        if rows.insert(key, codes).is_some() {
            return Err(incomplete(format!("row {} appears twice", key)));
        }
    }
    Ok(rows)
}

fn require_keys(
    table: &'static str,
    rows: &Rows,
    keys: std::ops::RangeInclusive<u8>,
) -> Result<(), GameError> {
    for key in keys {
        if !rows.contains_key(&key) {
            return Err(GameError::IncompleteTable {
                table,
                detail: format!("missing row {}", key),
            });
        }
    }
    Ok(())
}

fn forbid_split(table: &'static str, rows: &Rows) -> Result<(), GameError> {
    for (key, codes) in rows {
        if codes.contains(&Code::Split) {
            return Err(GameError::IncompleteTable {
                table,
                detail: format!("row {} splits a non-pair", key),
            });
        }
    }
    Ok(())
}

fn column(table: &'static str, up_card: u8) -> Result<usize, GameError> {
    if (UP_CARD_MIN..=UP_CARD_MAX).contains(&up_card) {
        Ok((up_card - UP_CARD_MIN) as usize)
    } else {
        Err(GameError::IncompleteTable {
            table,
            detail: format!("no column for up-card {}", up_card),
        })
    }
}

/// The three shape tables, checked for completeness when built.
#[derive(Debug, Clone)]
pub struct StrategyTables {
    hard: Rows,
    soft: Rows,
    pairs: Rows,
}

impl StrategyTables {
    pub fn standard() -> Result<Self, GameError> {
        Self::from_rows(HARD_ROWS, SOFT_ROWS, PAIR_ROWS)
    }

    /// Parse and check custom tables. Hard rows must cover 9-16, soft rows
    /// 13-20 and pair rows 2-11, ten columns each.
    pub fn from_rows(hard: &str, soft: &str, pairs: &str) -> Result<Self, GameError> {
        let hard = parse_rows("hard", hard)?;
        let soft = parse_rows("soft", soft)?;
        let pairs = parse_rows("pairs", pairs)?;
        require_keys("hard", &hard, HARD_FIRST..=HARD_STAND - 1)?;
        require_keys("soft", &soft, SOFT_FIRST..=SOFT_LAST)?;
        require_keys("pairs", &pairs, UP_CARD_MIN..=UP_CARD_MAX)?;
        forbid_split("hard", &hard)?;
        forbid_split("soft", &soft)?;
        Ok(Self { hard, soft, pairs })
    }

    pub fn hard_move(&self, hand: &Hand, up_card: u8) -> Result<PlayerMove, GameError> {
        let total = hand.total();
        if total < HARD_FIRST {
            return Ok(PlayerMove::Hit);
        }
        if total >= HARD_STAND {
            return Ok(PlayerMove::Stand);
        }
        let col = column("hard", up_card)?;
        let code = self.hard.get(&total).map(|row| row[col]).ok_or_else(|| {
            GameError::IncompleteTable {
                table: "hard",
                detail: format!("missing row {}", total),
            }
        })?;
        Ok(code.resolve(hand.can_double()))
    }

    pub fn soft_move(&self, hand: &Hand, up_card: u8) -> Result<PlayerMove, GameError> {
        let col = column("soft", up_card)?;
        Ok(self
            .soft
            .get(&hand.total())
            .map(|row| row[col].resolve(hand.can_double()))
            .unwrap_or(PlayerMove::Stand))
    }

    pub fn pair_move(&self, hand: &Hand, up_card: u8) -> Result<PlayerMove, GameError> {
        let unreachable = GameError::UnreachablePairShape {
            total: hand.total(),
            up_card,
        };
        let key = match hand.cards() {
            [a, b] if a.value() == b.value() => a.value(),
            _ => return Err(unreachable),
        };
        let col = column("pairs", up_card)?;
        let code = self.pairs.get(&key).map(|row| row[col]).ok_or(unreachable)?;
        Ok(code.resolve(hand.can_double()))
    }
}
