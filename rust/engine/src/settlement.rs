//! Round scoring: turns the final hands into a single point outcome.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hand::Hand;
use crate::player::Player;

/// A settlement value, stored in half points so keys like `1.5` and `-0.5`
/// stay exact.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Points(i32);

impl Points {
    pub const ZERO: Points = Points(0);

    pub const fn from_halves(halves: i32) -> Self {
        Points(halves)
    }

    pub const fn whole(points: i32) -> Self {
        Points(points * 2)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }
}

impl std::ops::Add for Points {
    type Output = Points;
    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            let sign = if self.0 < 0 { "-" } else { "" };
            write!(f, "{}{}.5", sign, (self.0 / 2).abs())
        }
    }
}

impl FromStr for Points {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a settlement value: {}", s))?;
        let halves = v * 2.0;
        if halves.fract() != 0.0 || !halves.is_finite() {
            return Err(format!("settlement values move in half points: {}", s));
        }
        Ok(Points(halves as i32))
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn stake(hand: &Hand, win: bool) -> Points {
    let base = if hand.is_doubled() { 2 } else { 1 };
    Points::whole(if win { base } else { -base })
}

/// Settle a finished round. The dealer hand must already be played out.
pub fn settle(player: &Player, dealer: &Hand) -> Points {
    let player_bj = player.has_blackjack();
    let dealer_bj = dealer.is_blackjack();
    if player_bj || dealer_bj {
        return match (player_bj, dealer_bj) {
            (true, true) => Points::ZERO,
            (false, true) => Points::whole(-1),
            _ => Points::from_halves(3),
        };
    }

    if player.is_split() {
        settle_split(player.hands(), dealer)
    } else {
        settle_single(player.hand(0), dealer)
    }
}

fn settle_single(hand: &Hand, dealer: &Hand) -> Points {
    let player_total = hand.total();
    let dealer_total = dealer.total();
    let up_card = dealer.cards().first().map(|c| c.value()).unwrap_or(0);

    // House rule: soft opening 14 against a six pays or costs two points.
    if hand.has_ace()
        && hand.opening_total() == Some(14)
        && up_card == 6
        && dealer_total != player_total
    {
        return Points::whole(if dealer_total > player_total { -2 } else { 2 });
    }
    if hand.is_charlie() {
        return Points::whole(1);
    }
    if hand.is_busted() {
        return stake(hand, false);
    }
    if hand.is_surrendered() {
        return Points::from_halves(-1);
    }
    if dealer.is_busted() {
        return stake(hand, true);
    }
    match player_total.cmp(&dealer_total) {
        std::cmp::Ordering::Equal => Points::ZERO,
        std::cmp::Ordering::Less => stake(hand, false),
        std::cmp::Ordering::Greater => stake(hand, true),
    }
}

/// Per-hand point for a live split hand.
fn split_hand_points(hand: &Hand, dealer: &Hand) -> Points {
    if hand.is_charlie() {
        return Points::whole(1);
    }
    let player_total = hand.total();
    let dealer_total = dealer.total();
    match player_total.cmp(&dealer_total) {
        std::cmp::Ordering::Equal => Points::ZERO,
        std::cmp::Ordering::Less => stake(hand, dealer.is_busted()),
        std::cmp::Ordering::Greater => stake(hand, true),
    }
}

fn settle_split(hands: &[Hand], dealer: &Hand) -> Points {
    let busted = hands.iter().filter(|h| h.is_busted()).count();
    if busted == hands.len() {
        return Points::whole(-2);
    }
    let live = hands
        .iter()
        .filter(|h| !h.is_busted())
        .fold(Points::ZERO, |acc, h| acc + split_hand_points(h, dealer));
    if busted > 0 {
        Points::whole(-1) + live
    } else {
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::player::PlayerMove;

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Diamonds)).collect()
    }

    fn dealer(ranks: &[Rank]) -> Hand {
        Hand::from_cards(cards(ranks))
    }

    fn single(ranks: &[Rank], moves: &[PlayerMove]) -> Player {
        let mut p = Player::new();
        p.hand_mut(0).add_cards(cards(ranks));
        for &m in moves {
            p.hand_mut(0).record_move(m);
        }
        p
    }

    fn split(a: &[Rank], b: &[Rank]) -> Player {
        let mut p = Player::new();
        p.hand_mut(0).add_cards(cards(&[a[0], b[0]]));
        p.split().unwrap();
        p.hand_mut(0).add_cards(cards(&a[1..]));
        p.hand_mut(1).add_cards(cards(&b[1..]));
        p
    }

    #[test]
    fn points_display_matches_tally_keys() {
        assert_eq!(Points::from_halves(3).to_string(), "1.5");
        assert_eq!(Points::from_halves(-1).to_string(), "-0.5");
        assert_eq!(Points::whole(-2).to_string(), "-2");
        assert_eq!(Points::ZERO.to_string(), "0");
        assert_eq!("1.5".parse::<Points>().unwrap(), Points::from_halves(3));
        assert_eq!("-3".parse::<Points>().unwrap(), Points::whole(-3));
        assert!("0.25".parse::<Points>().is_err());
    }

    #[test]
    fn blackjacks_dominate() {
        let d = dealer(&[Rank::Ace, Rank::King]);
        let p = single(&[Rank::Ace, Rank::Queen], &[]);
        assert_eq!(settle(&p, &d), Points::ZERO);

        let p = single(&[Rank::Ten, Rank::Nine], &[]);
        assert_eq!(settle(&p, &d), Points::whole(-1));

        let d = dealer(&[Rank::Six, Rank::King, Rank::Five]);
        let p = single(&[Rank::Ace, Rank::Queen], &[]);
        assert_eq!(settle(&p, &d), Points::from_halves(3));
    }

    #[test]
    fn equal_totals_push() {
        let d = dealer(&[Rank::Ten, Rank::Eight]);
        let p = single(&[Rank::Nine, Rank::Nine], &[PlayerMove::Stand]);
        assert_eq!(settle(&p, &d), Points::ZERO);
        let p = single(&[Rank::Five, Rank::Six, Rank::Seven], &[PlayerMove::Double]);
        assert_eq!(settle(&p, &d), Points::ZERO);
    }

    #[test]
    fn doubled_results_move_two_points() {
        let d = dealer(&[Rank::Ten, Rank::Seven]);
        let p = single(&[Rank::Five, Rank::Six, Rank::Nine], &[PlayerMove::Double]);
        assert_eq!(settle(&p, &d), Points::whole(2));
        let p = single(&[Rank::Five, Rank::Six, Rank::Two], &[PlayerMove::Double]);
        assert_eq!(settle(&p, &d), Points::whole(-2));
        let p = single(&[Rank::Six, Rank::Six, Rank::King], &[PlayerMove::Double]);
        assert_eq!(settle(&p, &d), Points::whole(-2));
    }

    #[test]
    fn surrender_costs_half() {
        let d = dealer(&[Rank::Ten, Rank::Seven]);
        let p = single(&[Rank::Ten, Rank::Six], &[PlayerMove::Surrender]);
        assert_eq!(settle(&p, &d), Points::from_halves(-1));
    }

    #[test]
    fn charlie_beats_dealer_twenty_one() {
        let d = dealer(&[Rank::Ten, Rank::Five, Rank::Six]);
        let p = single(
            &[
                Rank::Two,
                Rank::Two,
                Rank::Two,
                Rank::Three,
                Rank::Three,
                Rank::Four,
                Rank::Four,
            ],
            &[PlayerMove::Hit],
        );
        assert_eq!(settle(&p, &d), Points::whole(1));
    }

    #[test]
    fn dealer_bust_pays_live_hand() {
        let d = dealer(&[Rank::Ten, Rank::Six, Rank::Nine]);
        let p = single(&[Rank::Ten, Rank::Two], &[PlayerMove::Stand]);
        assert_eq!(settle(&p, &d), Points::whole(1));
    }

    #[test]
    fn soft_fourteen_against_six_moves_two_points() {
        let d = dealer(&[Rank::Six, Rank::Ten, Rank::Two]);
        let p = single(&[Rank::Ace, Rank::Three, Rank::Two], &[PlayerMove::Hit]);
        assert_eq!(settle(&p, &d), Points::whole(-2));
        let p = single(&[Rank::Ace, Rank::Three, Rank::Five], &[PlayerMove::Hit]);
        assert_eq!(settle(&p, &d), Points::whole(2));
        // equal totals fall through to the normal rules
        let p = single(&[Rank::Ace, Rank::Three, Rank::Four], &[PlayerMove::Hit]);
        assert_eq!(settle(&p, &d), Points::ZERO);
    }

    #[test]
    fn split_both_bust_is_flat_minus_two() {
        let d = dealer(&[Rank::Ten, Rank::Seven]);
        let p = split(
            &[Rank::Eight, Rank::Six, Rank::King],
            &[Rank::Eight, Rank::Five, Rank::Queen],
        );
        assert_eq!(settle(&p, &d), Points::whole(-2));
    }

    #[test]
    fn split_one_bust_adds_survivor() {
        let d = dealer(&[Rank::Ten, Rank::Seven]);
        let p = split(
            &[Rank::Eight, Rank::Six, Rank::King],
            &[Rank::Eight, Rank::Ten],
        );
        assert_eq!(settle(&p, &d), Points::ZERO);

        let p = split(
            &[Rank::Eight, Rank::Six, Rank::King],
            &[Rank::Eight, Rank::Eight],
        );
        assert_eq!(settle(&p, &d), Points::whole(-2));
    }

    #[test]
    fn split_charlie_wins_even_below_dealer() {
        let d = dealer(&[Rank::Ten, Rank::Nine]);
        let charlie = [
            Rank::Two,
            Rank::Two,
            Rank::Two,
            Rank::Three,
            Rank::Three,
            Rank::Three,
            Rank::Two,
        ];
        let p = split(&charlie, &[Rank::Two, Rank::King, Rank::Queen]);
        assert!(p.hand(0).is_charlie());
        assert_eq!(settle(&p, &d), Points::ZERO);

        let p = split(&charlie, &[Rank::Two, Rank::King, Rank::Eight]);
        assert_eq!(settle(&p, &d), Points::whole(2));
    }

    #[test]
    fn split_lower_hands_win_when_dealer_busts() {
        let d = dealer(&[Rank::Ten, Rank::Six, Rank::Eight]);
        let p = split(&[Rank::Nine, Rank::Eight], &[Rank::Nine, Rank::Nine]);
        assert_eq!(settle(&p, &d), Points::whole(2));
    }

    #[test]
    fn split_hands_sum_points() {
        let d = dealer(&[Rank::Ten, Rank::Eight]);
        let p = split(&[Rank::Nine, Rank::King], &[Rank::Nine, Rank::Nine]);
        assert_eq!(settle(&p, &d), Points::whole(1));
    }
}
