use hilo_ai::counting::CountingStrategy;
use hilo_ai::create_strategy;
use hilo_engine::cards::{full_pack, Card, Rank, Suit};
use hilo_engine::engine::PlayPolicy;
use hilo_engine::errors::GameError;
use hilo_engine::hand::Hand;
use hilo_engine::logger::NullNarrative;
use hilo_engine::player::PlayerMove;
use hilo_engine::session::{Session, SessionConfig};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const COUNTS: [f64; 9] = [-4.0, -2.0, -1.0, -0.5, 0.0, 0.5, 2.0, 4.5, 8.0];

fn random_hand(rng: &mut ChaCha20Rng) -> Hand {
    let mut pack = full_pack();
    pack.shuffle(rng);
    let n = rng.random_range(2..=5);
    Hand::from_cards(pack.into_iter().take(n).collect())
}

#[test]
fn decisions_are_pure_and_respect_eligibility() {
    let strategy = CountingStrategy::new().unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    for _ in 0..5_000 {
        let hand = random_hand(&mut rng);
        if hand.is_busted() {
            continue;
        }
        let up = rng.random_range(2..=11u8);
        let tc = COUNTS[rng.random_range(0..COUNTS.len())];
        let can_split = rng.random_bool(0.5);

        let first = strategy.decide(&hand, up, tc, can_split).unwrap();
        let second = strategy.decide(&hand, up, tc, can_split).unwrap();
        assert_eq!(first, second);
        if !can_split {
            assert_ne!(first, PlayerMove::Split, "{:?} vs {} at {}", hand.cards(), up, tc);
        }
        if !hand.can_double() {
            assert_ne!(first, PlayerMove::Double, "{:?} vs {} at {}", hand.cards(), up, tc);
        }
        assert_ne!(first, PlayerMove::Surrender);
    }
}

#[test]
fn doubled_hand_is_never_doubled_again() {
    let strategy = CountingStrategy::new().unwrap();
    let mut hand = Hand::from_cards(vec![
        Card::new(Rank::Six, Suit::Clubs),
        Card::new(Rank::Five, Suit::Clubs),
    ]);
    hand.record_move(PlayerMove::Double);
    for up in 2..=11 {
        for tc in COUNTS {
            assert_ne!(strategy.decide(&hand, up, tc, false).unwrap(), PlayerMove::Double);
        }
    }
}

#[test]
fn hard_sixteen_against_ten_hits_at_zero_count() {
    let strategy = create_strategy("hilo").unwrap();
    for (a, b) in [(Rank::Ten, Rank::Six), (Rank::Nine, Rank::Seven)] {
        let hand = Hand::from_cards(vec![Card::new(a, Suit::Hearts), Card::new(b, Suit::Clubs)]);
        assert_eq!(hand.total(), 16);
        assert_eq!(strategy.decide(&hand, 10, 0.0, true).unwrap(), PlayerMove::Hit);
    }
}

#[test]
fn every_pair_has_an_entry() {
    let strategy = CountingStrategy::basic().unwrap();
    for rank in hilo_engine::cards::all_ranks() {
        let hand = Hand::from_cards(vec![
            Card::new(rank, Suit::Hearts),
            Card::new(rank, Suit::Spades),
        ]);
        for up in 2..=11 {
            strategy.decide(&hand, up, 0.0, true).unwrap();
        }
    }
}

#[test]
fn long_session_never_breaks_an_invariant() {
    let config = SessionConfig {
        rounds: 5_000,
        seed: Some(20_240_101),
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, create_strategy("hilo").unwrap()).unwrap();
    let summary = session
        .run(&mut NullNarrative, |record| {
            for hand in &record.player_hands {
                assert!(hand.len() <= 7 || hand.is_busted());
            }
            Ok::<(), GameError>(())
        })
        .unwrap();
    assert_eq!(summary.rounds, 5_000);
    assert_eq!(session.tally().iter().map(|(_, n)| n).sum::<u64>(), 5_000);
    assert!(summary.shoes > 1);
}
