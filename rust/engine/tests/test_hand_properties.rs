use hilo_engine::cards::{Card, Rank, Suit};
use hilo_engine::deck::Shoe;
use hilo_engine::game::Ledger;
use hilo_engine::hand::Hand;

fn hard_total(cards: &[Card]) -> u32 {
    cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() as u32 })
        .sum()
}

#[test]
fn totals_are_pure_and_bounded() {
    let mut shoe = Shoe::new_with_seed(6, 204, 2024);
    for _ in 0..200 {
        let mut hand = Hand::new();
        for _ in 0..5 {
            hand.add_card(shoe.deal().unwrap());
            let total = hand.total();
            assert_eq!(total, hand.total());
            if !hand.is_busted() {
                assert!(total as u32 >= hard_total(hand.cards()));
                assert!(total <= 21);
            } else {
                assert_eq!(total as u32, hard_total(hand.cards()));
            }
        }
        if shoe.remaining() < 10 {
            shoe.shuffle();
        }
    }
}

#[test]
fn seven_live_cards_are_always_a_charlie() {
    let mut shoe = Shoe::new_with_seed(6, 204, 77);
    for _ in 0..300 {
        if shoe.remaining() < 7 {
            shoe.shuffle();
        }
        let cards: Vec<Card> = (0..7).map(|_| shoe.deal().unwrap()).collect();
        let hand = Hand::from_cards(cards);
        assert_eq!(hand.is_charlie(), !hand.is_busted());
    }

    let low: Vec<Card> = [
        Rank::Two,
        Rank::Three,
        Rank::Two,
        Rank::Ace,
        Rank::Four,
        Rank::Two,
        Rank::Three,
    ]
    .iter()
    .map(|&r| Card::new(r, Suit::Hearts))
    .collect();
    let hand = Hand::from_cards(low);
    assert!(hand.total() <= 21);
    assert!(hand.is_charlie());
}

#[test]
fn fresh_ledger_true_count_is_zero_for_any_running_count() {
    for decks in 0..8 {
        assert_eq!(Ledger::new().true_count(decks), 0.0);
    }
}
