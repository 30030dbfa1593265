//! Property-based tests for the matching engine
//!
//! Checks the book-level invariants over arbitrary order sequences:
//! price-time priority ordering, amount conservation, and an uncrossed
//! book after every submission.

use matching_engine::MatchingEngine;
use proptest::prelude::*;
use rust_decimal::Decimal;
use types::ids::{Asset, UserId};
use types::numeric::{Amount, Price};
use types::order::{Order, Side};

const TS: i64 = 1708123456789000000;

/// Compact order description generated by proptest
#[derive(Debug, Clone)]
struct OrderSpec {
    is_buy: bool,
    price_tick: u8,
    amount: u32,
}

fn order_spec() -> impl Strategy<Value = OrderSpec> {
    (any::<bool>(), 1u8..=20, 1u32..=1000).prop_map(|(is_buy, price_tick, amount)| OrderSpec {
        is_buy,
        price_tick,
        amount,
    })
}

fn build_order(spec: &OrderSpec, index: usize) -> Order {
    Order::new(
        UserId::new(format!("user{}", index % 7)),
        Asset::new("Asset1"),
        if spec.is_buy { Side::Buy } else { Side::Sell },
        Price::try_new(Decimal::from(spec.price_tick)).unwrap(),
        Amount::try_new(Decimal::from(spec.amount)).unwrap(),
        TS + index as i64,
    )
}

/// Sum of all amounts resting on both sides of the book
fn resting_total(engine: &MatchingEngine) -> Decimal {
    let bids: Decimal = engine
        .bids()
        .levels()
        .map(|(_, level)| level.total_amount().as_decimal())
        .sum();
    let asks: Decimal = engine
        .asks()
        .levels()
        .map(|(_, level)| level.total_amount().as_decimal())
        .sum();
    bids + asks
}

fn assert_book_invariants(engine: &MatchingEngine) {
    // Bid levels strictly descending, ask levels strictly ascending,
    // every retained level non-empty with positive amount
    let bid_prices: Vec<Price> = engine.bids().levels().map(|(p, _)| *p).collect();
    for pair in bid_prices.windows(2) {
        assert!(pair[0] > pair[1], "bid levels out of order");
    }
    let ask_prices: Vec<Price> = engine.asks().levels().map(|(p, _)| *p).collect();
    for pair in ask_prices.windows(2) {
        assert!(pair[0] < pair[1], "ask levels out of order");
    }
    for (_, level) in engine.bids().levels().chain(engine.asks().levels()) {
        assert!(level.order_count() > 0, "empty level retained");
        assert!(
            level.total_amount().as_decimal() > Decimal::ZERO,
            "non-positive level amount"
        );
    }

    // Book must never stay crossed: a crossed top of book would have matched
    if let (Some(best_bid), Some(best_ask)) =
        (engine.bids().best_price(), engine.asks().best_price())
    {
        assert!(best_bid < best_ask, "book left crossed");
    }
}

proptest! {
    #[test]
    fn prop_priority_and_conservation(specs in proptest::collection::vec(order_spec(), 1..60)) {
        let mut engine = MatchingEngine::new(Asset::new("Asset1"), 1);

        let mut submitted = Decimal::ZERO;
        let mut matched = Decimal::ZERO;
        let mut last_sequence: Option<u64> = None;

        for (index, spec) in specs.iter().enumerate() {
            let order = build_order(spec, index);
            submitted += order.amount.as_decimal();

            let outcome = engine.submit_order(order, TS + index as i64);
            for fill in outcome.fills() {
                // Each fill consumes the amount from one buy and one sell
                matched += fill.amount.as_decimal() * Decimal::from(2);

                // Fill sequences strictly increase per asset
                if let Some(last) = last_sequence {
                    prop_assert!(fill.sequence > last);
                }
                last_sequence = Some(fill.sequence);
            }

            assert_book_invariants(&engine);

            // Conservation: everything submitted is either matched away
            // or still resting
            prop_assert_eq!(submitted, matched + resting_total(&engine));
        }
    }

    #[test]
    fn prop_cancel_preserves_conservation(specs in proptest::collection::vec(order_spec(), 1..40)) {
        let mut engine = MatchingEngine::new(Asset::new("Asset1"), 1);

        let mut submitted = Decimal::ZERO;
        let mut matched = Decimal::ZERO;
        let mut cancelled = Decimal::ZERO;
        let mut resting_ids = Vec::new();

        for (index, spec) in specs.iter().enumerate() {
            let order = build_order(spec, index);
            submitted += order.amount.as_decimal();

            let outcome = engine.submit_order(order, TS + index as i64);
            for fill in outcome.fills() {
                matched += fill.amount.as_decimal() * Decimal::from(2);
            }
            resting_ids.push(outcome.order().id);

            // Cancel every third submitted order (resting or not)
            if index % 3 == 0 {
                if let Some(amount) = engine.cancel_order(&resting_ids[index / 3]) {
                    cancelled += amount.as_decimal();
                }
            }

            assert_book_invariants(&engine);
            prop_assert_eq!(submitted, matched + cancelled + resting_total(&engine));
        }
    }
}
