//! Property-based tests for book and aggregation invariants.
//!
//! These use proptest to drive random event sequences and verify the
//! structural invariants hold at every step.

use decibook::{Action, Book, Ladder, Market, MboEvent, OrderId, Price, Side, Size};
use proptest::prelude::*;

fn ev(action: Action, side: Side, price: Price, size: Size, id: u64) -> MboEvent {
    MboEvent {
        instrument_id: 7,
        publisher_id: 1,
        action,
        side,
        price,
        size,
        order_id: OrderId(id),
        ..MboEvent::default()
    }
}

/// Generate a price on a coarse grid so levels collide often.
fn price_strategy() -> impl Strategy<Value = Price> {
    (90i64..=110i64).prop_map(|units| Price(units * Price::SCALE))
}

fn size_strategy() -> impl Strategy<Value = Size> {
    1u32..=50u32
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Bid), Just(Side::Ask)]
}

/// A small id space so cancels and modifies hit resting orders.
fn id_strategy() -> impl Strategy<Value = u64> {
    1u64..=20u64
}

#[derive(Clone, Debug)]
enum Op {
    Add(Side, Price, Size, u64),
    Cancel(Size, u64),
    Modify(Side, Price, Size, u64),
    Deplete(Side, Price, Size),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (side_strategy(), price_strategy(), size_strategy(), id_strategy())
            .prop_map(|(s, p, z, i)| Op::Add(s, p, z, i)),
        3 => (size_strategy(), id_strategy()).prop_map(|(z, i)| Op::Cancel(z, i)),
        2 => (side_strategy(), price_strategy(), size_strategy(), id_strategy())
            .prop_map(|(s, p, z, i)| Op::Modify(s, p, z, i)),
        2 => (side_strategy(), price_strategy(), size_strategy())
            .prop_map(|(s, p, z)| Op::Deplete(s, p, z)),
        1 => Just(Op::Clear),
    ]
}

fn apply_op(book: &mut Book, op: &Op) {
    match op {
        Op::Add(side, price, size, id) => {
            // Duplicate ids are structural errors; the book stays intact.
            let _ = book.apply(&ev(Action::Add, *side, *price, *size, *id));
        }
        Op::Cancel(size, id) => {
            book.apply(&ev(Action::Cancel, Side::None, Price::UNDEFINED, *size, *id))
                .unwrap();
        }
        Op::Modify(side, price, size, id) => {
            let _ = book.apply(&ev(Action::Modify, *side, *price, *size, *id));
        }
        Op::Deplete(side, price, size) => {
            book.deplete(*price, *size, *side);
        }
        Op::Clear => {
            book.apply(&ev(Action::Clear, Side::None, Price::UNDEFINED, 0, 0))
                .unwrap();
        }
    }
}

/// Assert every structural invariant of one book.
fn check_book(book: &Book) {
    let sides = [(Side::Bid, book.bids()), (Side::Ask, book.asks())];

    let mut resting = 0usize;
    for (side, ladder) in sides {
        let mut last_price: Option<Price> = None;
        for (price, level) in ladder.iter_best_first() {
            // No level exists with an empty queue.
            assert!(!level.is_empty(), "empty level at {price}");
            resting += level.order_count();

            // Best-first iteration is strictly monotonic.
            if let Some(last) = last_price {
                match side {
                    Side::Bid => assert!(*price < last, "bids not descending"),
                    _ => assert!(*price > last, "asks not ascending"),
                }
            }
            last_price = Some(*price);

            // Every queued order's locator points back here.
            for order in level.iter() {
                assert_eq!(
                    book.locate(order.id),
                    Some((side, *price)),
                    "locator mismatch for order {}",
                    order.id
                );
            }
        }
    }

    // Locator cardinality equals the number of queued orders.
    assert_eq!(book.order_count(), resting);
}

fn top_prices(ladder: &Ladder, n: usize) -> Vec<Price> {
    ladder.top_levels(n).iter().map(|l| l.price).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Invariants 1-4: the locator index, level queues, and price
    /// ordering stay consistent under arbitrary event sequences.
    #[test]
    fn book_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let mut book = Book::new();
        for op in &ops {
            apply_op(&mut book, op);
            check_book(&book);
        }
    }

    /// Add followed by a full cancel restores the book.
    #[test]
    fn add_then_full_cancel_round_trips(
        setup in prop::collection::vec(op_strategy(), 0..40),
        side in side_strategy(),
        price in price_strategy(),
        size in size_strategy(),
    ) {
        let mut book = Book::new();
        for op in &setup {
            apply_op(&mut book, op);
        }

        let before_orders = book.order_count();
        let before_bids = top_prices(book.bids(), usize::MAX);
        let before_asks = top_prices(book.asks(), usize::MAX);

        // A fresh id no setup op can have produced.
        let id = 1_000_000;
        if book.apply(&ev(Action::Add, side, price, size, id)).is_ok() {
            book.apply(&ev(Action::Cancel, Side::None, Price::UNDEFINED, size, id)).unwrap();
        }

        prop_assert_eq!(book.order_count(), before_orders);
        prop_assert_eq!(top_prices(book.bids(), usize::MAX), before_bids);
        prop_assert_eq!(top_prices(book.asks(), usize::MAX), before_asks);
        check_book(&book);
    }

    /// Clear followed by replaying adds in arrival order matches a
    /// fresh book fed the same adds.
    #[test]
    fn clear_then_replay_matches_fresh_book(
        noise in prop::collection::vec(op_strategy(), 0..40),
        adds in prop::collection::vec(
            (side_strategy(), price_strategy(), size_strategy()), 0..30),
    ) {
        let mut replayed = Book::new();
        for op in &noise {
            apply_op(&mut replayed, op);
        }
        replayed.apply(&ev(Action::Clear, Side::None, Price::UNDEFINED, 0, 0)).unwrap();

        let mut fresh = Book::new();
        for (i, (side, price, size)) in adds.iter().enumerate() {
            let id = i as u64 + 1;
            replayed.apply(&ev(Action::Add, *side, *price, *size, id)).unwrap();
            fresh.apply(&ev(Action::Add, *side, *price, *size, id)).unwrap();
        }

        prop_assert_eq!(replayed.top_bid_levels(10), fresh.top_bid_levels(10));
        prop_assert_eq!(replayed.top_ask_levels(10), fresh.top_ask_levels(10));
    }

    /// Invariant 5: cross-publisher aggregation does not depend on the
    /// order publishers were first seen in.
    #[test]
    fn aggregation_commutes_over_publisher_order(
        adds in prop::collection::vec(
            (1u16..=3u16, side_strategy(), price_strategy(), size_strategy()), 1..40),
    ) {
        let mut forward = Market::new();
        for (i, (publisher, side, price, size)) in adds.iter().enumerate() {
            let mut event = ev(Action::Add, *side, *price, *size, i as u64 + 1);
            event.publisher_id = *publisher;
            forward.apply(&event).unwrap();
        }

        // Same per-book sequences, publishers introduced in reverse.
        let mut reversed = Market::new();
        for wanted in [3u16, 2, 1] {
            for (i, (publisher, side, price, size)) in adds.iter().enumerate() {
                if *publisher != wanted {
                    continue;
                }
                let mut event = ev(Action::Add, *side, *price, *size, i as u64 + 1);
                event.publisher_id = *publisher;
                reversed.apply(&event).unwrap();
            }
        }

        prop_assert_eq!(forward.top_bid_levels(7, 10), reversed.top_bid_levels(7, 10));
        prop_assert_eq!(forward.top_ask_levels(7, 10), reversed.top_ask_levels(7, 10));
    }

    /// Price text round-trips through parse and display.
    #[test]
    fn price_parse_display_round_trip(
        raw in -1_000_000_000_000_000_000i64..=1_000_000_000_000_000_000i64,
    ) {
        let price = Price(raw);
        let text = format!("{price}");
        prop_assert_eq!(decibook::parse_price(&text), Some(price));
    }
}
