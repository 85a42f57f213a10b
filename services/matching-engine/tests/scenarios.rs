//! End-to-end matching scenarios
//!
//! Drives the public `submit`/`cancel` surface and checks trades, resting
//! remainders and best prices after each step.

use matching_engine::{EngineConfig, OrderRequest, Orderbook, SubmitStatus};
use rust_decimal::Decimal;
use std::str::FromStr;
use types::errors::{BookError, ValidationError};
use types::ids::OrderId;
use types::numeric::{Price, Stake};
use types::order::{OrderStatus, Side};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn price(s: &str) -> Price {
    Price::from_str(s).unwrap()
}

fn stake(s: &str) -> Stake {
    Stake::from_str(s).unwrap()
}

fn new_book() -> Orderbook {
    Orderbook::with_config(EngineConfig {
        verify_invariants: true,
        ..EngineConfig::default()
    })
}

#[test]
fn test_partial_fill_of_resting_lay() {
    let mut book = new_book();
    let lay = book.submit(OrderRequest::lay(dec("2.00"), dec("100"))).unwrap();

    let back = book.submit(OrderRequest::back(dec("2.00"), dec("40"))).unwrap();

    assert_eq!(back.status, SubmitStatus::Filled);
    assert_eq!(back.trades.len(), 1);
    assert_eq!(back.trades[0].price, price("2.00"));
    assert_eq!(back.trades[0].quantity, stake("40"));
    assert_eq!(back.resting_remainder, Stake::zero());
    assert!(!book.contains(&back.order_id));

    let resting = book.order(&lay.order_id).unwrap();
    assert_eq!(resting.remaining_stake, stake("60"));
    assert_eq!(resting.status, OrderStatus::PartiallyFilled);
    assert_eq!(book.best_lay_level(), Some((price("2.00"), stake("60"))));
}

#[test]
fn test_taker_exhausts_lay_and_rests_remainder() {
    let mut book = new_book();
    let lay = book.submit(OrderRequest::lay(dec("2.00"), dec("100"))).unwrap();

    let back = book.submit(OrderRequest::back(dec("2.00"), dec("150"))).unwrap();

    assert_eq!(back.status, SubmitStatus::PartiallyFilled);
    assert_eq!(back.trades.len(), 1);
    assert_eq!(back.trades[0].quantity, stake("100"));
    assert_eq!(back.trades[0].maker_order_id, lay.order_id);
    assert_eq!(back.resting_remainder, stake("50"));

    assert!(!book.contains(&lay.order_id));
    assert_eq!(book.level_count(Side::Lay), 0);
    assert_eq!(book.best_lay(), None);
    assert_eq!(book.best_back_level(), Some((price("2.00"), stake("50"))));
}

#[test]
fn test_empty_book_rests_order() {
    let mut book = new_book();

    let back = book.submit(OrderRequest::back(dec("1.95"), dec("100"))).unwrap();

    assert_eq!(back.status, SubmitStatus::Resting);
    assert!(back.trades.is_empty());
    assert_eq!(book.best_back(), Some(price("1.95")));
    assert_eq!(book.best_lay(), None);
}

#[test]
fn test_zero_stake_rejected() {
    let mut book = new_book();
    book.submit(OrderRequest::lay(dec("2.00"), dec("10"))).unwrap();
    let before = book.snapshot(10);

    let result = book.submit(OrderRequest::back(dec("2.00"), Decimal::ZERO));

    assert_eq!(
        result,
        Err(BookError::Validation(ValidationError::InvalidStake(Decimal::ZERO)))
    );
    assert_eq!(book.snapshot(10), before);
    assert_eq!(book.order_count(), 1);
}

#[test]
fn test_price_at_minimum_rejected() {
    let mut book = new_book();

    let err = book.submit(OrderRequest::lay(dec("1.00"), dec("10"))).unwrap_err();

    match err {
        BookError::Validation(inner) => assert_eq!(inner.field(), "price"),
        other => panic!("Expected validation error, got {other:?}"),
    }
    assert!(book.is_empty());
}

#[test]
fn test_walks_lay_levels_best_first() {
    let mut book = new_book();
    book.submit(OrderRequest::lay(dec("2.10"), dec("50"))).unwrap();
    book.submit(OrderRequest::lay(dec("2.00"), dec("50"))).unwrap();
    assert_eq!(book.best_lay(), Some(price("2.00")));

    let back = book.submit(OrderRequest::back(dec("2.10"), dec("70"))).unwrap();

    let fills: Vec<_> = back.trades.iter().map(|t| (t.price, t.quantity)).collect();
    assert_eq!(
        fills,
        vec![(price("2.00"), stake("50")), (price("2.10"), stake("20"))]
    );
    assert_eq!(back.status, SubmitStatus::Filled);
    assert_eq!(book.best_lay_level(), Some((price("2.10"), stake("30"))));
    assert_eq!(book.level_count(Side::Lay), 1);
    assert!(back.trades[0].sequence < back.trades[1].sequence);
}

#[test]
fn test_lay_taker_trades_at_back_maker_price() {
    let mut book = new_book();
    book.submit(OrderRequest::back(dec("3.00"), dec("10"))).unwrap();
    book.submit(OrderRequest::back(dec("2.50"), dec("10"))).unwrap();

    let lay = book.submit(OrderRequest::lay(dec("2.00"), dec("15"))).unwrap();

    let fills: Vec<_> = lay.trades.iter().map(|t| (t.price, t.quantity)).collect();
    assert_eq!(
        fills,
        vec![(price("3.00"), stake("10")), (price("2.50"), stake("5"))]
    );
    assert!(lay.trades.iter().all(|t| t.taker_side == Side::Lay));
    assert_eq!(book.best_back_level(), Some((price("2.50"), stake("5"))));
    assert_eq!(book.best_lay(), None);
}

#[test]
fn test_matching_stops_at_price_limit() {
    let mut book = new_book();
    book.submit(OrderRequest::lay(dec("2.00"), dec("10"))).unwrap();
    book.submit(OrderRequest::lay(dec("2.20"), dec("10"))).unwrap();

    let back = book.submit(OrderRequest::back(dec("2.10"), dec("30"))).unwrap();

    assert_eq!(back.trades.len(), 1);
    assert_eq!(back.resting_remainder, stake("20"));
    assert_eq!(book.best_back(), Some(price("2.10")));
    assert_eq!(book.best_lay(), Some(price("2.20")));
    assert!(book.check_invariants());
}

#[test]
fn test_duplicate_id_rejected_without_matching() {
    let mut book = new_book();
    let id = OrderId::new();
    book.submit(OrderRequest::back(dec("1.80"), dec("10")).with_id(id)).unwrap();
    book.submit(OrderRequest::lay(dec("2.00"), dec("25"))).unwrap();
    let before = book.snapshot(10);

    // Would cross the lay at 2.00 if accepted
    let result = book.submit(OrderRequest::back(dec("2.00"), dec("10")).with_id(id));

    assert_eq!(result, Err(BookError::DuplicateOrder { order_id: id }));
    assert_eq!(book.snapshot(10), before);
    assert_eq!(book.order(&id).unwrap().remaining_stake, stake("10"));
}

#[test]
fn test_level_volume_overflow_rejected_atomically() {
    let mut book = new_book();
    let first = book.submit(OrderRequest::lay(dec("2.00"), Decimal::MAX)).unwrap();
    book.submit(OrderRequest::back(dec("1.50"), dec("10"))).unwrap();
    let before = book.snapshot(10);

    let result = book.submit(OrderRequest::lay(dec("2.00"), Decimal::MAX));

    assert_eq!(result, Err(BookError::VolumeOverflow { price: price("2.00") }));
    assert_eq!(book.snapshot(10), before);
    assert_eq!(book.order_count(), 2);
    assert_eq!(
        book.order(&first.order_id).unwrap().remaining_stake,
        Stake::try_new(Decimal::MAX).unwrap()
    );
    assert!(book.check_invariants());

    // The level still trades normally afterwards
    let back = book.submit(OrderRequest::back(dec("2.00"), dec("10"))).unwrap();
    assert_eq!(back.status, SubmitStatus::Filled);
    assert_eq!(back.trades[0].maker_order_id, first.order_id);
    assert!(book.check_invariants());
}

#[test]
fn test_filled_order_id_can_be_reused() {
    let mut book = new_book();
    let id = OrderId::new();
    book.submit(OrderRequest::lay(dec("2.00"), dec("10")).with_id(id)).unwrap();
    book.submit(OrderRequest::back(dec("2.00"), dec("10"))).unwrap();

    assert!(book.submit(OrderRequest::lay(dec("2.00"), dec("10")).with_id(id)).is_ok());
}

#[test]
fn test_cancel_filled_order_is_not_found() {
    let mut book = new_book();
    let lay = book.submit(OrderRequest::lay(dec("2.00"), dec("10"))).unwrap();
    book.submit(OrderRequest::back(dec("2.00"), dec("10"))).unwrap();
    book.submit(OrderRequest::back(dec("1.50"), dec("5"))).unwrap();
    let before = book.snapshot(10);

    let result = book.cancel(&lay.order_id);

    assert_eq!(result, Err(BookError::NotFound { order_id: lay.order_id }));
    assert_eq!(book.snapshot(10), before);
}

#[test]
fn test_cancel_twice() {
    let mut book = new_book();
    let back = book.submit(OrderRequest::back(dec("1.50"), dec("5"))).unwrap();

    assert!(book.cancel(&back.order_id).is_ok());
    assert!(matches!(book.cancel(&back.order_id), Err(BookError::NotFound { .. })));
}

#[test]
fn test_cancel_best_level_recomputes_best() {
    let mut book = new_book();
    let best = book.submit(OrderRequest::back(dec("1.90"), dec("5"))).unwrap();
    book.submit(OrderRequest::back(dec("1.80"), dec("5"))).unwrap();
    book.submit(OrderRequest::back(dec("1.70"), dec("5"))).unwrap();

    book.cancel(&best.order_id).unwrap();

    assert_eq!(book.best_back(), Some(price("1.80")));
    assert_eq!(book.level_count(Side::Back), 2);
}

#[test]
fn test_cancel_middle_of_queue_keeps_fifo() {
    let mut book = new_book();
    let a = book.submit(OrderRequest::lay(dec("2.00"), dec("10"))).unwrap();
    let b = book.submit(OrderRequest::lay(dec("2.00"), dec("20"))).unwrap();
    let c = book.submit(OrderRequest::lay(dec("2.00"), dec("30"))).unwrap();

    book.cancel(&b.order_id).unwrap();
    assert_eq!(book.best_lay_level(), Some((price("2.00"), stake("40"))));

    let back = book.submit(OrderRequest::back(dec("2.00"), dec("40"))).unwrap();
    let makers: Vec<_> = back.trades.iter().map(|t| t.maker_order_id).collect();
    assert_eq!(makers, vec![a.order_id, c.order_id]);
    assert!(book.is_empty());
}

#[test]
fn test_cancel_partially_filled_order() {
    let mut book = new_book();
    let partial = book.submit(OrderRequest::lay(dec("2.00"), dec("100"))).unwrap();
    let behind = book.submit(OrderRequest::lay(dec("2.00"), dec("30"))).unwrap();
    book.submit(OrderRequest::back(dec("2.00"), dec("40"))).unwrap();
    assert_eq!(book.best_lay_level(), Some((price("2.00"), stake("90"))));

    let canceled = book.cancel(&partial.order_id).unwrap();

    assert_eq!(canceled.status, OrderStatus::Canceled);
    assert_eq!(canceled.stake, stake("100"));
    assert_eq!(canceled.remaining_stake, stake("60"));
    assert_eq!(canceled.matched_stake(), stake("40"));
    assert!(!book.contains(&partial.order_id));
    assert_eq!(book.best_lay_level(), Some((price("2.00"), stake("30"))));
    assert!(book.check_invariants());

    book.cancel(&behind.order_id).unwrap();
    assert_eq!(book.best_lay(), None);
    assert!(book.is_empty());
}

#[test]
fn test_outcome_serializes_to_json() {
    let mut book = new_book();
    book.submit(OrderRequest::lay(dec("2.00"), dec("100"))).unwrap();
    let outcome = book.submit(OrderRequest::back(dec("2.00"), dec("40"))).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["status"], "FILLED");
    assert_eq!(json["resting_remainder"], "0");
    assert_eq!(json["trades"][0]["price"], "2.00");
    assert_eq!(json["trades"][0]["quantity"], "40");
}
