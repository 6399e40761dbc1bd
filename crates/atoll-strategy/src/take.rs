//! Aggressive liquidity taking.
//!
//! Walks one side of the book from the best price, consuming every level
//! priced strictly better than the target, clipping at the remaining
//! capacity boundary the instant the accumulated volume would exceed it.
//! Emits at most one aggregated order per side per invocation, at the
//! worst price level actually consumed.

use atoll_core::{PositionBudget, Price, Qty};
use rust_decimal::Decimal;

/// Buy resting asks priced strictly below `target`.
///
/// Returns the single aggregated order `(worst consumed price, +lots)` and
/// consumes the lots from the budget's long capacity.
pub fn take_asks(
    asks: &[(Price, Qty)],
    target: Decimal,
    budget: &mut PositionBudget,
) -> Option<(Price, Qty)> {
    let mut accumulated: i64 = 0;
    let mut worst: Option<Price> = None;

    for &(price, qty) in asks {
        if price.to_decimal() >= target {
            break; // ladder ascends, nothing better follows
        }
        let available = (-qty.inner()).max(0);
        if available == 0 {
            continue;
        }
        let room = budget.long_remaining() - accumulated;
        if room <= 0 {
            break;
        }
        let taken = available.min(room);
        accumulated += taken;
        worst = Some(price);
        if taken < available {
            break; // clipped at the capacity boundary
        }
    }

    let price = worst?;
    budget.consume_long(accumulated);
    Some((price, Qty::new(accumulated)))
}

/// Sell into resting bids priced strictly above `target`.
///
/// Returns the single aggregated order `(worst consumed price, -lots)` and
/// consumes the lots from the budget's short capacity.
pub fn take_bids(
    bids: &[(Price, Qty)],
    target: Decimal,
    budget: &mut PositionBudget,
) -> Option<(Price, Qty)> {
    let mut accumulated: i64 = 0;
    let mut worst: Option<Price> = None;

    for &(price, qty) in bids {
        if price.to_decimal() <= target {
            break; // ladder descends, nothing better follows
        }
        let available = qty.inner().max(0);
        if available == 0 {
            continue;
        }
        let room = budget.short_remaining() - accumulated;
        if room <= 0 {
            break;
        }
        let taken = available.min(room);
        accumulated += taken;
        worst = Some(price);
        if taken < available {
            break;
        }
    }

    let price = worst?;
    budget.consume_short(accumulated);
    Some((price, Qty::new(-accumulated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn levels(raw: &[(i64, i64)]) -> Vec<(Price, Qty)> {
        raw.iter()
            .map(|&(p, q)| (Price::new(p), Qty::new(q)))
            .collect()
    }

    #[test]
    fn test_buy_clips_at_capacity_boundary() {
        // Target 100, capacity 7: consumes 5 at 98, clips the 4 at 99 to 2,
        // emits one order at the worst consumed level for the full 7.
        let asks = levels(&[(98, -5), (99, -4)]);
        let mut budget = PositionBudget::new(43, 50);
        let (price, qty) = take_asks(&asks, dec!(100), &mut budget).unwrap();
        assert_eq!(price, Price::new(99));
        assert_eq!(qty, Qty::new(7));
        assert_eq!(budget.long_remaining(), 0);
    }

    #[test]
    fn test_buy_stops_at_target() {
        let asks = levels(&[(98, -5), (100, -4), (101, -2)]);
        let mut budget = PositionBudget::new(0, 50);
        let (price, qty) = take_asks(&asks, dec!(100), &mut budget).unwrap();
        // 100 is not strictly better than the target, so only 98 trades.
        assert_eq!(price, Price::new(98));
        assert_eq!(qty, Qty::new(5));
        assert_eq!(budget.long_remaining(), 45);
    }

    #[test]
    fn test_buy_fractional_target() {
        let asks = levels(&[(99, -5)]);
        let mut budget = PositionBudget::new(0, 50);
        assert!(take_asks(&asks, dec!(99.5), &mut budget).is_some());
        let asks_at = levels(&[(100, -5)]);
        assert!(take_asks(&asks_at, dec!(99.5), &mut budget).is_none());
    }

    #[test]
    fn test_sell_mirrors_buy() {
        let bids = levels(&[(102, 6), (101, 4)]);
        let mut budget = PositionBudget::new(-42, 50);
        // Short capacity is 8: consumes 6 at 102, clips 4 at 101 to 2.
        let (price, qty) = take_bids(&bids, dec!(100), &mut budget).unwrap();
        assert_eq!(price, Price::new(101));
        assert_eq!(qty, Qty::new(-8));
        assert_eq!(budget.short_remaining(), 0);
    }

    #[test]
    fn test_no_capacity_no_order() {
        let asks = levels(&[(98, -5)]);
        let mut budget = PositionBudget::new(50, 50);
        assert!(take_asks(&asks, dec!(100), &mut budget).is_none());
    }

    #[test]
    fn test_empty_ladder_no_order() {
        let mut budget = PositionBudget::new(0, 50);
        assert!(take_asks(&[], dec!(100), &mut budget).is_none());
        assert!(take_bids(&[], dec!(100), &mut budget).is_none());
    }

    #[test]
    fn test_single_order_spans_levels() {
        let asks = levels(&[(97, -2), (98, -3), (99, -1)]);
        let mut budget = PositionBudget::new(0, 50);
        let (price, qty) = take_asks(&asks, dec!(100), &mut budget).unwrap();
        // All three levels consumed, priced at the worst one.
        assert_eq!(price, Price::new(99));
        assert_eq!(qty, Qty::new(6));
    }
}
