//! Fair price estimation from the order book.
//!
//! The "popular average": on each side of the book, take the price level(s)
//! carrying the extreme resting volume — the most negative ask volume and
//! the most positive bid volume — averaging the prices of exact ties. The
//! fair price is the mean of the two side representatives. The estimate is
//! smoothed across cycles with an EMA, and recent popular averages are kept
//! as regression input for the trend estimator.

use std::collections::VecDeque;

use atoll_core::{Price, Qty};
use rust_decimal::Decimal;
use tracing::debug;

/// One cycle's fair price estimate for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FairPrice {
    /// Instantaneous popular average.
    pub popular_average: Decimal,
    /// Exponentially smoothed popular average.
    pub ema: Decimal,
}

/// Representative price of one book side: the average of the price levels
/// tied on the side's extreme volume. `None` when the side has no level
/// with properly-signed volume.
fn side_representative(levels: &[(Price, Qty)], ask_side: bool) -> Option<Decimal> {
    let mut extreme: Option<i64> = None;
    let mut price_sum: i64 = 0;
    let mut count: i64 = 0;

    for &(price, qty) in levels {
        let vol = qty.inner();
        let proper = if ask_side { vol < 0 } else { vol > 0 };
        if !proper {
            continue;
        }
        let better = match extreme {
            None => true,
            // Asks: more negative wins. Bids: more positive wins.
            Some(e) if ask_side => vol < e,
            Some(e) => vol > e,
        };
        if better {
            extreme = Some(vol);
            price_sum = price.inner();
            count = 1;
        } else if extreme == Some(vol) {
            price_sum += price.inner();
            count += 1;
        }
    }

    (count > 0).then(|| Decimal::from(price_sum) / Decimal::from(count))
}

/// Popular average over both sides, `None` when either side is empty.
pub fn popular_average(asks: &[(Price, Qty)], bids: &[(Price, Qty)]) -> Option<Decimal> {
    let ask_rep = side_representative(asks, true)?;
    let bid_rep = side_representative(bids, false)?;
    Some((ask_rep + bid_rep) / Decimal::TWO)
}

/// Per-product fair price state, persistent across cycles.
///
/// Created uninitialized at agent start, updated exactly once per cycle
/// while the product's turn runs, never deleted during a run.
#[derive(Debug, Clone)]
pub struct FairPriceState {
    popular_average: Option<Decimal>,
    ema: Option<Decimal>,
    history: VecDeque<Decimal>,
    history_len: usize,
}

impl FairPriceState {
    pub fn new(history_len: usize) -> Self {
        Self {
            popular_average: None,
            ema: None,
            history: VecDeque::with_capacity(history_len),
            history_len,
        }
    }

    /// Whether at least one fair price has ever been observed.
    pub fn is_ready(&self) -> bool {
        self.popular_average.is_some()
    }

    /// Update from this cycle's ladders.
    ///
    /// When either book side is empty the previous cycle's popular average
    /// is reused — a hard invariant, never a division by zero. Returns
    /// `None` only when no estimate exists at all yet (first-ever cycle
    /// with a one-sided book): the product sits out this cycle.
    pub fn update(
        &mut self,
        asks: &[(Price, Qty)],
        bids: &[(Price, Qty)],
        alpha: Decimal,
    ) -> Option<FairPrice> {
        let pa = match popular_average(asks, bids) {
            Some(pa) => pa,
            None => {
                let prev = self.popular_average?;
                debug!(previous = %prev, "one-sided book, reusing previous fair price");
                prev
            }
        };

        let ema = match self.ema {
            Some(prev) => alpha * pa + (Decimal::ONE - alpha) * prev,
            None => pa,
        };

        self.popular_average = Some(pa);
        self.ema = Some(ema);
        if self.history.len() == self.history_len {
            self.history.pop_front();
        }
        self.history.push_back(pa);

        Some(FairPrice {
            popular_average: pa,
            ema,
        })
    }

    /// Fair-price history, oldest first.
    pub fn history(&self) -> &VecDeque<Decimal> {
        &self.history
    }

    /// The newest `window` history samples, oldest first.
    pub fn recent(&self, window: usize) -> Vec<Decimal> {
        let skip = self.history.len().saturating_sub(window);
        self.history.iter().skip(skip).copied().collect()
    }

    /// Simple moving average over the newest `window` samples.
    pub fn moving_average(&self, window: usize) -> Option<Decimal> {
        let recent = self.recent(window);
        if recent.is_empty() {
            return None;
        }
        let sum: Decimal = recent.iter().copied().sum();
        Some(sum / Decimal::from(recent.len() as i64))
    }
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
    fn test_popular_average_with_bid_tie() {
        // Most negative ask volume -5 at 101; bids tie at volume 4,
        // so the bid representative is (99 + 98) / 2 = 98.5.
        let asks = levels(&[(101, -5), (102, -3)]);
        let bids = levels(&[(99, 4), (98, 4)]);
        assert_eq!(popular_average(&asks, &bids), Some(dec!(99.75)));
    }

    #[test]
    fn test_popular_average_empty_side_is_none() {
        let asks = levels(&[(101, -5)]);
        assert_eq!(popular_average(&asks, &[]), None);
        assert_eq!(popular_average(&[], &[]), None);
    }

    #[test]
    fn test_zero_volume_levels_do_not_count() {
        // A bid ladder holding only zero volumes matches no extreme level.
        let asks = levels(&[(101, -5)]);
        let bids = levels(&[(99, 0)]);
        assert_eq!(popular_average(&asks, &bids), None);
    }

    #[test]
    fn test_ema_initialization_and_second_cycle() {
        let mut state = FairPriceState::new(16);
        let alpha = dec!(0.4);

        let asks1 = levels(&[(101, -5)]);
        let bids1 = levels(&[(99, 5)]);
        let fp1 = state.update(&asks1, &bids1, alpha).unwrap();
        // First observation: ema == popular average exactly.
        assert_eq!(fp1.popular_average, dec!(100));
        assert_eq!(fp1.ema, dec!(100));

        let asks2 = levels(&[(103, -5)]);
        let bids2 = levels(&[(101, 5)]);
        let fp2 = state.update(&asks2, &bids2, alpha).unwrap();
        // ema2 = 0.4 * 102 + 0.6 * 100 = 100.8
        assert_eq!(fp2.popular_average, dec!(102));
        assert_eq!(fp2.ema, dec!(100.8));
    }

    #[test]
    fn test_empty_side_reuses_previous_fair_price() {
        let mut state = FairPriceState::new(16);
        let alpha = dec!(1);

        let fp1 = state
            .update(&levels(&[(101, -5)]), &levels(&[(99, 5)]), alpha)
            .unwrap();
        assert_eq!(fp1.popular_average, dec!(100));

        // Bid side vanishes: exactly the previous value, no NaN, no panic.
        let fp2 = state.update(&levels(&[(101, -5)]), &[], alpha).unwrap();
        assert_eq!(fp2.popular_average, dec!(100));
        assert_eq!(fp2.ema, dec!(100));
    }

    #[test]
    fn test_first_cycle_with_empty_side_is_unready() {
        let mut state = FairPriceState::new(16);
        assert!(state
            .update(&levels(&[(101, -5)]), &[], dec!(0.5))
            .is_none());
        assert!(!state.is_ready());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_history_is_bounded_and_ordered() {
        let mut state = FairPriceState::new(3);
        for mid in [100, 102, 104, 106] {
            let asks = levels(&[(mid + 1, -5)]);
            let bids = levels(&[(mid - 1, 5)]);
            state.update(&asks, &bids, dec!(0.5)).unwrap();
        }
        let history: Vec<Decimal> = state.history().iter().copied().collect();
        assert_eq!(history, vec![dec!(102), dec!(104), dec!(106)]);
    }

    #[test]
    fn test_moving_average() {
        let mut state = FairPriceState::new(8);
        for mid in [100, 104] {
            let asks = levels(&[(mid + 1, -5)]);
            let bids = levels(&[(mid - 1, 5)]);
            state.update(&asks, &bids, dec!(0.5)).unwrap();
        }
        assert_eq!(state.moving_average(2), Some(dec!(102)));
        assert_eq!(state.moving_average(1), Some(dec!(104)));
        assert_eq!(FairPriceState::new(4).moving_average(2), None);
    }
}
