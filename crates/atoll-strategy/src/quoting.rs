//! Per-product quoting.
//!
//! One invocation per product per cycle. Builds a fresh position budget
//! from the held position and the product's limit, then runs the variant's
//! sub-protocols in a fixed order: aggressive takes, passive resting
//! quotes, liquidation. Each sub-protocol consumes from the shared budget,
//! so the combined orders can never breach the position limit even if every
//! one of them fills.

use atoll_core::{Order, PositionBudget, Price, Qty};
use atoll_feed::ProductView;
use atoll_signal::{FairPrice, TrendEstimate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::trace;

use crate::config::{ProductParams, StrategyKind};
use crate::liquidate::liquidate;
use crate::take::{take_asks, take_bids};

/// Produce this cycle's candidate orders for one product.
///
/// `trend` is required only by [`StrategyKind::MeanReversion`]; other
/// variants ignore it. The returned orders are raw candidates and must go
/// through [`crate::aggregate_orders`] before leaving the agent.
pub fn quote_product(
    params: &ProductParams,
    view: &ProductView,
    fair: &FairPrice,
    trend: Option<&TrendEstimate>,
) -> Vec<Order> {
    let mut budget = PositionBudget::new(view.position, params.position_limit);
    let mut orders = Vec::new();

    match &params.strategy {
        StrategyKind::StableValue { anchor } => {
            maker_cycle(params, view, anchor.to_decimal(), &mut budget, &mut orders);
        }
        StrategyKind::EmaMaker => {
            maker_cycle(params, view, fair.ema, &mut budget, &mut orders);
        }
        StrategyKind::EmaTaker => {
            let spread = Decimal::from(params.mm_epsilon);
            push_take(
                &view.symbol,
                take_asks(&view.asks, fair.ema - spread, &mut budget),
                &mut orders,
            );
            push_take(
                &view.symbol,
                take_bids(&view.bids, fair.ema + spread, &mut budget),
                &mut orders,
            );
            push_take(
                &view.symbol,
                liquidate(
                    &view.asks,
                    &view.bids,
                    fair.ema,
                    params.liquidation_threshold,
                    params.liquidation_fraction,
                    &mut budget,
                ),
                &mut orders,
            );
        }
        StrategyKind::MeanReversion => {
            mean_reversion_cycle(params, view, fair, trend, &mut budget, &mut orders);
        }
    }

    trace!(
        symbol = %view.symbol,
        candidates = orders.len(),
        effective_position = budget.effective_position(),
        "quoted product"
    );
    orders
}

/// Take + passive-post + liquidation cycle around a fixed center price.
fn maker_cycle(
    params: &ProductParams,
    view: &ProductView,
    center: Decimal,
    budget: &mut PositionBudget,
    orders: &mut Vec<Order>,
) {
    let spread = Decimal::from(params.mm_epsilon);
    push_take(
        &view.symbol,
        take_asks(&view.asks, center - spread, budget),
        orders,
    );
    push_take(
        &view.symbol,
        take_bids(&view.bids, center + spread, budget),
        orders,
    );

    let grid = Price::from_decimal(center);
    let bid_lots = budget.consume_long(params.quote_size);
    if bid_lots > 0 {
        orders.push(Order::buy(
            view.symbol.clone(),
            grid - Price::new(params.makemm_epsilon),
            bid_lots,
        ));
    }
    let ask_lots = budget.consume_short(params.quote_size);
    if ask_lots > 0 {
        orders.push(Order::sell(
            view.symbol.clone(),
            grid + Price::new(params.makemm_epsilon),
            ask_lots,
        ));
    }

    push_take(
        &view.symbol,
        liquidate(
            &view.asks,
            &view.bids,
            center,
            params.liquidation_threshold,
            params.liquidation_fraction,
            budget,
        ),
        orders,
    );
}

/// Reversion entries gated twice: the regime slope must be flat (a trending
/// market suppresses entries) and the popular average must sit outside the
/// deadband around the EMA. Everything else is liquidation only, priced at
/// the trend projection so unwinds track where the fit says the market is
/// heading.
fn mean_reversion_cycle(
    params: &ProductParams,
    view: &ProductView,
    fair: &FairPrice,
    trend: Option<&TrendEstimate>,
    budget: &mut PositionBudget,
    orders: &mut Vec<Order>,
) {
    let regime_flat = trend
        .map(|t| t.regime_slope.abs() <= params.trend_epsilon)
        .unwrap_or(false);
    let deadband = params.mr_epsilon;

    if regime_flat && fair.popular_average < fair.ema - deadband {
        push_take(
            &view.symbol,
            take_asks(&view.asks, fair.ema - deadband * Decimal::TWO, budget),
            orders,
        );
        return;
    }
    if regime_flat && fair.popular_average > fair.ema + deadband {
        push_take(
            &view.symbol,
            take_bids(&view.bids, fair.ema + deadband * Decimal::TWO, budget),
            orders,
        );
        return;
    }

    let unwind_price = trend
        .and_then(|t| Decimal::from_f64(t.projected))
        .unwrap_or(fair.ema);
    push_take(
        &view.symbol,
        liquidate(
            &view.asks,
            &view.bids,
            unwind_price,
            params.liquidation_threshold,
            params.liquidation_fraction,
            budget,
        ),
        orders,
    );
}

fn push_take(
    symbol: &atoll_core::Symbol,
    taken: Option<(Price, Qty)>,
    orders: &mut Vec<Order>,
) {
    if let Some((price, qty)) = taken {
        orders.push(Order::new(symbol.clone(), price, qty));
    }
}
