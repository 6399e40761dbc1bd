//! Per-cycle driver.
//!
//! One [`Agent`] lives for the whole run and owns all per-product state.
//! Each cycle walks the configured products in symbol order, so output is
//! deterministic for a given snapshot history.

use atoll_core::{Order, Price, Qty, Symbol};
use atoll_feed::{CycleSnapshot, ProductView};
use atoll_signal::{estimate_trend, FairPriceState, SignalConfig};
use atoll_strategy::{aggregate_orders, quote_product, ProductParams};
use atoll_telemetry::CycleLogger;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Harness response for one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutput {
    /// At most one order per product and price, as `[price, qty]` pairs.
    pub orders: BTreeMap<Symbol, Vec<(Price, Qty)>>,
    /// Conversion requests; this agent never converts.
    pub conversions: i64,
    /// Opaque state blob for the next cycle. In-memory state is the
    /// primary channel, so this stays empty.
    pub trader_data: String,
}

impl CycleOutput {
    pub fn empty() -> Self {
        Self {
            orders: BTreeMap::new(),
            conversions: 0,
            trader_data: String::new(),
        }
    }
}

/// The quoting agent: configuration plus all cross-cycle product state.
pub struct Agent {
    signal: SignalConfig,
    products: Vec<(Symbol, ProductParams)>,
    states: HashMap<Symbol, FairPriceState>,
    logger: CycleLogger,
}

impl Agent {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let history_len = config.signal.history_len();
        let products: Vec<(Symbol, ProductParams)> = config
            .products
            .iter()
            .map(|(symbol, params)| (Symbol::from(symbol.clone()), params.clone()))
            .collect();
        let states = products
            .iter()
            .map(|(symbol, _)| (symbol.clone(), FairPriceState::new(history_len)))
            .collect();
        Ok(Self {
            signal: config.signal,
            products,
            states,
            logger: CycleLogger::new(config.log_budget),
        })
    }

    /// Free-text diagnostics buffer for the current cycle.
    pub fn logger(&mut self) -> &mut CycleLogger {
        &mut self.logger
    }

    /// Quote every configured product against one snapshot.
    ///
    /// A product that fails its turn is logged and skipped; the remaining
    /// products still quote. Products absent from the snapshot are skipped
    /// quietly.
    pub fn run_cycle(&mut self, snapshot: &CycleSnapshot) -> CycleOutput {
        let mut output = CycleOutput::empty();
        let mut emitted: Vec<Order> = Vec::new();

        for (symbol, params) in &self.products {
            let Some(state) = self.states.get_mut(symbol) else {
                continue;
            };
            match quote_one(&self.signal, state, snapshot, symbol, params) {
                Ok(Some(orders)) if !orders.is_empty() => {
                    let pairs = orders.iter().map(|o| (o.price, o.qty)).collect();
                    output.orders.insert(symbol.clone(), pairs);
                    emitted.extend(orders);
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(symbol = %symbol, %error, "product cycle failed, skipping");
                }
            }
        }

        self.logger.print(format!(
            "cycle {}: {} product(s) quoted, {} order(s)",
            snapshot.timestamp,
            output.orders.len(),
            emitted.len()
        ));
        if let Err(error) = self.logger.flush(
            snapshot,
            &emitted,
            output.conversions,
            &output.trader_data,
        ) {
            warn!(%error, "diagnostics flush failed");
        }
        output
    }
}

/// One product's turn: reader, estimators, strategy, aggregator.
fn quote_one(
    signal: &SignalConfig,
    state: &mut FairPriceState,
    snapshot: &CycleSnapshot,
    symbol: &Symbol,
    params: &ProductParams,
) -> AppResult<Option<Vec<Order>>> {
    let Some(view) = ProductView::from_snapshot(snapshot, symbol) else {
        debug!(%symbol, "no order depth this cycle");
        return Ok(None);
    };

    let Some(fair) = state.update(&view.asks, &view.bids, params.exponential_param) else {
        debug!(%symbol, "fair price not yet established, sitting out");
        return Ok(None);
    };

    let trend = params
        .strategy
        .uses_trend()
        .then(|| estimate_trend(state, signal));

    let candidates = quote_product(params, &view, &fair, trend.as_ref());
    Ok(Some(aggregate_orders(candidates)))
}
