//! Per-cycle diagnostics payload.
//!
//! The harness ingests one compact JSON line of diagnostics per cycle and
//! silently drops anything past a hard byte limit. The payload packs the
//! snapshot, emitted orders, and accumulated free-text logs into positional
//! arrays, then truncates the three free-text fields (inbound state blob,
//! outbound state blob, log buffer) to an equal share of whatever the fixed
//! part leaves over, marking cuts with `"..."`.

use atoll_core::Order;
use atoll_feed::CycleSnapshot;
use serde_json::{json, Value};
use tracing::info;

use crate::error::TelemetryResult;

/// Harness ingestion limit in bytes.
pub const DEFAULT_LOG_BUDGET: usize = 3750;

/// Accumulates free-text log lines across one cycle and flushes them as a
/// single budget-bounded payload.
#[derive(Debug, Clone)]
pub struct CycleLogger {
    logs: String,
    budget: usize,
}

impl Default for CycleLogger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_BUDGET)
    }
}

impl CycleLogger {
    pub fn new(budget: usize) -> Self {
        Self {
            logs: String::new(),
            budget,
        }
    }

    /// Append one log line to the cycle buffer.
    pub fn print(&mut self, line: impl AsRef<str>) {
        self.logs.push_str(line.as_ref());
        self.logs.push('\n');
    }

    /// Build and emit this cycle's payload, then reset the log buffer.
    ///
    /// The payload never exceeds the byte budget: the fixed part is
    /// measured with the free-text fields empty, and each field gets a
    /// third of the remainder, counted in JSON-encoded bytes.
    pub fn flush(
        &mut self,
        snapshot: &CycleSnapshot,
        orders: &[Order],
        conversions: i64,
        trader_data: &str,
    ) -> TelemetryResult<String> {
        let base = payload(snapshot, orders, conversions, "", "", "")?;
        let item_budget = self.budget.saturating_sub(base.len()) / 3;

        let out = payload(
            snapshot,
            orders,
            conversions,
            &truncate(&snapshot.trader_data, item_budget),
            &truncate(trader_data, item_budget),
            &truncate(&self.logs, item_budget),
        )?;

        info!(target: "atoll::diagnostics", "{out}");
        self.logs.clear();
        Ok(out)
    }
}

fn payload(
    snapshot: &CycleSnapshot,
    orders: &[Order],
    conversions: i64,
    state_blob: &str,
    trader_data: &str,
    logs: &str,
) -> TelemetryResult<String> {
    let value = json!([
        compress_state(snapshot, state_blob),
        compress_orders(orders),
        conversions,
        trader_data,
        logs,
    ]);
    Ok(serde_json::to_string(&value)?)
}

fn compress_state(snapshot: &CycleSnapshot, state_blob: &str) -> Value {
    let mut depths = serde_json::Map::new();
    for (symbol, depth) in &snapshot.order_depths {
        depths.insert(
            symbol.to_string(),
            json!([&depth.buy_orders, &depth.sell_orders]),
        );
    }
    json!([
        snapshot.timestamp,
        state_blob,
        Value::Object(depths),
        &snapshot.position,
        &snapshot.observations,
    ])
}

fn compress_orders(orders: &[Order]) -> Value {
    Value::Array(
        orders
            .iter()
            .map(|o| json!([&o.symbol, o.price, o.qty]))
            .collect(),
    )
}

/// JSON-encoded length of `s` without the surrounding quotes.
fn encoded_len(s: &str) -> usize {
    serde_json::to_string(s)
        .map(|j| j.len().saturating_sub(2))
        .unwrap_or(usize::MAX)
}

/// Shorten `value` so its JSON-encoded form fits in `max` bytes, marking a
/// cut with a trailing `"..."`. Cuts land on char boundaries only.
fn truncate(value: &str, max: usize) -> String {
    if encoded_len(value) <= max {
        return value.to_string();
    }
    if max < 3 {
        return String::new();
    }
    let mut cut = value.len().min(max).saturating_sub(3);
    loop {
        while cut > 0 && !value.is_char_boundary(cut) {
            cut -= 1;
        }
        let candidate = format!("{}...", &value[..cut]);
        if cut == 0 || encoded_len(&candidate) <= max {
            return candidate;
        }
        cut -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_core::{OrderDepth, Price, Qty, Symbol};

    fn snapshot() -> CycleSnapshot {
        let mut depth = OrderDepth::new();
        depth.buy_orders.insert(Price::new(2016), Qty::new(12));
        depth.sell_orders.insert(Price::new(2019), Qty::new(-9));
        let mut snap = CycleSnapshot {
            timestamp: 1000,
            ..Default::default()
        };
        snap.order_depths.insert(Symbol::from("KELP"), depth);
        snap.position.insert(Symbol::from("KELP"), -4);
        snap
    }

    #[test]
    fn test_truncate_marks_cuts() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("abcdefghij", 2), "");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "préfixe très long";
        let cut = truncate(s, 8);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 8);
    }

    #[test]
    fn test_truncate_counts_encoded_bytes() {
        // Each newline encodes as two bytes, so fewer raw chars fit.
        let s = "a\nb\nc\nd\ne\nf\ng\nh";
        let cut = truncate(s, 10);
        assert!(encoded_len(&cut) <= 10);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_payload_within_budget() {
        let mut logger = CycleLogger::new(600);
        for i in 0..100 {
            logger.print(format!("line {i} with some padding text"));
        }
        let orders = vec![Order::buy("KELP", Price::new(2016), 5)];
        let out = logger.flush(&snapshot(), &orders, 0, "").unwrap();
        assert!(out.len() <= 600, "payload {} bytes", out.len());
        assert!(out.contains("..."));
    }

    #[test]
    fn test_flush_resets_buffer() {
        let mut logger = CycleLogger::default();
        logger.print("once");
        let first = logger.flush(&snapshot(), &[], 0, "").unwrap();
        assert!(first.contains("once"));
        let second = logger.flush(&snapshot(), &[], 0, "").unwrap();
        assert!(!second.contains("once"));
    }

    #[test]
    fn test_payload_shape() {
        let mut logger = CycleLogger::default();
        let orders = vec![Order::sell("KELP", Price::new(2019), 3)];
        let out = logger.flush(&snapshot(), &orders, 0, "").unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 5);
        // State leads with the timestamp; orders are positional triples.
        assert_eq!(arr[0][0], json!(1000));
        assert_eq!(arr[1], json!([["KELP", 2019, -3]]));
        assert_eq!(arr[2], json!(0));
    }

    #[test]
    fn test_depths_keep_string_price_keys() {
        let mut logger = CycleLogger::default();
        let out = logger.flush(&snapshot(), &[], 0, "").unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0][2]["KELP"][0]["2016"], json!(12));
        assert_eq!(value[0][2]["KELP"][1]["2019"], json!(-9));
    }
}
