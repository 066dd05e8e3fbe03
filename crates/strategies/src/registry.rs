// In crates/strategies/src/registry.rs

use crate::macd_divergence::MacdDivergence;
use crate::momentum_divergence::MomentumDivergence;
use crate::{Error, Result, Strategy};
use core_types::{Candle, TradeInstruction};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

/// A named signal pipeline. Its parameters are bound when it is built.
pub type Pipeline = Box<dyn Fn(&[Candle]) -> Result<Vec<TradeInstruction>> + Send + Sync>;

/// Maps strategy names to pipelines.
///
/// The registry is an ordinary value: build one, pass it by reference, and
/// share it freely between threads once populated.
#[derive(Default)]
pub struct StrategyRegistry {
    pipelines: BTreeMap<String, Pipeline>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in strategy with default settings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_strategy("macd_divergence", MacdDivergence::default());
        registry.register_strategy("momentum_divergence", MomentumDivergence::default());
        registry
    }

    /// Binds `pipeline` to `name`.
    ///
    /// Returns `false` and leaves the existing binding untouched if `name`
    /// is already registered.
    pub fn register<F>(&mut self, name: impl Into<String>, pipeline: F) -> bool
    where
        F: Fn(&[Candle]) -> Result<Vec<TradeInstruction>> + Send + Sync + 'static,
    {
        match self.pipelines.entry(name.into()) {
            Entry::Occupied(entry) => {
                tracing::warn!(name = %entry.key(), "Strategy already registered; keeping the existing one.");
                false
            }
            Entry::Vacant(entry) => {
                tracing::debug!(name = %entry.key(), "Strategy registered.");
                entry.insert(Box::new(pipeline));
                true
            }
        }
    }

    /// Registers a `Strategy` under `name`.
    pub fn register_strategy<S>(&mut self, name: impl Into<String>, strategy: S) -> bool
    where
        S: Strategy + 'static,
    {
        self.register(name, move |candles: &[Candle]| strategy.run(candles))
    }

    /// Unbinds `name`. Returns `false` if it was not registered.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.pipelines.remove(name).is_some() {
            tracing::debug!(name, "Strategy removed.");
            true
        } else {
            tracing::warn!(name, "Cannot remove unknown strategy.");
            false
        }
    }

    /// Runs the pipeline bound to `name` over `candles`.
    ///
    /// An unknown name is reported as `Error::UnknownStrategy`.
    pub fn execute(&self, name: &str, candles: &[Candle]) -> Result<Vec<TradeInstruction>> {
        match self.pipelines.get(name) {
            Some(pipeline) => pipeline(candles),
            None => {
                tracing::warn!(name, "Cannot execute unknown strategy.");
                Err(Error::UnknownStrategy(name.to_string()))
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pipelines.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("names", &self.pipelines.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TradeDirection;
    use rust_decimal::Decimal;

    fn single_trade(direction: TradeDirection) -> impl Fn(&[Candle]) -> Result<Vec<TradeInstruction>> {
        move |_: &[Candle]| {
            Ok(vec![TradeInstruction {
                entry: Decimal::ONE,
                stop_loss: Decimal::ONE,
                take_profit: Decimal::ONE,
                direction,
            }])
        }
    }

    #[test]
    fn duplicate_registration_keeps_original() {
        let mut registry = StrategyRegistry::new();
        assert!(registry.register("first", single_trade(TradeDirection::Buy)));
        assert!(!registry.register("first", single_trade(TradeDirection::Sell)));

        let trades = registry.execute("first", &[]).unwrap();
        assert_eq!(trades[0].direction, TradeDirection::Buy);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_unknown_is_a_noop() {
        let mut registry = StrategyRegistry::new();
        registry.register("keep", single_trade(TradeDirection::Buy));
        assert!(!registry.remove("missing"));
        assert!(registry.contains("keep"));
        assert!(registry.remove("keep"));
        assert!(registry.is_empty());
    }

    #[test]
    fn execute_unknown_reports_unknown_strategy() {
        let registry = StrategyRegistry::new();
        match registry.execute("nope", &[]) {
            Err(Error::UnknownStrategy(name)) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownStrategy, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_sorted_by_name() {
        let registry = StrategyRegistry::with_defaults();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["macd_divergence", "momentum_divergence"]);
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StrategyRegistry>();
    }
}
