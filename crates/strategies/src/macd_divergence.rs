// In crates/strategies/src/macd_divergence.rs

use crate::macd::MacdSeries;
use crate::trade::execute_trade;
use crate::types::MacdDivergenceSettings;
use crate::{Result, Strategy};
use core_types::{Candle, TradeInstruction};

/// Trades every bar where the MACD line and the close form opposite strict
/// local extremes.
#[derive(Debug, Clone, Default)]
pub struct MacdDivergence {
    /// The configuration for this strategy instance.
    settings: MacdDivergenceSettings,
}

impl MacdDivergence {
    /// Creates a new `MacdDivergence` strategy instance from its settings.
    pub fn new(settings: MacdDivergenceSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }
}

impl Strategy for MacdDivergence {
    fn name(&self) -> &'static str {
        "MacdDivergence"
    }

    fn run(&self, candles: &[Candle]) -> Result<Vec<TradeInstruction>> {
        // 1. Indicators. Any invalid close or period fails the whole run.
        let series = MacdSeries::from_candles(candles, &self.settings.macd())?;
        let (stop_loss, take_profit) = self.settings.distances()?;

        // 2. Divergences, each turned into a trade at that bar's close.
        let trades: Vec<TradeInstruction> = series
            .divergences()
            .filter_map(|event| {
                tracing::debug!(index = event.index, time = %event.time, kind = %event.kind, "MACD divergence.");
                execute_trade(event.kind.signal(), candles[event.index].close, stop_loss, take_profit)
            })
            .collect();

        tracing::debug!(candles = candles.len(), trades = trades.len(), "MACD divergence run finished.");
        Ok(trades)
    }
}
