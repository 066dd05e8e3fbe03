// In crates/strategies/src/momentum_divergence.rs

use crate::macd::MacdSeries;
use crate::trade::execute_trade;
use crate::types::MomentumDivergenceSettings;
use crate::{Result, Strategy};
use core_types::{Candle, TradeInstruction};

/// Trades bars where the close and the MACD histogram moved in opposite
/// directions over the last `divergence_length` bars.
#[derive(Debug, Clone, Default)]
pub struct MomentumDivergence {
    settings: MomentumDivergenceSettings,
}

impl MomentumDivergence {
    pub fn new(settings: MomentumDivergenceSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }
}

impl Strategy for MomentumDivergence {
    fn name(&self) -> &'static str {
        "MomentumDivergence"
    }

    fn run(&self, candles: &[Candle]) -> Result<Vec<TradeInstruction>> {
        let series = MacdSeries::from_candles(candles, &self.settings.macd())?;
        let (stop_loss, take_profit) = self.settings.distances()?;
        let length = self.settings.divergence_length as usize;

        let trades: Vec<TradeInstruction> = series
            .momentum_divergences(length)
            .filter_map(|event| {
                execute_trade(event.kind.signal(), candles[event.index].close, stop_loss, take_profit)
            })
            .collect();

        tracing::debug!(candles = candles.len(), length, trades = trades.len(), "Momentum divergence run finished.");
        Ok(trades)
    }
}
