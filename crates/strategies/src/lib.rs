// In crates/strategies/src/lib.rs

use core_types::{Candle, TradeInstruction};

pub mod divergence;
pub mod error;
pub mod factory;
pub mod macd;
pub mod macd_divergence;
pub mod momentum_divergence;
pub mod registry;
pub mod trade;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use registry::StrategyRegistry;
pub use trade::execute_trade;

/// The universal interface for a signal strategy.
///
/// A strategy turns a candle series into synthetic trade instructions. It
/// holds only its settings, so every run is independent and the same
/// instance can be shared across threads.
pub trait Strategy: Send + Sync {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Runs the full pipeline over `candles`.
    fn run(&self, candles: &[Candle]) -> Result<Vec<TradeInstruction>>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn run(&self, candles: &[Candle]) -> Result<Vec<TradeInstruction>> {
        (**self).run(candles)
    }
}
