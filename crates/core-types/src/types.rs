// In crates/core-types/src/types.rs

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A provider instrument identifier (e.g., "EUR_USD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument(pub String);

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single OHLC candlestick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// The opening time of the candle. Series are ordered by this key.
    pub time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Tick volume as reported by the provider.
    #[serde(default)]
    pub volume: u64,
    /// `false` while the candle is still forming.
    #[serde(default = "default_complete")]
    pub complete: bool,
}

fn default_complete() -> bool {
    true
}

impl Candle {
    /// The close price as an `f64`, for indicator math.
    pub fn close_f64(&self) -> Result<f64> {
        self.close.to_f64().ok_or_else(|| {
            Error::InvalidInput(format!(
                "close price {} at {} is not representable as f64",
                self.close, self.time
            ))
        })
    }
}

/// The direction handed to the trade synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// The tradable direction, if any. `Hold` has none.
    pub fn direction(self) -> Option<TradeDirection> {
        match self {
            Signal::Buy => Some(TradeDirection::Buy),
            Signal::Sell => Some(TradeDirection::Sell),
            Signal::Hold => None,
        }
    }
}

/// Anything other than "buy" or "sell" reads as `Hold`.
impl From<&str> for Signal {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("buy") {
            Signal::Buy
        } else if value.eq_ignore_ascii_case("sell") {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Buy => f.write_str("buy"),
            TradeDirection::Sell => f.write_str("sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivergenceKind {
    Bullish,
    Bearish,
}

impl DivergenceKind {
    /// Bullish events buy, bearish events sell.
    pub fn signal(self) -> Signal {
        match self {
            DivergenceKind::Bullish => Signal::Buy,
            DivergenceKind::Bearish => Signal::Sell,
        }
    }
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivergenceKind::Bullish => f.write_str("bullish"),
            DivergenceKind::Bearish => f.write_str("bearish"),
        }
    }
}

/// A divergence flagged at one bar of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivergenceEvent {
    /// Position of the flagged bar in the source series.
    pub index: usize,
    pub time: DateTime<Utc>,
    pub kind: DivergenceKind,
}

/// A synthetic trade instruction. Never submitted anywhere; callers decide
/// whether to log, display or store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInstruction {
    pub entry: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    #[serde(rename = "type")]
    pub direction: TradeDirection,
}
