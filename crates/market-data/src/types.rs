// In crates/market-data/src/types.rs

use core_types::{Candle, Instrument};
use serde::Deserialize;
use serde_json::Value;

/// The provider's candlestick envelope, as returned by its
/// `instruments/{instrument}/candles` endpoint.
#[derive(Debug, Deserialize)]
pub struct CandleResponse {
    /// The instrument symbol (e.g., "EUR_USD").
    pub instrument: Option<String>,
    /// The candle granularity (e.g., "H1").
    pub granularity: Option<String>,
    pub candles: Vec<RawCandle>,
}

/// A single provider candle. Prices arrive as decimal strings under one of
/// the `mid`, `bid` or `ask` components.
#[derive(Debug, Deserialize)]
pub struct RawCandle {
    pub time: RawTime,
    #[serde(default)]
    pub volume: u64,
    #[serde(default = "default_complete")]
    pub complete: bool,
    pub mid: Option<RawOhlc>,
    pub bid: Option<RawOhlc>,
    pub ask: Option<RawOhlc>,
}

impl RawCandle {
    /// The price component to read, preferring midpoint prices.
    pub fn prices(&self) -> Option<&RawOhlc> {
        self.mid.as_ref().or(self.bid.as_ref()).or(self.ask.as_ref())
    }
}

/// Price fields are kept raw so that missing and malformed values can be
/// reported individually.
#[derive(Debug, Deserialize)]
pub struct RawOhlc {
    pub o: Option<Value>,
    pub h: Option<Value>,
    pub l: Option<Value>,
    pub c: Option<Value>,
}

/// The flat candle shape served to the charting frontend.
#[derive(Debug, Deserialize)]
pub struct FlatCandle {
    pub time: RawTime,
    pub open: Option<Value>,
    pub high: Option<Value>,
    pub low: Option<Value>,
    pub close: Option<Value>,
    #[serde(default)]
    pub volume: u64,
}

/// Either unix seconds or a timestamp string (RFC 3339 or the provider's
/// `"seconds.nanoseconds"` form).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    Seconds(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CandlePayload {
    Flat(Vec<FlatCandle>),
    Envelope(CandleResponse),
}

fn default_complete() -> bool {
    true
}

/// A validated, time-ordered candle series.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSet {
    pub instrument: Option<Instrument>,
    pub granularity: Option<String>,
    pub candles: Vec<Candle>,
}

impl CandleSet {
    /// Drops candles that are still forming.
    pub fn complete_only(mut self) -> Self {
        self.candles.retain(|c| c.complete);
        self
    }
}
