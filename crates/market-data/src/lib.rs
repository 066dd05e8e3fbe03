// In crates/market-data/src/lib.rs

use chrono::{DateTime, Utc};
use core_types::{Candle, Instrument};
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

/// Parses candlestick JSON into a validated `CandleSet`.
///
/// Accepts either the provider envelope (`{"instrument", "granularity",
/// "candles": [...]}`) or a flat array of `{time, open, high, low, close}`
/// objects. Every price must be present and numeric, and timestamps must be
/// strictly ascending.
pub fn parse_candles(json: &str) -> Result<CandleSet> {
    let value: Value = serde_json::from_str(json)?;

    // The provider returns an error object instead of candles on failure.
    if let Some(msg) = value.get("errorMessage").and_then(Value::as_str) {
        return Err(Error::ApiError { msg: msg.to_string() });
    }

    let set = match serde_json::from_value::<CandlePayload>(value)? {
        CandlePayload::Envelope(response) => {
            let candles = response
                .candles
                .into_iter()
                .enumerate()
                .map(|(i, raw)| convert_raw(i, raw))
                .collect::<Result<Vec<_>>>()?;
            CandleSet {
                instrument: response.instrument.map(Instrument),
                granularity: response.granularity,
                candles,
            }
        }
        CandlePayload::Flat(flat) => {
            let candles = flat
                .into_iter()
                .enumerate()
                .map(|(i, raw)| convert_flat(i, raw))
                .collect::<Result<Vec<_>>>()?;
            CandleSet { instrument: None, granularity: None, candles }
        }
    };

    ensure_ascending(&set.candles)?;
    tracing::debug!(
        count = set.candles.len(),
        instrument = ?set.instrument,
        granularity = ?set.granularity,
        "Parsed candle series."
    );
    Ok(set)
}

/// Reads and parses a candle file.
pub fn load_candles(path: impl AsRef<Path>) -> Result<CandleSet> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_candles(&content)
}

// --- Conversion Helpers ---

fn convert_raw(index: usize, raw: RawCandle) -> Result<Candle> {
    let prices = raw.prices().ok_or_else(|| {
        Error::InvalidInput(format!("candle {index}: no mid, bid or ask prices"))
    })?;
    Ok(Candle {
        time: parse_time(index, &raw.time)?,
        open: parse_price(index, "open", prices.o.as_ref())?,
        high: parse_price(index, "high", prices.h.as_ref())?,
        low: parse_price(index, "low", prices.l.as_ref())?,
        close: parse_price(index, "close", prices.c.as_ref())?,
        volume: raw.volume,
        complete: raw.complete,
    })
}

fn convert_flat(index: usize, raw: FlatCandle) -> Result<Candle> {
    Ok(Candle {
        time: parse_time(index, &raw.time)?,
        open: parse_price(index, "open", raw.open.as_ref())?,
        high: parse_price(index, "high", raw.high.as_ref())?,
        low: parse_price(index, "low", raw.low.as_ref())?,
        close: parse_price(index, "close", raw.close.as_ref())?,
        volume: raw.volume,
        complete: true,
    })
}

fn parse_price(index: usize, field: &str, raw: Option<&Value>) -> Result<Decimal> {
    let text = match raw {
        None | Some(Value::Null) => {
            return Err(Error::InvalidInput(format!("candle {index}: missing {field} price")));
        }
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "candle {index}: non-numeric {field} price {other}"
            )));
        }
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            Error::InvalidInput(format!("candle {index}: non-numeric {field} price {text:?}"))
        })
}

fn parse_time(index: usize, raw: &RawTime) -> Result<DateTime<Utc>> {
    let parsed = match raw {
        RawTime::Seconds(secs) => DateTime::from_timestamp(*secs, 0),
        RawTime::Text(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| parse_unix_text(text)),
    };
    parsed.ok_or_else(|| Error::InvalidInput(format!("candle {index}: invalid time {raw:?}")))
}

/// Parses the provider's `"1704067200.000000000"` timestamp form.
fn parse_unix_text(text: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = text.split_once('.').unwrap_or((text, ""));
    let secs: i64 = secs.parse().ok()?;
    let nanos = if frac.is_empty() {
        0
    } else {
        if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        format!("{frac:0<9}").parse::<u32>().ok()?
    };
    DateTime::from_timestamp(secs, nanos)
}

fn ensure_ascending(candles: &[Candle]) -> Result<()> {
    for (i, pair) in candles.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(Error::InvalidInput(format!(
                "candle {}: time {} does not follow {}",
                i + 1,
                pair[1].time,
                pair[0].time
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_text_timestamps_keep_nanoseconds() {
        let dt = parse_unix_text("1704067200.500000000").unwrap();
        assert_eq!(dt.timestamp(), 1_704_067_200);
        assert_eq!(dt.timestamp_subsec_millis(), 500);
        assert_eq!(parse_unix_text("1704067200").unwrap().timestamp(), 1_704_067_200);
        assert!(parse_unix_text("yesterday").is_none());
    }

    #[test]
    fn numeric_prices_are_accepted() {
        let price = parse_price(0, "close", Some(&serde_json::json!(1.1))).unwrap();
        assert_eq!(price.to_string(), "1.1");
    }

    #[test]
    fn boolean_price_is_rejected() {
        let err = parse_price(2, "close", Some(&Value::Bool(true))).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg.starts_with("candle 2")));
    }
}
