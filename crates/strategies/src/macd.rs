// In crates/strategies/src/macd.rs

use crate::divergence::{Divergences, momentum_divergences};
use crate::types::MacdSettings;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use core_types::{Candle, DivergenceEvent, DivergenceKind};
use serde::Serialize;
use ta::Next;
use ta::indicators::ExponentialMovingAverage as Ema;

/// Computes an exponential moving average over `values`.
///
/// The smoothing weight is `2 / (period + 1)` and the first output equals the
/// first input; there is no warm-up window.
pub fn ema(values: &[f64], period: u32) -> Result<Vec<f64>> {
    let mut indicator = Ema::new(period as usize)
        .map_err(|_| Error::InvalidInput(format!("EMA period must be positive, got {period}")))?;
    Ok(values.iter().map(|v| indicator.next(*v)).collect())
}

/// The MACD lines derived from a close series, aligned by index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdLines {
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdLines {
    /// Computes the five MACD lines for `closes`.
    ///
    /// Fails without computing anything if a period is zero or a close is
    /// not finite.
    pub fn compute(closes: &[f64], settings: &MacdSettings) -> Result<Self> {
        settings.validate()?;
        if let Some(i) = closes.iter().position(|c| !c.is_finite()) {
            return Err(Error::InvalidInput(format!("close at index {i} is not a finite number")));
        }

        let ema_fast = ema(closes, settings.fast_period)?;
        let ema_slow = ema(closes, settings.slow_period)?;
        let macd: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
        let signal = ema(&macd, settings.signal_period)?;
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        Ok(Self { ema_fast, ema_slow, macd, signal, histogram })
    }
}

/// One row of a `MacdSeries`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdRow {
    pub time: DateTime<Utc>,
    pub close: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// A candle series augmented with its MACD lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdSeries {
    pub times: Vec<DateTime<Utc>>,
    pub closes: Vec<f64>,
    pub lines: MacdLines,
}

impl MacdSeries {
    pub fn from_candles(candles: &[Candle], settings: &MacdSettings) -> Result<Self> {
        let closes = candles
            .iter()
            .map(Candle::close_f64)
            .collect::<core_types::Result<Vec<_>>>()?;
        let lines = MacdLines::compute(&closes, settings)?;
        let times = candles.iter().map(|c| c.time).collect();
        Ok(Self { times, closes, lines })
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<MacdRow> {
        Some(MacdRow {
            time: *self.times.get(i)?,
            close: *self.closes.get(i)?,
            ema_fast: self.lines.ema_fast[i],
            ema_slow: self.lines.ema_slow[i],
            macd: self.lines.macd[i],
            signal: self.lines.signal[i],
            histogram: self.lines.histogram[i],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = MacdRow> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }

    /// Local-extremum divergences, lazily, in ascending time order.
    pub fn divergences(&self) -> impl Iterator<Item = DivergenceEvent> + '_ {
        Divergences::aligned(&self.closes, &self.lines.macd).map(|(i, kind)| self.event(i, kind))
    }

    /// Divergences between the close and the MACD histogram measured
    /// `length` bars apart.
    pub fn momentum_divergences(&self, length: usize) -> impl Iterator<Item = DivergenceEvent> + '_ {
        momentum_divergences(&self.closes, &self.lines.histogram, length)
            .map(|(i, kind)| self.event(i, kind))
    }

    fn event(&self, index: usize, kind: DivergenceKind) -> DivergenceEvent {
        DivergenceEvent { index, time: self.times[index], kind }
    }
}
