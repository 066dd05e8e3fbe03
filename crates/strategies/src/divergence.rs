// In crates/strategies/src/divergence.rs

use crate::{Error, Result};
use core_types::DivergenceKind;
use std::iter::FusedIterator;

/// `true` when `current` is strictly greater than both neighbours.
pub fn is_strict_local_max(prev: f64, current: f64, next: f64) -> bool {
    current > prev && current > next
}

/// `true` when `current` is strictly less than both neighbours.
pub fn is_strict_local_min(prev: f64, current: f64, next: f64) -> bool {
    current < prev && current < next
}

/// Classifies the middle bar of a three-bar window.
///
/// A MACD peak on a price trough is labelled bearish; a MACD trough on a
/// price peak is labelled bullish. Equal neighbours never qualify.
pub fn classify(closes: [f64; 3], macd: [f64; 3]) -> Option<DivergenceKind> {
    let [c0, c1, c2] = closes;
    let [m0, m1, m2] = macd;
    if is_strict_local_max(m0, m1, m2) && is_strict_local_min(c0, c1, c2) {
        Some(DivergenceKind::Bearish)
    } else if is_strict_local_min(m0, m1, m2) && is_strict_local_max(c0, c1, c2) {
        Some(DivergenceKind::Bullish)
    } else {
        None
    }
}

/// Lazily scans the interior bars of a series for divergences, yielding
/// `(index, kind)` in ascending index order.
///
/// Series shorter than three bars yield nothing.
#[derive(Debug, Clone)]
pub struct Divergences<'a> {
    closes: &'a [f64],
    macd: &'a [f64],
    index: usize,
}

impl<'a> Divergences<'a> {
    pub fn new(closes: &'a [f64], macd: &'a [f64]) -> Result<Self> {
        if closes.len() != macd.len() {
            return Err(Error::InvalidInput(format!(
                "close and MACD series differ in length ({} vs {})",
                closes.len(),
                macd.len()
            )));
        }
        Ok(Self::aligned(closes, macd))
    }

    /// Builds a scanner over slices already known to be aligned.
    pub(crate) fn aligned(closes: &'a [f64], macd: &'a [f64]) -> Self {
        let len = closes.len().min(macd.len());
        if len < 3 {
            tracing::debug!(len, "Series too short for divergence detection.");
        }
        Self { closes: &closes[..len], macd: &macd[..len], index: 1 }
    }
}

impl Iterator for Divergences<'_> {
    type Item = (usize, DivergenceKind);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index + 1 < self.closes.len() {
            let i = self.index;
            self.index += 1;
            let closes = [self.closes[i - 1], self.closes[i], self.closes[i + 1]];
            let macd = [self.macd[i - 1], self.macd[i], self.macd[i + 1]];
            if let Some(kind) = classify(closes, macd) {
                return Some((i, kind));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.closes.len().saturating_sub(self.index + 1)))
    }
}

impl FusedIterator for Divergences<'_> {}

/// Compares each bar with the bar `length` positions earlier: a higher close
/// with a lower histogram is bearish, a lower close with a higher histogram
/// is bullish.
pub fn momentum_divergences<'a>(
    closes: &'a [f64],
    histogram: &'a [f64],
    length: usize,
) -> impl Iterator<Item = (usize, DivergenceKind)> + 'a {
    let len = closes.len().min(histogram.len());
    let start = length.max(1);
    (start..len).filter_map(move |i| {
        let (close, prev_close) = (closes[i], closes[i - length]);
        let (hist, prev_hist) = (histogram[i], histogram[i - length]);
        if close > prev_close && hist < prev_hist {
            Some((i, DivergenceKind::Bearish))
        } else if close < prev_close && hist > prev_hist {
            Some((i, DivergenceKind::Bullish))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(closes: &[f64], macd: &[f64]) -> Vec<(usize, DivergenceKind)> {
        Divergences::new(closes, macd).unwrap().collect()
    }

    #[test]
    fn strict_extrema_reject_ties() {
        assert!(is_strict_local_max(0.0, 1.0, 0.0));
        assert!(!is_strict_local_max(1.0, 1.0, 0.0));
        assert!(!is_strict_local_max(0.0, 1.0, 1.0));
        assert!(is_strict_local_min(2.0, 1.0, 2.0));
        assert!(!is_strict_local_min(1.0, 1.0, 2.0));
        assert!(!is_strict_local_min(2.0, 1.0, 1.0));
    }

    #[test]
    fn macd_peak_on_price_trough_is_bearish() {
        assert_eq!(scan(&[2.0, 1.0, 2.0], &[0.0, 1.0, 0.0]), vec![(1, DivergenceKind::Bearish)]);
    }

    #[test]
    fn macd_trough_on_price_peak_is_bullish() {
        assert_eq!(scan(&[1.0, 2.0, 1.0], &[1.0, 0.0, 1.0]), vec![(1, DivergenceKind::Bullish)]);
    }

    #[test]
    fn agreeing_extrema_do_not_emit() {
        // Price and MACD peak together.
        assert!(scan(&[1.0, 2.0, 1.0], &[0.0, 1.0, 0.0]).is_empty());
    }

    #[test]
    fn ties_never_emit() {
        assert!(scan(&[2.0, 1.0, 1.0], &[0.0, 1.0, 0.0]).is_empty());
        assert!(scan(&[2.0, 1.0, 2.0], &[1.0, 1.0, 0.0]).is_empty());
    }

    #[test]
    fn short_series_yield_nothing() {
        assert!(scan(&[], &[]).is_empty());
        assert!(scan(&[1.0], &[0.0]).is_empty());
        assert!(scan(&[2.0, 1.0], &[0.0, 1.0]).is_empty());
    }

    #[test]
    fn monotone_price_yields_nothing() {
        let closes: Vec<f64> = (0..20).map(|i| 1.0 + i as f64 * 0.01).collect();
        let flat = vec![0.5; 20];
        assert!(scan(&closes, &flat).is_empty());

        let zigzag: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 0.0 } else { 1.0 }).collect();
        assert!(scan(&closes, &zigzag).is_empty());
    }

    #[test]
    fn events_come_in_ascending_order() {
        let closes = [2.0, 1.0, 2.0, 3.0, 2.0];
        let macd = [0.0, 1.0, 0.5, 0.0, 1.0];
        assert_eq!(
            scan(&closes, &macd),
            vec![(1, DivergenceKind::Bearish), (3, DivergenceKind::Bullish)]
        );
    }

    #[test]
    fn mismatched_lengths_are_invalid_input() {
        assert!(matches!(Divergences::new(&[1.0, 2.0], &[1.0]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn size_hint_bounds_interior_bars() {
        let closes = [1.0; 5];
        let it = Divergences::new(&closes, &closes).unwrap();
        assert_eq!(it.size_hint(), (0, Some(3)));
    }

    #[test]
    fn momentum_compares_against_lagged_bar() {
        let closes = [1.0, 1.1, 1.2, 0.9, 1.2];
        let hist = [0.5, 0.2, 0.1, 0.6, 0.5];
        let events: Vec<_> = momentum_divergences(&closes, &hist, 2).collect();
        // i=2: close 1.2 > 1.0, hist 0.1 < 0.5 -> bearish
        // i=3: close 0.9 < 1.1, hist 0.6 > 0.2 -> bullish
        // i=4: close 1.2 == 1.2 -> nothing
        assert_eq!(events, vec![(2, DivergenceKind::Bearish), (3, DivergenceKind::Bullish)]);
    }
}
