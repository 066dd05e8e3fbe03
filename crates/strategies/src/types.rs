// In crates/strategies/src/types.rs

use crate::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Window lengths for the MACD indicator. Slow is conventionally longer than
/// fast, but that is not enforced.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MacdSettings {
    pub fast_period: u32,
    pub slow_period: u32,
    pub signal_period: u32,
}

impl Default for MacdSettings {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
            signal_period: default_signal_period(),
        }
    }
}

impl MacdSettings {
    pub fn validate(&self) -> Result<()> {
        for (name, period) in [
            ("fast_period", self.fast_period),
            ("slow_period", self.slow_period),
            ("signal_period", self.signal_period),
        ] {
            if period == 0 {
                return Err(Error::InvalidInput(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MacdDivergenceSettings {
    #[serde(default = "default_fast_period")]
    pub fast_period: u32,
    #[serde(default = "default_slow_period")]
    pub slow_period: u32,
    #[serde(default = "default_signal_period")]
    pub signal_period: u32,
    /// Stop-loss distance in absolute price units.
    #[serde(default = "default_stop_loss")]
    pub stop_loss: f64,
    /// Take-profit distance in absolute price units.
    #[serde(default = "default_take_profit")]
    pub take_profit: f64,
}

impl Default for MacdDivergenceSettings {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
            signal_period: default_signal_period(),
            stop_loss: default_stop_loss(),
            take_profit: default_take_profit(),
        }
    }
}

impl MacdDivergenceSettings {
    pub fn macd(&self) -> MacdSettings {
        MacdSettings {
            fast_period: self.fast_period,
            slow_period: self.slow_period,
            signal_period: self.signal_period,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.macd().validate()?;
        self.distances().map(|_| ())
    }

    /// The stop-loss and take-profit distances as decimals.
    pub fn distances(&self) -> Result<(Decimal, Decimal)> {
        Ok((
            to_distance("stop_loss", self.stop_loss)?,
            to_distance("take_profit", self.take_profit)?,
        ))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MomentumDivergenceSettings {
    #[serde(default = "default_fast_period")]
    pub fast_period: u32,
    #[serde(default = "default_slow_period")]
    pub slow_period: u32,
    #[serde(default = "default_signal_period")]
    pub signal_period: u32,
    /// How many bars back the close and histogram are compared against.
    #[serde(default = "default_divergence_length")]
    pub divergence_length: u32,
    #[serde(default = "default_stop_loss")]
    pub stop_loss: f64,
    #[serde(default = "default_take_profit")]
    pub take_profit: f64,
}

impl Default for MomentumDivergenceSettings {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
            signal_period: default_signal_period(),
            divergence_length: default_divergence_length(),
            stop_loss: default_stop_loss(),
            take_profit: default_take_profit(),
        }
    }
}

impl MomentumDivergenceSettings {
    pub fn macd(&self) -> MacdSettings {
        MacdSettings {
            fast_period: self.fast_period,
            slow_period: self.slow_period,
            signal_period: self.signal_period,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.macd().validate()?;
        if self.divergence_length == 0 {
            return Err(Error::InvalidInput("divergence_length must be positive".into()));
        }
        self.distances().map(|_| ())
    }

    pub fn distances(&self) -> Result<(Decimal, Decimal)> {
        Ok((
            to_distance("stop_loss", self.stop_loss)?,
            to_distance("take_profit", self.take_profit)?,
        ))
    }
}

fn to_distance(name: &str, value: f64) -> Result<Decimal> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "{name} must be a non-negative price distance, got {value}"
        )));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| Error::InvalidInput(format!("{name} {value} is out of range")))
}

// Helper functions for serde defaults
fn default_fast_period() -> u32 { 12 }
fn default_slow_period() -> u32 { 26 }
fn default_signal_period() -> u32 { 9 }
fn default_divergence_length() -> u32 { 5 }
fn default_stop_loss() -> f64 { 0.001 }
fn default_take_profit() -> f64 { 0.002 }
