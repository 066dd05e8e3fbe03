// In crates/strategies/src/trade.rs

use core_types::{Signal, TradeDirection, TradeInstruction};
use rust_decimal::Decimal;

/// Builds a trade instruction around `price`.
///
/// Buys place the stop below and the target above the entry; sells mirror
/// that. A `Hold` signal produces no instruction, and neither does a level
/// that would overflow `Decimal`.
pub fn execute_trade(
    signal: Signal,
    price: Decimal,
    stop_loss_distance: Decimal,
    take_profit_distance: Decimal,
) -> Option<TradeInstruction> {
    let direction = signal.direction()?;
    let (stop_loss, take_profit) = match direction {
        TradeDirection::Buy => (
            price.checked_sub(stop_loss_distance)?,
            price.checked_add(take_profit_distance)?,
        ),
        TradeDirection::Sell => (
            price.checked_add(stop_loss_distance)?,
            price.checked_sub(take_profit_distance)?,
        ),
    };
    Some(TradeInstruction { entry: price, stop_loss, take_profit, direction })
}
