use market_data::{Error, parse_candles};
use rust_decimal_macros::dec;

const ENVELOPE: &str = r#"{
    "instrument": "EUR_USD",
    "granularity": "H1",
    "candles": [
        {"complete": true, "volume": 812, "time": "2024-01-02T10:00:00.000000000Z",
         "mid": {"o": "1.09410", "h": "1.09482", "l": "1.09388", "c": "1.09455"}},
        {"complete": true, "volume": 640, "time": "2024-01-02T11:00:00.000000000Z",
         "mid": {"o": "1.09455", "h": "1.09501", "l": "1.09402", "c": "1.09420"}},
        {"complete": false, "volume": 95, "time": "2024-01-02T12:00:00.000000000Z",
         "mid": {"o": "1.09420", "h": "1.09433", "l": "1.09399", "c": "1.09411"}}
    ]
}"#;

#[test]
fn parses_provider_envelope() {
    let set = parse_candles(ENVELOPE).unwrap();
    assert_eq!(set.instrument.as_ref().unwrap().0, "EUR_USD");
    assert_eq!(set.granularity.as_deref(), Some("H1"));
    assert_eq!(set.candles.len(), 3);
    assert_eq!(set.candles[0].close, dec!(1.09455));
    assert_eq!(set.candles[1].volume, 640);
    assert!(!set.candles[2].complete);
}

#[test]
fn complete_only_drops_forming_candle() {
    let set = parse_candles(ENVELOPE).unwrap().complete_only();
    assert_eq!(set.candles.len(), 2);
}

#[test]
fn parses_flat_frontend_candles() {
    let json = r#"[
        {"time": 1704189600, "open": 1.0941, "high": 1.0948, "low": 1.0938, "close": 1.0945},
        {"time": 1704193200, "open": "1.0945", "high": "1.0950", "low": "1.0940", "close": "1.0942"}
    ]"#;
    let set = parse_candles(json).unwrap();
    assert!(set.instrument.is_none());
    assert_eq!(set.candles[0].close, dec!(1.0945));
    assert_eq!(set.candles[1].close, dec!(1.0942));
    assert_eq!(set.candles[1].time.timestamp(), 1_704_193_200);
}

#[test]
fn falls_back_to_bid_prices() {
    let json = r#"{"candles": [
        {"time": "2024-01-02T10:00:00Z", "bid": {"o": "1.1", "h": "1.2", "l": "1.0", "c": "1.15"}}
    ]}"#;
    let set = parse_candles(json).unwrap();
    assert_eq!(set.candles[0].close, dec!(1.15));
}

#[test]
fn missing_close_is_invalid_input() {
    let json = r#"[{"time": 1704189600, "open": "1.1", "high": "1.2", "low": "1.0"}]"#;
    match parse_candles(json) {
        Err(Error::InvalidInput(msg)) => assert!(msg.contains("missing close")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn non_numeric_close_is_invalid_input() {
    let json = r#"[{"time": 1704189600, "open": "1.1", "high": "1.2", "low": "1.0", "close": "n/a"}]"#;
    match parse_candles(json) {
        Err(Error::InvalidInput(msg)) => assert!(msg.contains("non-numeric close")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn out_of_order_candles_are_rejected() {
    let json = r#"[
        {"time": 1704193200, "open": 1, "high": 1, "low": 1, "close": 1},
        {"time": 1704189600, "open": 1, "high": 1, "low": 1, "close": 1}
    ]"#;
    assert!(matches!(parse_candles(json), Err(Error::InvalidInput(_))));
}

#[test]
fn provider_error_object_is_surfaced() {
    let json = r#"{"errorMessage": "Invalid value specified for 'granularity'"}"#;
    match parse_candles(json) {
        Err(Error::ApiError { msg }) => assert!(msg.contains("granularity")),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[test]
fn empty_series_is_valid() {
    let set = parse_candles("[]").unwrap();
    assert!(set.candles.is_empty());
}
