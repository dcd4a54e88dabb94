//! Instrument candle (OHLC) models.

use serde::{Deserialize, Serialize};

use super::DecimalText;

/// Response from `GET /v3/instruments/{instrument}/candles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candles {
    pub instrument: String,
    /// Granularity code such as `"M1"` or `"H4"`.
    pub granularity: String,
    pub candles: Vec<Candle>,
}

/// A single OHLC bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candle {
    /// `false` while the bar's time window is still open.
    pub complete: bool,
    pub volume: i64,
    pub time: String,
    pub mid: Mid,
}

/// Midpoint open/high/low/close.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mid {
    #[serde(rename = "o")]
    pub open: DecimalText,
    #[serde(rename = "h")]
    pub high: DecimalText,
    #[serde(rename = "l")]
    pub low: DecimalText,
    #[serde(rename = "c")]
    pub close: DecimalText,
}
