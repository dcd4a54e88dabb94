//! Typed records for OANDA v20 REST and streaming payloads.
//!
//! Field names follow the wire format verbatim via `serde` renames. Every
//! monetary or quantity value OANDA sends as a string is kept as
//! [`DecimalText`] so that re-serializing a record reproduces the original
//! text exactly.

pub mod candle;
pub mod order;
pub mod pricing;
pub mod transaction;

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use candle::{Candle, Candles, Mid};
pub use order::{MarketOrderRequest, OnFillDetails, OrderRequest, PositionFill, TimeInForce};
pub use pricing::{Ask, Bid, Price, Pricing};
pub use transaction::{
    FullPrice, FullPriceAsk, FullPriceBid, OnFillData, OrderCreateTransaction,
    OrderCreateTransactionData, OrderFillTransactionData, TradeOpenedData,
};

/// A decimal number carried as the exact text the broker sent.
///
/// Deserializes only from a JSON string; a JSON number is a type error.
/// Use [`DecimalText::to_decimal`] when arithmetic is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalText(String);

impl DecimalText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the text into a [`Decimal`] without rounding.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::Decimal`](crate::OandaError::Decimal) if the
    /// text is not a representable decimal number.
    pub fn to_decimal(&self) -> crate::Result<Decimal> {
        Ok(Decimal::from_str_exact(&self.0)?)
    }
}

impl fmt::Display for DecimalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecimalText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for DecimalText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<Decimal> for DecimalText {
    fn from(value: Decimal) -> Self {
        Self(value.to_string())
    }
}

/// Keep-alive message interleaved with prices on the pricing stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heartbeat {
    pub time: String,
    #[serde(rename = "type")]
    pub tpe: String,
}

/// Body OANDA returns alongside a 4xx/5xx status.
///
/// `errorMessage` is required, so a success body does not decode as one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub error_message: String,
    /// Present on order rejections (e.g. `"INSUFFICIENT_MARGIN"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    #[serde(
        default,
        rename = "lastTransactionID",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_transaction_id: Option<String>,
    #[serde(
        default,
        rename = "relatedTransactionIDs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub related_transaction_ids: Vec<String>,
}

/// One line of the pricing stream, selected by its `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    Heartbeat(Heartbeat),
    Price(Price),
    /// A message type this crate does not model.
    Unknown(serde_json::Value),
}
