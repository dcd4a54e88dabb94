//! Pricing snapshot and streamed price models.

use serde::{Deserialize, Serialize};

use super::DecimalText;

/// Response from `GET /v3/accounts/{id}/pricing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    pub prices: Vec<Price>,
    pub time: String,
}

/// Quote for a single instrument. Also sent as one line of the pricing stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Price {
    #[serde(rename = "type")]
    pub tpe: String,
    pub bids: Vec<Bid>,
    pub asks: Vec<Ask>,
    pub closeout_ask: DecimalText,
    pub closeout_bid: DecimalText,
    pub instrument: String,
    /// Deprecated upstream in favour of `tradeable`, still sent.
    pub status: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tradeable: Option<bool>,
}

/// One ask level. `liquidity` is an integer here, unlike [`FullPriceAsk`](super::FullPriceAsk).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ask {
    pub price: DecimalText,
    pub liquidity: i64,
}

/// One bid level. `liquidity` is an integer here, unlike [`FullPriceBid`](super::FullPriceBid).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bid {
    pub price: DecimalText,
    pub liquidity: i64,
}
