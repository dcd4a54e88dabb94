//! Order create and fill transaction models.
//!
//! Returned by `POST /v3/accounts/{id}/orders`. A filled market order
//! carries both an `orderCreateTransaction` and an `orderFillTransaction`;
//! a resting order carries only the former.

use serde::{Deserialize, Serialize};

use super::DecimalText;

/// Response envelope for a submitted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderCreateTransaction {
    pub order_create_transaction: OrderCreateTransactionData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction: Option<OrderFillTransactionData>,
    #[serde(rename = "relatedTransactionIDs")]
    pub related_transaction_ids: Vec<String>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// The broker's record of the created order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderCreateTransactionData {
    // -- Identifiers --
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "accountID")]
    pub account_id: String,
    #[serde(rename = "batchID")]
    pub batch_id: String,
    #[serde(rename = "requestID")]
    pub request_id: String,

    // -- Order details --
    pub time: String,
    /// Order type, e.g. `"MARKET_ORDER"` or `"LIMIT_ORDER"`.
    #[serde(rename = "type")]
    pub tpe: String,
    pub instrument: String,
    /// Signed: negative units are a sell.
    pub units: DecimalText,
    pub time_in_force: String,
    pub position_fill: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<DecimalText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<DecimalText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_condition: Option<String>,

    // -- Dependent orders --
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_on_fill: Option<OnFillData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_on_fill: Option<OnFillData>,
}

/// Take-profit or stop-loss order attached to a created order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnFillData {
    pub price: DecimalText,
    pub time_in_force: String,
    #[serde(rename = "gtdTime", skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<String>,
}

/// The broker's record of the fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderFillTransactionData {
    // -- Identifiers --
    pub id: String,
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "accountID")]
    pub account_id: String,
    #[serde(rename = "batchID")]
    pub batch_id: String,
    #[serde(rename = "requestID")]
    pub request_id: String,

    // -- Fill details --
    pub time: String,
    #[serde(rename = "type")]
    pub tpe: String,
    pub instrument: String,
    pub units: DecimalText,
    pub reason: String,
    pub price: DecimalText,
    #[serde(rename = "fullVWAP")]
    pub full_vwap: DecimalText,

    // -- Account effect --
    pub pl: DecimalText,
    pub financing: DecimalText,
    pub commission: DecimalText,
    pub guaranteed_execution_fee: DecimalText,
    pub half_spread_cost: DecimalText,
    pub account_balance: DecimalText,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_opened: Option<TradeOpenedData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_price: Option<FullPrice>,
}

/// Trade opened as a result of a fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TradeOpenedData {
    #[serde(rename = "tradeID")]
    pub trade_id: String,
    pub units: DecimalText,
    pub price: DecimalText,
    pub guaranteed_execution_fee: DecimalText,
    pub half_spread_cost: DecimalText,
    pub initial_margin_required: DecimalText,
}

/// Price context captured at fill time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FullPrice {
    #[serde(rename = "type")]
    pub tpe: String,
    pub bids: Vec<FullPriceBid>,
    pub asks: Vec<FullPriceAsk>,
    pub closeout_bid: DecimalText,
    pub closeout_ask: DecimalText,
    pub timestamp: String,
}

/// Ask level at fill time. Liquidity arrives as decimal text here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullPriceAsk {
    pub price: DecimalText,
    pub liquidity: DecimalText,
}

/// Bid level at fill time. Liquidity arrives as decimal text here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullPriceBid {
    pub price: DecimalText,
    pub liquidity: DecimalText,
}
