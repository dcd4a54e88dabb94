//! Order submission request bodies.
//!
//! Serialized as the JSON body of `POST /v3/accounts/{id}/orders`. The
//! response decodes into [`OrderCreateTransaction`](super::OrderCreateTransaction).

use serde::{Deserialize, Serialize};

use super::DecimalText;

/// How long an order remains active before it is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good until cancelled.
    Gtc,
    /// Good until the date in `gtdTime`.
    Gtd,
    /// Good for the trading day.
    Gfd,
    /// Filled entirely or cancelled.
    Fok,
    /// Immediate or cancel.
    Ioc,
}

/// How a fill interacts with an existing position in the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionFill {
    Default,
    OpenOnly,
    ReduceFirst,
    ReduceOnly,
}

/// Take-profit or stop-loss order created when the primary order fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnFillDetails {
    pub price: DecimalText,
    pub time_in_force: TimeInForce,
}

impl OnFillDetails {
    /// Good-until-cancelled dependent order at `price`.
    #[must_use]
    pub fn gtc(price: impl Into<DecimalText>) -> Self {
        Self {
            price: price.into(),
            time_in_force: TimeInForce::Gtc,
        }
    }
}

/// A market order specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrderRequest {
    /// Always `"MARKET"`.
    #[serde(rename = "type")]
    tpe: String,
    pub instrument: String,
    /// Positive to buy, negative to sell.
    pub units: DecimalText,
    pub time_in_force: TimeInForce,
    pub position_fill: PositionFill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<DecimalText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_on_fill: Option<OnFillDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_on_fill: Option<OnFillDetails>,
}

impl MarketOrderRequest {
    /// Creates a fill-or-kill market order with the default position fill.
    #[must_use]
    pub fn new(instrument: &str, units: impl Into<DecimalText>) -> Self {
        Self {
            tpe: "MARKET".to_string(),
            instrument: instrument.to_string(),
            units: units.into(),
            time_in_force: TimeInForce::Fok,
            position_fill: PositionFill::Default,
            price_bound: None,
            take_profit_on_fill: None,
            stop_loss_on_fill: None,
        }
    }

    #[must_use]
    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    #[must_use]
    pub fn with_position_fill(mut self, position_fill: PositionFill) -> Self {
        self.position_fill = position_fill;
        self
    }

    /// Worst acceptable fill price.
    #[must_use]
    pub fn with_price_bound(mut self, price: impl Into<DecimalText>) -> Self {
        self.price_bound = Some(price.into());
        self
    }

    #[must_use]
    pub fn with_take_profit(mut self, details: OnFillDetails) -> Self {
        self.take_profit_on_fill = Some(details);
        self
    }

    #[must_use]
    pub fn with_stop_loss(mut self, details: OnFillDetails) -> Self {
        self.stop_loss_on_fill = Some(details);
        self
    }
}

/// The `{"order": {...}}` envelope the orders endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub order: MarketOrderRequest,
}

impl From<MarketOrderRequest> for OrderRequest {
    fn from(order: MarketOrderRequest) -> Self {
        Self { order }
    }
}
