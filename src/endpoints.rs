//! URL builders for the v20 endpoints whose responses this crate decodes.
//!
//! Base URLs come from configuration (see [`crate::config`]); a trailing
//! slash on the base is tolerated.

/// Candle granularities accepted by the instrument candles endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    S5,
    S10,
    S15,
    S30,
    M1,
    M2,
    M4,
    M5,
    M10,
    M15,
    M30,
    H1,
    H2,
    H3,
    H4,
    H6,
    H8,
    H12,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Returns the wire-format granularity code expected by OANDA.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::S5 => "S5",
            Granularity::S10 => "S10",
            Granularity::S15 => "S15",
            Granularity::S30 => "S30",
            Granularity::M1 => "M1",
            Granularity::M2 => "M2",
            Granularity::M4 => "M4",
            Granularity::M5 => "M5",
            Granularity::M10 => "M10",
            Granularity::M15 => "M15",
            Granularity::M30 => "M30",
            Granularity::H1 => "H1",
            Granularity::H2 => "H2",
            Granularity::H3 => "H3",
            Granularity::H4 => "H4",
            Granularity::H6 => "H6",
            Granularity::H8 => "H8",
            Granularity::H12 => "H12",
            Granularity::Daily => "D",
            Granularity::Weekly => "W",
            Granularity::Monthly => "M",
        }
    }
}

/// `GET /v3/accounts/{account}/pricing?instruments=...`
pub fn pricing_url(base: &str, account_id: &str, instruments: &[String]) -> String {
    format!(
        "{}/v3/accounts/{account_id}/pricing?instruments={}",
        trim(base),
        join_instruments(instruments)
    )
}

/// `GET /v3/accounts/{account}/pricing/stream?instruments=...` on the stream host.
pub fn pricing_stream_url(stream_base: &str, account_id: &str, instruments: &[String]) -> String {
    format!(
        "{}/v3/accounts/{account_id}/pricing/stream?instruments={}",
        trim(stream_base),
        join_instruments(instruments)
    )
}

/// `GET /v3/instruments/{instrument}/candles` with midpoint prices.
pub fn candles_url(base: &str, instrument: &str, granularity: Granularity, count: u32) -> String {
    format!(
        "{}/v3/instruments/{instrument}/candles?price=M&granularity={}&count={count}",
        trim(base),
        granularity.as_str()
    )
}

/// `POST /v3/accounts/{account}/orders`
pub fn orders_url(base: &str, account_id: &str) -> String {
    format!("{}/v3/accounts/{account_id}/orders", trim(base))
}

fn trim(base: &str) -> &str {
    base.trim_end_matches('/')
}

/// Comma-separated list, with the comma percent-encoded.
fn join_instruments(instruments: &[String]) -> String {
    instruments.join("%2C")
}
