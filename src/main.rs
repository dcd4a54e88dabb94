use oanda::OandaError;
use oanda::client::Client;
use oanda::config::fetch_config;
use oanda::decode::decode_pricing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), OandaError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let app_config = fetch_config()?;
    let client = Client::from_config(&app_config.oanda);

    let mut instruments: Vec<String> = std::env::args().skip(1).collect();
    if instruments.is_empty() {
        instruments.push("EUR_USD".to_string());
    }

    info!(api_url = client.api_url(), ?instruments, "Fetching pricing");
    let response = client.get_pricing(&instruments).await?;
    if !response.is_success() {
        let error = response.decode_error()?;
        warn!(
            status = response.status.as_u16(),
            message = %error.error_message,
            "Pricing request rejected"
        );
        return Ok(());
    }

    let pricing = decode_pricing(&response.body)?;
    for price in &pricing.prices {
        let bid = price.bids.first().map(|b| b.price.as_str()).unwrap_or("-");
        let ask = price.asks.first().map(|a| a.price.as_str()).unwrap_or("-");
        info!(instrument = %price.instrument, bid, ask, time = %price.time, "Quote");
    }

    Ok(())
}
