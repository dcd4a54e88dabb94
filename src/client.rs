//! Authenticated HTTP request executor for the OANDA v20 REST API.
//!
//! Every request carries exactly three headers set by this crate:
//! `Content-Type: application/json`, `Authorization: Bearer <token>` and
//! `Connection: Keep-Alive`. Responses are returned with their status code
//! and raw body; a 4xx/5xx is not an error at this layer.

use std::fmt;

use reqwest::header::{AUTHORIZATION, CONNECTION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::config::OandaConfig;
use crate::endpoints::{self, Granularity};
use crate::error::OandaError;
use crate::models::{ApiErrorResponse, MarketOrderRequest, OrderRequest};
use crate::stream::PriceStream;
use crate::{Result, decode};

/// Method, URL and optional body of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestArgs {
    pub method: String,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

impl RequestArgs {
    pub fn new(method: &str, url: &str, body: Option<Vec<u8>>) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            body,
        }
    }

    /// A bodiless `GET`.
    pub fn get(url: &str) -> Self {
        Self::new("GET", url, None)
    }

    /// A `POST` whose body is `payload` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::RequestConstruction`] if `payload` cannot be
    /// encoded.
    pub fn post_json<T: Serialize>(url: &str, payload: &T) -> Result<Self> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| OandaError::RequestConstruction(format!("failed to encode body: {e}")))?;
        Ok(Self::new("POST", url, Some(body)))
    }
}

/// Status code and fully drained body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as `T` regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::Decode`] if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode::decode(&self.body)
    }

    /// Decodes the body as OANDA's error payload.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::Decode`] if the body is not an error payload.
    pub fn decode_error(&self) -> Result<ApiErrorResponse> {
        decode::decode(&self.body)
    }
}

/// Client for the OANDA REST and streaming hosts.
///
/// Holds no mutable state; clones share the underlying connection pool and
/// can be moved into independent tasks.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    stream_url: String,
    account_id: Option<String>,
    authorization: Zeroizing<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.api_url)
            .field("stream_url", &self.stream_url)
            .field("account_id", &self.account_id)
            .field("authorization", &"<redacted>")
            .finish()
    }
}

impl Client {
    /// Creates a client that sends `api_token` as its bearer credential.
    pub fn new(api_token: &str, api_url: &str, stream_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.to_string(),
            stream_url: stream_url.to_string(),
            account_id: None,
            authorization: Zeroizing::new(format!("Bearer {api_token}")),
        }
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &OandaConfig) -> Self {
        let mut client = Self::new(&config.api_token, &config.api_url, &config.stream_url);
        client.account_id = config.account_id.clone();
        client
    }

    /// Sets the account used by account-scoped calls.
    #[must_use]
    pub fn with_account(mut self, account_id: &str) -> Self {
        self.account_id = Some(account_id.to_string());
        self
    }

    /// Replaces the underlying HTTP client, e.g. to set proxy or TLS options.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    /// Builds the request for `args` without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::RequestConstruction`] if the method or URL is
    /// invalid, or the token is not a valid header value.
    pub fn build_request(&self, args: &RequestArgs) -> Result<reqwest::Request> {
        let method = Method::from_bytes(args.method.as_bytes()).map_err(|e| {
            OandaError::RequestConstruction(format!("invalid method {:?}: {e}", args.method))
        })?;

        let mut authorization = HeaderValue::from_str(&self.authorization).map_err(|e| {
            OandaError::RequestConstruction(format!("invalid authorization header: {e}"))
        })?;
        authorization.set_sensitive(true);

        let mut builder = self
            .http
            .request(method, args.url.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, authorization)
            .header(CONNECTION, HeaderValue::from_static("Keep-Alive"));

        if let Some(body) = &args.body {
            builder = builder.body(body.clone());
        }

        builder
            .build()
            .map_err(|e| OandaError::RequestConstruction(e.to_string()))
    }

    /// Sends one request and drains its body.
    ///
    /// No retries. The status is returned alongside the body; a non-2xx
    /// response is still `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::RequestConstruction`] if the request cannot be
    /// built, [`OandaError::Transport`] if the call fails, and
    /// [`OandaError::BodyRead`] if the body cannot be read.
    pub async fn execute(&self, args: &RequestArgs) -> Result<ApiResponse> {
        let response = self.send(args).await?;
        let status = response.status();

        let body = response.bytes().await.map_err(OandaError::BodyRead)?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }

    async fn send(&self, args: &RequestArgs) -> Result<reqwest::Response> {
        let request = self.build_request(args)?;
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        self.http
            .execute(request)
            .await
            .map_err(OandaError::Transport)
    }

    /// Fetches the current pricing snapshot for `instruments`.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::Config`] if no account is set, otherwise as
    /// [`Client::execute`].
    pub async fn get_pricing(&self, instruments: &[String]) -> Result<ApiResponse> {
        let url = endpoints::pricing_url(&self.api_url, self.account_id()?, instruments);
        self.execute(&RequestArgs::get(&url)).await
    }

    /// Fetches the latest `count` midpoint candles for `instrument`.
    ///
    /// # Errors
    ///
    /// As [`Client::execute`].
    pub async fn get_candles(
        &self,
        instrument: &str,
        granularity: Granularity,
        count: u32,
    ) -> Result<ApiResponse> {
        let url = endpoints::candles_url(&self.api_url, instrument, granularity, count);
        self.execute(&RequestArgs::get(&url)).await
    }

    /// Submits a market order.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::Config`] if no account is set, otherwise as
    /// [`Client::execute`].
    pub async fn create_market_order(&self, order: MarketOrderRequest) -> Result<ApiResponse> {
        let url = endpoints::orders_url(&self.api_url, self.account_id()?);
        let args = RequestArgs::post_json(&url, &OrderRequest::from(order))?;
        self.execute(&args).await
    }

    /// Opens the pricing stream for `instruments`.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::Config`] if no account is set,
    /// [`OandaError::RequestConstruction`] or [`OandaError::Transport`] if
    /// the stream cannot be opened.
    pub async fn stream_pricing(&self, instruments: &[String]) -> Result<PriceStream> {
        let url = endpoints::pricing_stream_url(&self.stream_url, self.account_id()?, instruments);
        let response = self.send(&RequestArgs::get(&url)).await?;
        info!(
            status = response.status().as_u16(),
            instruments = instruments.len(),
            "Opened pricing stream"
        );

        Ok(PriceStream::new(response))
    }

    fn account_id(&self) -> Result<&str> {
        self.account_id
            .as_deref()
            .ok_or_else(|| OandaError::Config("no account id configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::new(
            "secret-token",
            "https://api-fxpractice.oanda.com",
            "https://stream-fxpractice.oanda.com",
        )
    }

    #[test]
    fn build_request_sets_exactly_three_headers() {
        let client = test_client();
        let args = RequestArgs::new(
            "PUT",
            "https://api-fxpractice.oanda.com/v3/accounts/1/orders/2/cancel",
            Some(b"{\"a\":1}".to_vec()),
        );

        let request = client.build_request(&args).unwrap();

        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.url().as_str(), args.url);
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer secret-token");
        assert_eq!(request.headers()[CONNECTION], "Keep-Alive");
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(&b"{\"a\":1}"[..])
        );
    }

    #[test]
    fn build_request_without_body() {
        let request = test_client()
            .build_request(&RequestArgs::get("https://api-fxpractice.oanda.com/v3/accounts"))
            .unwrap();
        assert_eq!(request.method(), Method::GET);
        assert!(request.body().is_none());
    }

    #[test]
    fn invalid_method_is_construction_error() {
        let err = test_client()
            .build_request(&RequestArgs::new("NOT A METHOD", "https://example.com", None))
            .unwrap_err();
        assert!(matches!(err, OandaError::RequestConstruction(_)));
    }

    #[test]
    fn invalid_url_is_construction_error() {
        let err = test_client()
            .build_request(&RequestArgs::get("not a url"))
            .unwrap_err();
        assert!(matches!(err, OandaError::RequestConstruction(_)));
    }

    #[test]
    fn token_with_newline_is_construction_error() {
        let client = Client::new("bad\ntoken", "https://a", "https://b");
        let err = client
            .build_request(&RequestArgs::get("https://api-fxpractice.oanda.com"))
            .unwrap_err();
        assert!(matches!(err, OandaError::RequestConstruction(_)));
    }

    #[tokio::test]
    async fn account_scoped_call_without_account_is_config_error() {
        let err = test_client().get_pricing(&["EUR_USD".to_string()]).await.unwrap_err();
        assert!(matches!(err, OandaError::Config(_)));
    }

    #[test]
    fn debug_redacts_token() {
        let printed = format!("{:?}", test_client());
        assert!(!printed.contains("secret-token"));
    }

    #[test]
    fn api_response_reports_status() {
        let response = ApiResponse {
            status: StatusCode::BAD_REQUEST,
            body: br#"{"errorMessage":"Invalid value specified for 'instruments'"}"#.to_vec(),
        };
        assert!(!response.is_success());
        let error = response.decode_error().unwrap();
        assert!(error.error_message.contains("instruments"));
    }

    #[test]
    fn success_body_is_not_an_error_payload() {
        let response = ApiResponse {
            status: StatusCode::OK,
            body: br#"{"time":"2018-07-27T19:49:20.051366519Z","prices":[]}"#.to_vec(),
        };
        assert!(response.is_success());
        let err = response.decode_error().unwrap_err();
        assert!(matches!(err, OandaError::Decode(_)));
    }

    #[test]
    fn exposes_configured_hosts() {
        let client = test_client();
        assert_eq!(client.api_url(), "https://api-fxpractice.oanda.com");
        assert_eq!(client.stream_url(), "https://stream-fxpractice.oanda.com");
    }
}
