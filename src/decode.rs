//! Response decoders.
//!
//! Each decoder parses a complete JSON body into its record. Failure is
//! always returned as [`OandaError::Decode`]; a malformed payload never
//! panics and never yields a partially populated record.

use serde::de::DeserializeOwned;

use crate::Result;
use crate::models::{
    Candles, Heartbeat, OrderCreateTransaction, Price, Pricing, StreamMessage,
};

/// Decodes any record type from a JSON body.
///
/// # Errors
///
/// Returns [`OandaError::Decode`](crate::OandaError::Decode) if the bytes are
/// not valid JSON or do not match the shape of `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes a pricing-stream heartbeat.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_heartbeat(bytes: &[u8]) -> Result<Heartbeat> {
    decode(bytes)
}

/// Decodes a single streamed price.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_price(bytes: &[u8]) -> Result<Price> {
    decode(bytes)
}

/// Decodes a pricing snapshot.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_pricing(bytes: &[u8]) -> Result<Pricing> {
    decode(bytes)
}

/// Decodes an instrument candle series.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_candles(bytes: &[u8]) -> Result<Candles> {
    decode(bytes)
}

/// Decodes the response to an order submission.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_order_create(bytes: &[u8]) -> Result<OrderCreateTransaction> {
    decode(bytes)
}

/// Decodes one pricing-stream line, routing on its `type` tag.
///
/// # Errors
///
/// Returns [`OandaError::Decode`](crate::OandaError::Decode) if the line is
/// not a JSON object or does not match the record its tag names.
pub fn decode_stream_message(bytes: &[u8]) -> Result<StreamMessage> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;
    let value = serde_json::Value::Object(object);

    let message = match value.get("type").and_then(|t| t.as_str()) {
        Some("HEARTBEAT") => StreamMessage::Heartbeat(serde_json::from_value(value)?),
        Some("PRICE") => StreamMessage::Price(serde_json::from_value(value)?),
        _ => StreamMessage::Unknown(value),
    };

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OandaError;

    #[test]
    fn heartbeat_keeps_exact_timestamp() {
        let heartbeat =
            decode_heartbeat(br#"{"time":"2018-07-27T19:49:18.256694465Z","type":"HEARTBEAT"}"#)
                .unwrap();
        assert_eq!(heartbeat.time, "2018-07-27T19:49:18.256694465Z");
        assert_eq!(heartbeat.tpe, "HEARTBEAT");
    }

    #[test]
    fn truncated_body_is_decode_error() {
        let err = decode_pricing(br#"{"time":"2018-07-27T19:49:18Z","prices":[{"#).unwrap_err();
        assert!(matches!(err, OandaError::Decode(_)));
    }

    #[test]
    fn wrong_field_type_is_decode_error() {
        let err = decode_candles(br#"{"instrument":"EUR_USD","candles":[{"volume":"12"}]}"#)
            .unwrap_err();
        assert!(matches!(err, OandaError::Decode(_)));
    }

    #[test]
    fn empty_body_is_decode_error() {
        assert!(matches!(
            decode_heartbeat(b"").unwrap_err(),
            OandaError::Decode(_)
        ));
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let candles = decode_candles(br#"{"instrument":"EUR_USD"}"#).unwrap();
        assert_eq!(candles.instrument, "EUR_USD");
        assert!(candles.granularity.is_empty());
        assert!(candles.candles.is_empty());
    }

    #[test]
    fn stream_message_routes_on_type() {
        let heartbeat =
            decode_stream_message(br#"{"type":"HEARTBEAT","time":"2018-07-27T19:49:18Z"}"#)
                .unwrap();
        assert!(matches!(heartbeat, StreamMessage::Heartbeat(_)));

        let price = decode_stream_message(
            br#"{"type":"PRICE","instrument":"EUR_USD","bids":[{"price":"1.16610","liquidity":10000000}]}"#,
        )
        .unwrap();
        match price {
            StreamMessage::Price(price) => {
                assert_eq!(price.instrument, "EUR_USD");
                assert_eq!(price.bids[0].price.as_str(), "1.16610");
            }
            other => panic!("expected price, got {other:?}"),
        }

        let unknown = decode_stream_message(br#"{"type":"SOMETHING_NEW"}"#).unwrap();
        assert!(matches!(unknown, StreamMessage::Unknown(_)));
    }

    #[test]
    fn stream_message_must_be_object() {
        for line in [&b"42"[..], b"null", b"[1,2]", b"\"x\""] {
            let err = decode_stream_message(line).unwrap_err();
            assert!(matches!(err, OandaError::Decode(_)));
        }
    }

    #[test]
    fn stream_message_with_bad_price_is_decode_error() {
        let err = decode_stream_message(br#"{"type":"PRICE","bids":"oops"}"#).unwrap_err();
        assert!(matches!(err, OandaError::Decode(_)));
    }
}
