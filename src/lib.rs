//! OANDA v20 REST and streaming client library.
//!
//! Provides an authenticated request executor ([`client::Client`]), typed
//! records for pricing, candle and order transaction payloads
//! ([`models`]), and one decoder per payload ([`decode`]). Decimal values
//! are kept as the exact text the broker sent.

pub mod client;
pub mod config;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod stream;

pub use client::{ApiResponse, Client, RequestArgs};
pub use error::{OandaError, Result};
