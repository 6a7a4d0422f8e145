//! HTTP transport: executes lookup requests and classifies network failures.

mod client;
mod transport;

pub use client::{HttpClient, HttpExchange};
pub use transport::classify_transport_error;
