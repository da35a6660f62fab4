//! HTTP networking module
//!
//! Provides the HTTP transport used for every search API call.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{ApiRequest, ApiResponse};
