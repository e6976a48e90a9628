//! HTTP client module
//!
//! Provides the single-attempt HTTP transport used by page fetches.
//!
//! # Features
//!
//! - **Single Attempt**: No built-in retry; every trigger is one request
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Classification**: Timeouts, transport failures and HTTP statuses

mod client;
mod rate_limit;

pub use client::{default_user_agent, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
