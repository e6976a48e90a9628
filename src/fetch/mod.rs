//! Fetch client module
//!
//! Abstracts the network call "give me page N with size S".
//!
//! # Overview
//!
//! - `FetchClient` - the async seam the pagination engine calls through
//! - `HttpFetchClient` - endpoint template + HTTP GET + envelope decoding
//!
//! Every failure comes back as an [`Error`](crate::Error) value whose
//! [`kind`](crate::Error::kind) tells configuration, transport, server and
//! decode problems apart. There is no internal retry.

mod client;
mod types;

pub use client::HttpFetchClient;
pub use types::FetchClient;
