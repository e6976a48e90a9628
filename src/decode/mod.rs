//! Page envelope decoding
//!
//! Turns a raw response body into a [`PageEnvelope`](crate::record::PageEnvelope).
//!
//! # Overview
//!
//! The decode module locates the record array and the pagination metadata
//! inside a JSON response using simple dot paths (`results`, `info.page`,
//! `data.items[0]`), then deserializes each record into the caller's type.
//! A page either decodes completely or fails with a decode error; partial
//! pages are never produced.

mod decoders;
mod types;

pub use decoders::JsonEnvelopeDecoder;
pub use types::{EnvelopeFormat, PageDecoder};
