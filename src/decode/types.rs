//! Decoder types and traits

use crate::error::Result;
use crate::record::PageEnvelope;
use serde::{Deserialize, Serialize};

/// Where the envelope fields live inside a response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeFormat {
    /// Dot path to the record array (`$` for a bare array body)
    pub records_path: String,
    /// Dot path to the reported record count; falls back to the record count
    pub result_count_path: Option<String>,
    /// Dot path to the reported page number; falls back to the requested page
    pub page_path: Option<String>,
}

impl Default for EnvelopeFormat {
    /// The randomuser.me layout: `{ "results": [...], "info": { "results", "page" } }`
    fn default() -> Self {
        Self {
            records_path: "results".to_string(),
            result_count_path: Some("info.results".to_string()),
            page_path: Some("info.page".to_string()),
        }
    }
}

impl EnvelopeFormat {
    /// A format with only a record path and no metadata
    pub fn records_at(path: impl Into<String>) -> Self {
        Self {
            records_path: path.into(),
            result_count_path: None,
            page_path: None,
        }
    }

    /// Set the result count path
    #[must_use]
    pub fn with_result_count_path(mut self, path: impl Into<String>) -> Self {
        self.result_count_path = Some(path.into());
        self
    }

    /// Set the page number path
    #[must_use]
    pub fn with_page_path(mut self, path: impl Into<String>) -> Self {
        self.page_path = Some(path.into());
        self
    }
}

/// Trait for decoding response bodies into page envelopes
pub trait PageDecoder<R>: Send + Sync {
    /// Decode a response body fetched for `requested_page`
    fn decode(&self, body: &str, requested_page: u32) -> Result<PageEnvelope<R>>;
}
