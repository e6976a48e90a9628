//! HTTP fetch client

use super::types::FetchClient;
use crate::decode::{JsonEnvelopeDecoder, PageDecoder};
use crate::error::Result;
use crate::http::HttpClient;
use crate::record::PageEnvelope;
use crate::template::EndpointTemplate;
use crate::types::PageRequest;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Fetches pages over HTTP from a templated endpoint
pub struct HttpFetchClient<R> {
    http: HttpClient,
    endpoint: EndpointTemplate,
    decoder: Box<dyn PageDecoder<R>>,
}

impl<R: DeserializeOwned + 'static> HttpFetchClient<R> {
    /// Create a client that decodes the default (randomuser.me) envelope layout
    pub fn new(endpoint: EndpointTemplate, http: HttpClient) -> Self {
        Self::with_decoder(endpoint, http, JsonEnvelopeDecoder::default())
    }
}

impl<R> HttpFetchClient<R> {
    /// Create a client with a custom decoder
    pub fn with_decoder(
        endpoint: EndpointTemplate,
        http: HttpClient,
        decoder: impl PageDecoder<R> + 'static,
    ) -> Self {
        Self {
            http,
            endpoint,
            decoder: Box::new(decoder),
        }
    }

    /// The endpoint template pages are fetched from
    pub fn endpoint(&self) -> &EndpointTemplate {
        &self.endpoint
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

#[async_trait]
impl<R: Send + 'static> FetchClient<R> for HttpFetchClient<R> {
    async fn fetch_page(&self, page_number: u32, page_size: u32) -> Result<PageEnvelope<R>> {
        let request = PageRequest::new(page_number, page_size)?;
        let url = self.endpoint.render(request)?;

        debug!("Fetching page {} (size {}) from {}", page_number, page_size, url);
        let body = self.http.get_text(&url).await?;
        let envelope = self.decoder.decode(&body, page_number)?;

        if envelope.result_count as usize != envelope.len() {
            debug!(
                "Page {} reported {} results but carried {}",
                page_number,
                envelope.result_count,
                envelope.len()
            );
        }

        Ok(envelope)
    }
}

impl<R> std::fmt::Debug for HttpFetchClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetchClient")
            .field("endpoint", &self.endpoint)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}
