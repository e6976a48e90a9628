//! Fetch client trait

use crate::error::Result;
use crate::record::PageEnvelope;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of pages for the pagination engine
///
/// Implementations perform at most one logical network call per invocation
/// and never retry internally. `page_number` and `page_size` are both at
/// least 1.
#[async_trait]
pub trait FetchClient<R: Send + 'static>: Send + Sync {
    /// Fetch one page of records
    async fn fetch_page(&self, page_number: u32, page_size: u32) -> Result<PageEnvelope<R>>;
}

#[async_trait]
impl<R, C> FetchClient<R> for Arc<C>
where
    R: Send + 'static,
    C: FetchClient<R> + ?Sized,
{
    async fn fetch_page(&self, page_number: u32, page_size: u32) -> Result<PageEnvelope<R>> {
        (**self).fetch_page(page_number, page_size).await
    }
}
