//! Pagination session
//!
//! `Pager` owns one [`PaginationState`] and one [`FetchClient`] and drives
//! page requests through them. It is a cheap, cloneable handle: clones share
//! the same session, so a presentation layer can hand one to every
//! visibility callback.

use super::types::{PageOutcome, PageTicket, PagerSnapshot, PaginationState, SkipReason};
use crate::error::Result;
use crate::fetch::FetchClient;
use crate::prefetch::should_load_more;
use crate::record::Record;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Records requested per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Session options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerOptions {
    /// Records requested per page (at least 1)
    pub page_size: u32,
    /// Drop records whose id was already merged
    pub dedupe_by_id: bool,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            dedupe_by_id: false,
        }
    }
}

impl PagerOptions {
    /// Options with the given page size
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Enable or disable de-duplication by id
    #[must_use]
    pub fn dedupe_by_id(mut self, enabled: bool) -> Self {
        self.dedupe_by_id = enabled;
        self
    }
}

struct Shared<R, C> {
    state: Mutex<PaginationState<R>>,
    client: C,
    updates: watch::Sender<PagerSnapshot>,
}

/// Incremental pagination session
pub struct Pager<R, C> {
    inner: Arc<Shared<R, C>>,
}

impl<R, C> Clone for Pager<R, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Record, C: FetchClient<R>> Pager<R, C> {
    /// Create a session with the given page size
    pub fn new(client: C, page_size: u32) -> Result<Self> {
        Self::with_options(client, PagerOptions::with_page_size(page_size))
    }

    /// Create a session with full options
    pub fn with_options(client: C, options: PagerOptions) -> Result<Self> {
        let state = PaginationState::new(options.page_size)?.with_dedupe(options.dedupe_by_id);
        let (updates, _) = watch::channel(state.snapshot());

        Ok(Self {
            inner: Arc::new(Shared {
                state: Mutex::new(state),
                client,
                updates,
            }),
        })
    }

    /// Request the next page
    ///
    /// Returns `Skipped` without calling the fetch client when a fetch is
    /// already in flight, the feed is exhausted, or the session is closed.
    /// Failures are reported in the outcome; the next call retries the same
    /// page.
    pub async fn request_next_page(&self) -> PageOutcome {
        let ticket = match self.update(PaginationState::begin) {
            Ok(ticket) => ticket,
            Err(reason) => {
                debug!("Page request skipped: {:?}", reason);
                return PageOutcome::Skipped(reason);
            }
        };

        debug!(
            "Requesting page {} (size {})",
            ticket.page(),
            ticket.page_size()
        );

        let mut in_flight = InFlight {
            pager: self,
            ticket: Some(ticket),
        };
        let result = self
            .inner
            .client
            .fetch_page(ticket.page(), ticket.page_size())
            .await;
        in_flight.ticket = None;

        let outcome = self.update(|state| state.complete(ticket, result));
        match &outcome {
            PageOutcome::Appended { page, count } => {
                debug!("Page {}: merged {} records", page, count);
            }
            PageOutcome::Exhausted { page } => {
                info!("Page {} was empty; no more pages", page);
            }
            PageOutcome::Failed { page, error } => {
                warn!("Page {} failed ({:?}): {}", page, error.kind(), error);
            }
            PageOutcome::Discarded { page } => {
                debug!("Discarded stale result for page {}", page);
            }
            PageOutcome::Skipped(_) => {}
        }
        outcome
    }

    /// Handle a visibility event from the presentation layer
    ///
    /// Requests the next page when [`should_load_more`] fires for
    /// `visible_id`; returns `None` when it does not.
    pub async fn on_visible(&self, visible_id: Option<&str>) -> Option<PageOutcome> {
        let fire = should_load_more(visible_id, self.lock().records());
        if fire {
            Some(self.request_next_page().await)
        } else {
            None
        }
    }

    /// Request the next page on a background task
    pub fn spawn_next_page(&self) -> JoinHandle<PageOutcome>
    where
        C: 'static,
    {
        let pager = self.clone();
        tokio::spawn(async move { pager.request_next_page().await })
    }

    /// Restart the session from page 1
    pub fn reset(&self) {
        self.update(PaginationState::reset);
        debug!("Pagination session reset");
    }

    /// Tear the session down
    pub fn close(&self) {
        self.update(PaginationState::close);
        debug!("Pagination session closed");
    }

    /// Copy of the accumulated records in page order
    pub fn records(&self) -> Vec<R> {
        self.lock().records().to_vec()
    }

    /// Run a closure against the accumulated records without copying them
    pub fn with_records<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        f(self.lock().records())
    }

    /// Number of accumulated records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no records have been merged
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    /// End-of-data has not been reached
    pub fn has_more(&self) -> bool {
        self.lock().has_more()
    }

    /// Next page number to request
    pub fn next_page(&self) -> u32 {
        self.lock().next_page()
    }

    /// Records requested per page
    pub fn page_size(&self) -> u32 {
        self.lock().page_size()
    }

    /// The session was closed
    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    /// Current state of the session
    pub fn snapshot(&self) -> PagerSnapshot {
        self.lock().snapshot()
    }

    /// Subscribe to state changes
    ///
    /// The receiver is notified only when a transition changes the snapshot;
    /// skipped requests and discarded results stay silent.
    pub fn subscribe(&self) -> watch::Receiver<PagerSnapshot> {
        self.inner.updates.subscribe()
    }

    /// The fetch client behind this session
    pub fn client(&self) -> &C {
        &self.inner.client
    }

    fn lock(&self) -> MutexGuard<'_, PaginationState<R>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate the state and publish the resulting snapshot if it changed
    fn update<T>(&self, f: impl FnOnce(&mut PaginationState<R>) -> T) -> T {
        let mut state = self.lock();
        let result = f(&mut state);
        let snapshot = state.snapshot();
        self.inner.updates.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
        result
    }
}

impl<R, C> std::fmt::Debug for Pager<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("snapshot", &*self.inner.updates.borrow())
            .finish_non_exhaustive()
    }
}

/// Clears the loading flag if a request future is dropped mid-fetch
struct InFlight<'a, R: Record, C: FetchClient<R>> {
    pager: &'a Pager<R, C>,
    ticket: Option<PageTicket>,
}

impl<R: Record, C: FetchClient<R>> Drop for InFlight<'_, R, C> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            debug!("Request for page {} dropped in flight", ticket.page());
            self.pager.update(|state| state.abandon(ticket));
        }
    }
}
