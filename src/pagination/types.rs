//! Pagination types and state machine
//!
//! `PaginationState` is the synchronous core of a pagination session. It does
//! no I/O: a fetch is split into [`PaginationState::begin`], which hands out a
//! [`PageTicket`], and [`PaginationState::complete`], which redeems it with
//! the fetch result. Every invariant of the session lives here.
//!
//! ```text
//! IDLE(has_more) --begin--> LOADING --complete(non-empty)--> IDLE(has_more)
//!                                   --complete(empty)------> IDLE(!has_more)   terminal
//!                                   --complete(error)------> IDLE(has_more)    unchanged
//! IDLE(!has_more) --begin--> Skipped(Exhausted)
//! ```

use crate::error::{Error, Result};
use crate::record::{PageEnvelope, Record};
use std::collections::HashSet;

/// Proof that a fetch was started, redeemed by [`PaginationState::complete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    page: u32,
    page_size: u32,
    generation: u64,
}

impl PageTicket {
    /// Page number to fetch
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size to fetch with
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Session generation the fetch was started in
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Why a page request did not start a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A fetch is already in flight
    Loading,
    /// An empty page was seen; there is nothing left to fetch
    Exhausted,
    /// The session was closed
    Closed,
}

/// Result of one page request
#[derive(Debug)]
pub enum PageOutcome {
    /// Records were merged and the cursor advanced
    ///
    /// `count` is the number of records merged, which is lower than the page
    /// size when de-duplication drops records.
    Appended { page: u32, count: usize },
    /// The page came back empty; the session is now exhausted
    Exhausted { page: u32 },
    /// The fetch failed; state is unchanged apart from the loading flag
    Failed { page: u32, error: Error },
    /// The result arrived after a reset or close and was thrown away
    Discarded { page: u32 },
    /// No fetch was started
    Skipped(SkipReason),
}

impl PageOutcome {
    /// Check if records were merged
    pub fn is_appended(&self) -> bool {
        matches!(self, Self::Appended { .. })
    }

    /// Check if this request hit end-of-data
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Check if no fetch was started
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// The fetch error, if the request failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Page number the request was for, if a fetch was started
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Appended { page, .. }
            | Self::Exhausted { page }
            | Self::Failed { page, .. }
            | Self::Discarded { page } => Some(*page),
            Self::Skipped(_) => None,
        }
    }
}

/// Point-in-time view of a session, published to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerSnapshot {
    /// Number of accumulated records
    pub len: usize,
    /// Next page to request
    pub next_page: u32,
    /// A fetch is in flight
    pub is_loading: bool,
    /// End-of-data has not been reached
    pub has_more: bool,
    /// Session generation (bumped by reset)
    pub generation: u64,
}

/// Mutable state of one pagination session
#[derive(Debug, Clone)]
pub struct PaginationState<R> {
    accumulated: Vec<R>,
    next_page: u32,
    page_size: u32,
    is_loading: bool,
    has_more: bool,
    generation: u64,
    closed: bool,
    dedupe_by_id: bool,
    seen: HashSet<String>,
}

impl<R: Record> PaginationState<R> {
    /// Create a fresh session state
    ///
    /// `page_size` must be at least 1.
    pub fn new(page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        Ok(Self {
            accumulated: Vec::new(),
            next_page: 1,
            page_size,
            is_loading: false,
            has_more: true,
            generation: 0,
            closed: false,
            dedupe_by_id: false,
            seen: HashSet::new(),
        })
    }

    /// Drop records whose id was already merged
    ///
    /// Off by default: upstream pages are merged verbatim.
    #[must_use]
    pub fn with_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe_by_id = enabled;
        self
    }

    /// Accumulated records in page order
    pub fn records(&self) -> &[R] {
        &self.accumulated
    }

    /// Number of accumulated records
    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    /// Check if no records have been merged
    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// Next page number to request
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Records requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// A fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// End-of-data has not been reached
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The session was closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether de-duplication by id is enabled
    pub fn dedupes(&self) -> bool {
        self.dedupe_by_id
    }

    /// Capture the current state
    pub fn snapshot(&self) -> PagerSnapshot {
        PagerSnapshot {
            len: self.accumulated.len(),
            next_page: self.next_page,
            is_loading: self.is_loading,
            has_more: self.has_more,
            generation: self.generation,
        }
    }

    /// Start a fetch for the next page
    ///
    /// Leaves the state untouched when a fetch is already in flight, the
    /// session is exhausted, or it was closed.
    pub fn begin(&mut self) -> std::result::Result<PageTicket, SkipReason> {
        if self.closed {
            return Err(SkipReason::Closed);
        }
        if self.is_loading {
            return Err(SkipReason::Loading);
        }
        if !self.has_more {
            return Err(SkipReason::Exhausted);
        }

        self.is_loading = true;
        Ok(PageTicket {
            page: self.next_page,
            page_size: self.page_size,
            generation: self.generation,
        })
    }

    /// Apply the result of the fetch started with `ticket`
    pub fn complete(&mut self, ticket: PageTicket, result: Result<PageEnvelope<R>>) -> PageOutcome {
        let page = ticket.page;
        if !self.is_current(ticket) {
            return PageOutcome::Discarded { page };
        }

        self.is_loading = false;

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(error) => return PageOutcome::Failed { page, error },
        };

        if envelope.is_empty() {
            self.has_more = false;
            return PageOutcome::Exhausted { page };
        }

        let mut records = envelope.records;
        if self.dedupe_by_id {
            let seen = &mut self.seen;
            records.retain(|record| seen.insert(record.id().to_string()));
        }

        let count = records.len();
        self.accumulated.extend(records);
        self.next_page += 1;

        PageOutcome::Appended { page, count }
    }

    /// Give up on the fetch started with `ticket` without a result
    ///
    /// Only the loading flag is cleared; the same page is requested next time.
    pub fn abandon(&mut self, ticket: PageTicket) {
        if self.is_current(ticket) {
            self.is_loading = false;
        }
    }

    /// Restart the session from page 1
    ///
    /// Any fetch still in flight belongs to the previous generation and its
    /// result will be discarded.
    pub fn reset(&mut self) {
        self.accumulated.clear();
        self.seen.clear();
        self.next_page = 1;
        self.has_more = true;
        self.is_loading = false;
        self.generation += 1;
    }

    /// Tear the session down; later requests are skipped and late results discarded
    pub fn close(&mut self) {
        self.closed = true;
        self.is_loading = false;
    }

    fn is_current(&self, ticket: PageTicket) -> bool {
        !self.closed && ticket.generation == self.generation
    }
}
