//! Pagination module
//!
//! The incremental (infinite-scroll) pagination engine.
//!
//! # Overview
//!
//! - `PaginationState` - I/O-free state machine: cursor, loading flag,
//!   end-of-data flag and accumulated records
//! - `Pager` - session handle that runs fetches through a `FetchClient`,
//!   guarantees at most one fetch in flight, and publishes snapshots
//!
//! Pages are requested and merged strictly in ascending order. The cursor
//! only advances after a non-empty page is merged; the first empty page
//! freezes the session until it is reset.

mod pager;
mod types;

pub use pager::{Pager, PagerOptions, DEFAULT_PAGE_SIZE};
pub use types::{PageOutcome, PageTicket, PagerSnapshot, PaginationState, SkipReason};
