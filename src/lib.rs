// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Solidafy Pager
//!
//! Incremental ("infinite scroll") pagination for page-numbered HTTP feeds.
//!
//! ## Features
//!
//! - **Single Flight**: At most one page fetch in flight per session
//! - **Ordered Accumulation**: Pages are appended strictly in page order
//! - **End-of-Data Detection**: The first empty page ends the session
//! - **Failure Isolation**: A failed fetch leaves the session untouched; the
//!   next trigger retries the same page
//! - **Look-Ahead Trigger**: Load more when the last row becomes visible
//! - **YAML Configuration**: Endpoint, page size, HTTP and envelope layout
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_pager::{PagerConfig, Person, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Defaults: randomuser.me, 5 people per page
//!     let pager = PagerConfig::default().build_pager::<Person>()?;
//!
//!     // First render: nothing visible yet
//!     pager.on_visible(None).await;
//!
//!     // The last row scrolled into view
//!     let last = pager.with_records(|people| people.last().map(|p| p.login.uuid.clone()));
//!     pager.on_visible(last.as_deref()).await;
//!
//!     for person in pager.records() {
//!         println!("{}", person.full_name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Presentation Adapter                        │
//! │  on_visible(id)   request_next_page()   records()   subscribe() │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────────┬─────────────────┐
//! │   Prefetch   │           Pagination          │     Config      │
//! ├──────────────┼───────────────────────────────┼─────────────────┤
//! │ Last-row     │ PaginationState (begin/       │ YAML / JSON     │
//! │ trigger      │ complete), Pager session      │ build_pager()   │
//! └──────────────┴───────────────┬───────────────┴─────────────────┘
//!                                │ FetchClient
//! ┌──────────────┬───────────────┴───┬───────────────┬─────────────┐
//! │   Template   │       HTTP        │    Decode     │   Record    │
//! ├──────────────┼───────────────────┼───────────────┼─────────────┤
//! │ page         │ GET, Timeout      │ Dot paths     │ Person      │
//! │ page_size    │ Rate Limit        │ Envelope      │ Record id   │
//! └──────────────┴───────────────────┴───────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the pager
pub mod error;

/// Common types and type aliases
pub mod types;

/// Endpoint template interpolation
pub mod template;

/// Record model and page envelope
pub mod record;

/// Response envelope decoders
pub mod decode;

/// HTTP client with rate limiting
pub mod http;

/// Fetch client abstraction
pub mod fetch;

/// Pagination state machine and session
pub mod pagination;

/// Look-ahead trigger
pub mod prefetch;

/// Pager configuration
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FetchErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use config::PagerConfig;
pub use fetch::{FetchClient, HttpFetchClient};
pub use pagination::{PageOutcome, Pager, PagerOptions, PagerSnapshot, SkipReason};
pub use prefetch::should_load_more;
pub use record::{PageEnvelope, Person, Record};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
