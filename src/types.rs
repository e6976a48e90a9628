//! Common types used throughout Solidafy Pager
//!
//! Shared type aliases and the page request shape passed between the
//! pagination state machine and fetch clients.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Page Request
// ============================================================================

/// A request for one page of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page ordinal
    pub page_number: u32,
    /// Records per page
    pub page_size: u32,
}

impl PageRequest {
    /// Create a validated page request
    ///
    /// Both values must be at least 1.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self> {
        if page_number == 0 {
            return Err(Error::invalid_value("page_number", "must be at least 1"));
        }
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }
}
