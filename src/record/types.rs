//! Record traits and page envelope

/// An entity that can be paginated
///
/// The pagination core never inspects anything but the identifier, which
/// must be stable and unique within a feed.
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable unique identifier
    fn id(&self) -> &str;
}

/// One page of records returned by a fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<R> {
    /// Records in server order
    pub records: Vec<R>,
    /// Record count reported by the server; informational only
    pub result_count: u32,
    /// Page number reported by the server
    pub page_number: u32,
}

impl<R> PageEnvelope<R> {
    /// Create an envelope whose count matches its records
    pub fn new(records: Vec<R>, page_number: u32) -> Self {
        Self {
            result_count: records.len() as u32,
            records,
            page_number,
        }
    }

    /// Create an empty envelope (end of data)
    pub fn empty(page_number: u32) -> Self {
        Self::new(Vec::new(), page_number)
    }

    /// Whether the page carried no records
    ///
    /// Derived from the records themselves, never from `result_count`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records actually present
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
