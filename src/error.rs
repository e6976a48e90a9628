//! Error types for Solidafy Pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Fetch failures are classified with [`FetchErrorKind`] so a presentation
//! layer can branch on "setup mistake", "network", "server" and "broken
//! response" without matching every variant.

use thiserror::Error;

/// The main error type for Solidafy Pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Server Errors
    // ============================================================================
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to extract records from path '{path}': {message}")]
    RecordExtraction { path: String, message: String },
}

/// Coarse classification of a fetch failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Caller or setup mistake; retrying without a fix will not help
    Configuration,
    /// Timeout, DNS, connection reset and friends
    Transport,
    /// The server answered with a non-success status
    Server { status: u16 },
    /// The payload does not match the page envelope schema
    Decode,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a record extraction error
    pub fn extraction(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Classify this error for the presentation layer
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Error::Config { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_)
            | Error::InvalidUrl(_)
            | Error::Template { .. }
            | Error::UndefinedVariable { .. }
            | Error::Io(_) => FetchErrorKind::Configuration,
            // reqwest reports malformed requests through the same error type
            Error::Http(e) if e.is_builder() => FetchErrorKind::Configuration,
            Error::Http(_) | Error::Timeout { .. } => FetchErrorKind::Transport,
            Error::HttpStatus { status, .. } => FetchErrorKind::Server { status: *status },
            Error::Decode { .. } | Error::RecordExtraction { .. } => FetchErrorKind::Decode,
        }
    }

    /// Check if retrying the same page can succeed
    ///
    /// Only configuration errors are permanent; everything else depends on
    /// the remote side.
    pub fn is_retryable(&self) -> bool {
        !matches!(self.kind(), FetchErrorKind::Configuration)
    }

    /// Check if a retry will most likely fail the same way
    ///
    /// True for broken payloads and for server statuses that are not
    /// transient (4xx other than 408 and 429).
    pub fn is_likely_to_repeat(&self) -> bool {
        match self.kind() {
            FetchErrorKind::Decode => true,
            FetchErrorKind::Server { status } => !is_transient_status(status),
            FetchErrorKind::Configuration | FetchErrorKind::Transport => false,
        }
    }
}

/// Check if an HTTP status code usually clears up on its own
fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429) || status >= 500
}

/// Result type alias for Solidafy Pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error, keeping it a configuration error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::config(format!("{}: {}", message.into(), inner))
        })
    }
}
