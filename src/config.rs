//! Pager configuration
//!
//! A pagination session can be described in YAML (or JSON) and turned into a
//! ready [`Pager`]. Every field has a default, so an empty document yields the
//! randomuser.me feed at five records per page:
//!
//! ```yaml
//! endpoint: "https://randomuser.me/api/?page={{ page }}&results={{ page_size }}"
//! page_size: 5
//! dedupe_by_id: false
//! http:
//!   timeout_secs: 30
//!   rate_limit:
//!     requests_per_second: 2
//!     burst_size: 2
//! envelope:
//!   records_path: results
//!   result_count_path: info.results
//!   page_path: info.page
//! ```

use crate::decode::{EnvelopeFormat, JsonEnvelopeDecoder};
use crate::error::{Error, Result, ResultExt};
use crate::fetch::HttpFetchClient;
use crate::http::{default_user_agent, HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::{Pager, PagerOptions, DEFAULT_PAGE_SIZE};
use crate::record::Record;
use crate::template::EndpointTemplate;
use crate::types::StringMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str =
    "https://randomuser.me/api/?page={{ page }}&results={{ page_size }}";

// ============================================================================
// Top-Level Pager Config
// ============================================================================

/// Complete pagination session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Endpoint template with `{{ page }}` and `{{ page_size }}` placeholders
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Drop records whose id was already merged
    #[serde(default)]
    pub dedupe_by_id: bool,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Response envelope layout
    #[serde(default)]
    pub envelope: EnvelopeFormat,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            dedupe_by_id: false,
            http: HttpConfig::default(),
            envelope: EnvelopeFormat::default(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// Rate limiting; unlimited when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: None,
            headers: StringMap::new(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

// ============================================================================
// Loading
// ============================================================================

impl PagerConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config '{}'", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!("Loading pager config from {}", path.display());
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Check the configuration for values that can never work
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be at least 1"));
        }

        if self.envelope.records_path.trim().is_empty() {
            return Err(Error::invalid_value(
                "envelope.records_path",
                "cannot be empty",
            ));
        }

        self.endpoint_template()?;
        Ok(())
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Parsed endpoint template
    pub fn endpoint_template(&self) -> Result<EndpointTemplate> {
        EndpointTemplate::parse(self.endpoint.as_str())
    }

    /// Options for the pagination session
    pub fn pager_options(&self) -> PagerOptions {
        PagerOptions::with_page_size(self.page_size).dedupe_by_id(self.dedupe_by_id)
    }

    /// HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .user_agent(
                self.http
                    .user_agent
                    .clone()
                    .unwrap_or_else(default_user_agent),
            );

        for (key, value) in &self.http.headers {
            builder = builder.header(key, value);
        }

        if let Some(rate_limit) = self.http.rate_limit {
            builder = builder.rate_limit(rate_limit);
        }

        builder.build()
    }

    /// Build the HTTP fetch client described by this config
    pub fn build_fetch_client<R>(&self) -> Result<HttpFetchClient<R>>
    where
        R: DeserializeOwned + 'static,
    {
        let http = HttpClient::with_config(self.http_client_config())?;
        let decoder = JsonEnvelopeDecoder::new(self.envelope.clone());
        Ok(HttpFetchClient::with_decoder(
            self.endpoint_template()?,
            http,
            decoder,
        ))
    }

    /// Build a ready pagination session
    pub fn build_pager<R>(&self) -> Result<Pager<R, HttpFetchClient<R>>>
    where
        R: Record + DeserializeOwned,
    {
        self.validate()?;
        let client = self.build_fetch_client()?;
        Pager::with_options(client, self.pager_options())
    }
}
