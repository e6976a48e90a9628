//! Endpoint template interpolation
//!
//! Handles `{{ variable }}` interpolation in endpoint URLs. A page endpoint
//! carries exactly two substitution points, `{{ page }}` and
//! `{{ page_size }}`, for example:
//!
//! ```text
//! https://randomuser.me/api/?page={{ page }}&results={{ page_size }}
//! ```

use crate::error::{Error, Result};
use crate::types::PageRequest;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

/// Regex for matching template variables: {{ variable }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").expect("template regex is valid")
});

/// Variable substituted with the 1-based page number
pub const PAGE_VAR: &str = "page";

/// Variable substituted with the page size
pub const PAGE_SIZE_VAR: &str = "page_size";

/// Render a template string, replacing every variable from `vars`
///
/// Fails with [`Error::UndefinedVariable`] listing every variable that has no
/// value.
pub fn render(template: &str, vars: &[(&str, String)]) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = TEMPLATE_REGEX.replace_all(template, |cap: &Captures<'_>| {
        let name = &cap[1];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => value.clone(),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// Extract all variable names from a template
pub fn extract_variables(template: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// A validated page endpoint template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate {
    raw: String,
}

impl EndpointTemplate {
    /// Parse and validate an endpoint template
    ///
    /// The template must reference both `{{ page }}` and `{{ page_size }}`,
    /// must not reference anything else, and must render to an absolute
    /// `http` or `https` URL.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let vars = extract_variables(&raw);

        let unknown: Vec<&str> = vars
            .iter()
            .map(String::as_str)
            .filter(|v| *v != PAGE_VAR && *v != PAGE_SIZE_VAR)
            .collect();
        if !unknown.is_empty() {
            return Err(Error::undefined_var(unknown.join(", ")));
        }

        for required in [PAGE_VAR, PAGE_SIZE_VAR] {
            if !vars.iter().any(|v| v == required) {
                return Err(Error::template(format!(
                    "endpoint '{raw}' is missing the {{{{ {required} }}}} placeholder"
                )));
            }
        }

        let template = Self { raw };
        // Probe render so URL problems surface at construction time
        template.render(PageRequest {
            page_number: 1,
            page_size: 1,
        })?;
        Ok(template)
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Render the URL for a page request
    pub fn render(&self, request: PageRequest) -> Result<Url> {
        let rendered = render(
            &self.raw,
            &[
                (PAGE_VAR, request.page_number.to_string()),
                (PAGE_SIZE_VAR, request.page_size.to_string()),
            ],
        )?;

        let url = Url::parse(&rendered)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::config(format!(
                "unsupported endpoint scheme '{other}' in {rendered}"
            ))),
        }
    }
}

impl std::fmt::Display for EndpointTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
