//! Decoder implementations

use super::types::{EnvelopeFormat, PageDecoder};
use crate::error::{Error, Result};
use crate::record::PageEnvelope;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

// ============================================================================
// JSON Envelope Decoder
// ============================================================================

/// JSON decoder that extracts records and metadata by dot path
#[derive(Debug, Clone)]
pub struct JsonEnvelopeDecoder<R> {
    format: EnvelopeFormat,
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonEnvelopeDecoder<R> {
    /// Create a decoder for the given layout
    pub fn new(format: EnvelopeFormat) -> Self {
        Self {
            format,
            _record: PhantomData,
        }
    }

    /// The layout this decoder reads
    pub fn format(&self) -> &EnvelopeFormat {
        &self.format
    }
}

impl<R> Default for JsonEnvelopeDecoder<R> {
    fn default() -> Self {
        Self::new(EnvelopeFormat::default())
    }
}

impl<R: DeserializeOwned> PageDecoder<R> for JsonEnvelopeDecoder<R> {
    fn decode(&self, body: &str, requested_page: u32) -> Result<PageEnvelope<R>> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;

        let path = &self.format.records_path;
        let raw_records = match extract_simple_path(&value, path) {
            Some(Value::Array(arr)) => arr,
            Some(other) => {
                return Err(Error::extraction(
                    path,
                    format!("expected an array, found {}", type_name(other)),
                ))
            }
            None => return Err(Error::extraction(path, "path not found in response")),
        };

        let records = raw_records
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                R::deserialize(raw).map_err(|e| Error::Decode {
                    message: format!("record {index} at '{path}' does not match schema: {e}"),
                })
            })
            .collect::<Result<Vec<R>>>()?;

        let result_count = match &self.format.result_count_path {
            Some(count_path) => read_u32(&value, count_path)?,
            None => None,
        }
        .unwrap_or(records.len() as u32);

        let page_number = match &self.format.page_path {
            Some(page_path) => read_u32(&value, page_path)?,
            None => None,
        }
        .unwrap_or(requested_page);

        Ok(PageEnvelope {
            records,
            result_count,
            page_number,
        })
    }
}

/// Read an optional unsigned integer; accepts numbers and numeric strings
///
/// Missing fields yield `None`; fields of the wrong type are a decode error.
fn read_u32(value: &Value, path: &str) -> Result<Option<u32>> {
    let Some(field) = extract_simple_path(value, path) else {
        return Ok(None);
    };

    let parsed = match field {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };

    parsed.map(Some).ok_or_else(|| {
        Error::extraction(
            path,
            format!("expected an unsigned integer, found {field}"),
        )
    })
}

/// Resolve a dot path such as `info.page`, `$.data.items` or `pages[0].items`
///
/// `$` (or an empty path) resolves to the root.
pub(crate) fn extract_simple_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        // Handle array indexing like "data[0]" or "items[-1]"
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].strip_suffix(']')?;

            if !name.is_empty() {
                current = current.get(name)?;
            }

            let index = index_str.parse::<i64>().ok()?;
            let Value::Array(arr) = current else {
                return None;
            };
            #[allow(clippy::cast_possible_wrap)]
            let idx = if index < 0 {
                usize::try_from(arr.len() as i64 + index).ok()?
            } else {
                usize::try_from(index).ok()?
            };
            current = arr.get(idx)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
