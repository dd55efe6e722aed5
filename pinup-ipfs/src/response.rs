//! Decoding of Pinata error responses.
//!
//! Pinata reports failures in two shapes:
//!
//! ```text
//! {"error": "Invalid API key"}
//! {"error": {"reason": "...", "details": "Rate limit exceeded"}}
//! ```
//!
//! Anything else is treated as an unknown error, never echoed back raw.

use serde::de::DeserializeOwned;
use serde_json::{Deserializer, Map, Value};

use pinup_core::error::PinupError;

/// Outcome of matching a non-200 response body against the known shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorBody {
    /// The service gave a reason.
    Known(String),
    /// Valid JSON in neither known shape.
    Unknown,
    /// Not valid JSON, or JSON other than an object or `null`.
    Malformed(String),
}

impl ErrorBody {
    /// Parses and matches a response body.
    pub fn parse(body: &[u8]) -> Self {
        // `null` decodes to `None` and is matched like an empty object
        match first_value::<Option<Map<String, Value>>>(body) {
            Ok(Some(object)) => Self::match_shape(&object),
            Ok(None) => Self::Unknown,
            Err(reason) => Self::Malformed(reason),
        }
    }

    /// Tries `error: "<msg>"`, then `error: {"details": "<msg>"}`.
    fn match_shape(object: &Map<String, Value>) -> Self {
        let error = object.get("error");

        if let Some(message) = error.and_then(Value::as_str) {
            return Self::Known(message.to_string());
        }

        if let Some(details) = error
            .and_then(Value::as_object)
            .and_then(|inner| inner.get("details"))
            .and_then(Value::as_str)
        {
            return Self::Known(details.to_string());
        }

        Self::Unknown
    }

    /// Converts the outcome into the error surfaced to callers.
    pub fn into_error(self, status: u16) -> PinupError {
        match self {
            Self::Known(message) => PinupError::Service { status, message },
            Self::Unknown => PinupError::UnknownService { status },
            Self::Malformed(reason) => {
                PinupError::Decode(format!("error response (HTTP {}): {}", status, reason))
            }
        }
    }
}

/// Decodes the first JSON value in `body`, ignoring anything after it.
pub(crate) fn first_value<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    match Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(value) => value.map_err(|e| e.to_string()),
        None => Err("empty body".to_string()),
    }
}
