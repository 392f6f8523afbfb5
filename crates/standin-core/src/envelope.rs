//! Top-level response envelope.

use chrono::Utc;
use serde::Serialize;

/// Status code for successful responses.
pub const CODE_OK: u16 = 200;

/// Uniform wrapper around every mock API response.
///
/// Serializes as `{code, message, data, timestamp}` where `timestamp` is
/// epoch milliseconds at construction time and `data` is JSON `null` for
/// error envelopes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// Status code following HTTP conventions (200 success, 404 absent, ...)
    pub code: u16,

    /// Human-readable outcome, `"success"` for ok responses
    pub message: String,

    /// The payload; absent on errors
    pub data: Option<T>,

    /// Construction time in epoch milliseconds
    pub timestamp: i64,
}

impl<T> Envelope<T> {
    /// Wrap a payload in a 200/"success" envelope.
    pub fn ok(data: T) -> Self {
        Self::with(CODE_OK, "success", Some(data))
    }

    /// Build an envelope with an explicit code and message.
    pub fn with(code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Build an error envelope with no payload.
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self::with(code, message, None)
    }

    /// Whether this envelope reports success.
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}
