//! Error types for PINUP.
//!
//! Every failure of a pinning call lands in one of four families:
//! transport, service (known or unknown reason), decode, and local I/O.

use thiserror::Error;

/// Result type alias using `PinupError`.
pub type Result<T> = std::result::Result<T, PinupError>;

/// Main error type for all PINUP operations.
#[derive(Debug, Error)]
pub enum PinupError {
    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Sending the request or reading the response failed (connection, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The caller cancelled the request before a response arrived.
    #[error("HTTP request cancelled")]
    Cancelled,

    // ═══════════════════════════════════════════════════════════════════════════
    // SERVICE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The pinning service rejected the request and said why.
    #[error("pinata error: {message}")]
    Service {
        /// HTTP status of the response
        status: u16,
        /// Reason reported by the service
        message: String,
    },

    /// The pinning service rejected the request with an unrecognized body.
    #[error("unknown error")]
    UnknownService {
        /// HTTP status of the response
        status: u16,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A response body was not valid JSON or did not match the expected schema.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOCAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PinupError {
    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, PinupError::Transport(_) | PinupError::Cancelled)
    }

    /// Returns true if the service answered with a non-200 status.
    pub fn is_service(&self) -> bool {
        matches!(
            self,
            PinupError::Service { .. } | PinupError::UnknownService { .. }
        )
    }

    /// Returns true if a response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, PinupError::Decode(_))
    }

    /// HTTP status of the failed response, if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            PinupError::Service { status, .. } | PinupError::UnknownService { status } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PinupError::Service {
            status: 401,
            message: "bad key".into(),
        };
        assert_eq!(err.to_string(), "pinata error: bad key");
        assert_eq!(PinupError::UnknownService { status: 500 }.to_string(), "unknown error");
    }

    #[test]
    fn test_error_classification() {
        assert!(PinupError::Transport("refused".into()).is_transport());
        assert!(PinupError::Cancelled.is_transport());
        assert!(!PinupError::Cancelled.is_service());

        assert!(PinupError::UnknownService { status: 400 }.is_service());
        assert!(!PinupError::UnknownService { status: 400 }.is_decode());

        assert!(PinupError::Decode("eof".into()).is_decode());
        assert!(!PinupError::Decode("eof".into()).is_service());
    }

    #[test]
    fn test_status() {
        let err = PinupError::Service {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(PinupError::Cancelled.status(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        // Map keys must serialize as strings
        let mut map = std::collections::HashMap::new();
        map.insert((1u8, 2u8), "x");

        let pinup_result: Result<String> = serde_json::to_string(&map).map_err(PinupError::from);
        assert!(matches!(pinup_result, Err(PinupError::Encode(_))));
    }
}
