//! Common traits for PINUP.
//!
//! The uploader talks to the pinning service only through [`Pinner`], so
//! batch logic can run against Pinata or any stand-in backend.

use async_trait::async_trait;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::types::PinResult;

// ═══════════════════════════════════════════════════════════════════════════════
// PINNING TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for a remote pinning service.
///
/// Every call takes a cancellation token. Cancelling it must abort the
/// in-flight request and return [`PinupError::Cancelled`](crate::PinupError::Cancelled).
#[async_trait]
pub trait Pinner: Send + Sync {
    /// Pins the full contents of `reader` under the given file name.
    ///
    /// The reader is consumed but not closed; the caller owns it.
    async fn pin_file(
        &self,
        cancel: &CancellationToken,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        filename: &str,
    ) -> Result<PinResult>;

    /// Pins a JSON document.
    async fn pin_json_value(
        &self,
        cancel: &CancellationToken,
        data: &serde_json::Value,
    ) -> Result<PinResult>;
}
