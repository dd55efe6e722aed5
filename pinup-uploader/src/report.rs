//! Per-run bookkeeping.

use serde::Serialize;

use pinup_core::error::PinupError;

/// A fully processed asset: file pinned, then its metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadRecord {
    /// Asset file name
    pub file: String,
    /// Content hash of the asset itself
    pub image_hash: String,
    /// `ipfs://` URI written into the metadata
    pub image_uri: String,
    /// Content hash of the metadata document
    pub metadata_hash: String,
    /// Whether the asset was already pinned
    pub duplicate: bool,
}

/// An asset skipped under [`FailurePolicy::Continue`](crate::FailurePolicy::Continue).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    /// Asset file name
    pub file: String,
    /// HTTP status, when the service rejected the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Rendered error
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UploadReport {
    /// Assets uploaded, in processing order
    pub uploaded: Vec<UploadRecord>,
    /// Assets that failed and were skipped
    pub failed: Vec<UploadFailure>,
}

impl UploadReport {
    /// Number of assets processed.
    pub fn total(&self) -> usize {
        self.uploaded.len() + self.failed.len()
    }

    /// True if no asset failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Progress update emitted after each asset.
#[derive(Debug)]
pub struct UploadProgress<'a> {
    /// Assets found in the directory
    pub total: usize,
    /// Assets processed so far, including this one
    pub processed: usize,
    /// File name of this asset
    pub file: &'a str,
    /// What happened to it
    pub result: Result<&'a UploadRecord, &'a PinupError>,
}

/// Callback for progress updates.
pub type ProgressCallback = Box<dyn Fn(&UploadProgress<'_>) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_json_carries_status_when_known() {
        let report = UploadReport {
            uploaded: vec![],
            failed: vec![
                UploadFailure {
                    file: "a.png".into(),
                    status: Some(401),
                    error: "pinata error: bad key".into(),
                },
                UploadFailure {
                    file: "b.png".into(),
                    status: None,
                    error: "transport error: refused".into(),
                },
            ],
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["failed"][0]["status"], json!(401));
        assert!(value["failed"][1].get("status").is_none());
        assert_eq!(report.total(), 2);
        assert!(!report.is_success());
    }
}
