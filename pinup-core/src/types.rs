//! Domain types for PINUP.
//!
//! - [`PinResult`]: what the pinning service returns for a successful pin
//! - [`AssetMetadata`]: the JSON document pinned next to every asset

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DESCRIPTION, IPFS_SCHEME};

/// Formats a content hash as an `ipfs://` URI.
pub fn ipfs_uri(content_hash: &str) -> String {
    format!("{}{}", IPFS_SCHEME, content_hash)
}

/// Successful pin response.
///
/// # Wire Format
/// ```json
/// {"IpfsHash": "Qm...", "PinSize": 1234, "Timestamp": "2024-01-01T00:00:00.000Z", "IsDuplicate": false}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinResult {
    /// Content identifier of the pinned data
    #[serde(rename = "IpfsHash")]
    pub content_hash: String,
    /// Size of the pinned DAG in bytes
    #[serde(rename = "PinSize")]
    pub size_bytes: u64,
    /// ISO-8601 time the pin was recorded
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// Whether the content was already pinned on this account
    #[serde(rename = "IsDuplicate", default)]
    pub is_duplicate: bool,
}

impl PinResult {
    /// Returns the `ipfs://` URI of the pinned content.
    pub fn ipfs_uri(&self) -> String {
        ipfs_uri(&self.content_hash)
    }

    /// Parses the timestamp, if it is valid RFC 3339.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Metadata document pinned for every asset.
///
/// Field names follow the ERC-721 metadata JSON schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Asset name (the uploaded file name)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// `ipfs://` URI of the pinned asset
    pub image: String,
}

impl AssetMetadata {
    /// Creates metadata for an asset pinned under `content_hash`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        content_hash: &str,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: ipfs_uri(content_hash),
        }
    }

    /// Creates metadata with the default description.
    pub fn with_default_description(name: impl Into<String>, content_hash: &str) -> Self {
        Self::new(name, DEFAULT_DESCRIPTION, content_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_pin_result_from_wire() {
        let json = r#"{"IpfsHash":"QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG","PinSize":4096,"Timestamp":"2024-03-01T12:30:00.000Z","IsDuplicate":true}"#;
        let result: PinResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.content_hash, "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
        assert_eq!(result.size_bytes, 4096);
        assert_eq!(result.timestamp, "2024-03-01T12:30:00.000Z");
        assert!(result.is_duplicate);
    }

    #[test]
    fn test_pin_result_duplicate_defaults_false() {
        let json = r#"{"IpfsHash":"Qm123","PinSize":1,"Timestamp":"2024-03-01T12:30:00Z"}"#;
        let result: PinResult = serde_json::from_str(json).unwrap();
        assert!(!result.is_duplicate);
    }

    #[test]
    fn test_pin_result_missing_hash_rejected() {
        let json = r#"{"PinSize":1,"Timestamp":"2024-03-01T12:30:00Z"}"#;
        assert!(serde_json::from_str::<PinResult>(json).is_err());
    }

    #[test_case("2024-03-01T12:30:00.000Z", true ; "utc millis")]
    #[test_case("2024-03-01T12:30:00+02:00", true ; "offset")]
    #[test_case("yesterday", false ; "garbage")]
    fn test_parsed_timestamp(timestamp: &str, valid: bool) {
        let result = PinResult {
            content_hash: "Qm123".into(),
            size_bytes: 1,
            timestamp: timestamp.into(),
            is_duplicate: false,
        };
        assert_eq!(result.parsed_timestamp().is_some(), valid);
    }

    #[test]
    fn test_metadata_wire_shape() {
        let metadata = AssetMetadata::with_default_description("cat.png", "Qm123");
        assert_eq!(
            serde_json::to_string(&metadata).unwrap(),
            r#"{"name":"cat.png","description":"Thank you for your support!","image":"ipfs://Qm123"}"#
        );
    }

    #[test]
    fn test_metadata_custom_description() {
        let metadata = AssetMetadata::new("dog.gif", "Limited edition", "bafyabc");
        assert_eq!(metadata.description, "Limited edition");
        assert_eq!(metadata.image, "ipfs://bafyabc");
    }
}
