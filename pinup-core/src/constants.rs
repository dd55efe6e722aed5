//! Protocol constants for PINUP.
//!
//! Endpoint paths and header names follow the Pinata pinning API
//! (`https://docs.pinata.cloud`, legacy `pinning/*` routes).

// ═══════════════════════════════════════════════════════════════════════════════
// PINATA ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the Pinata pinning API.
pub const PINATA_API_URL: &str = "https://api.pinata.cloud";

/// Path for pinning a file (multipart upload).
pub const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";

/// Path for pinning a raw JSON document.
pub const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

// ═══════════════════════════════════════════════════════════════════════════════
// AUTHENTICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Header carrying the Pinata API key.
pub const API_KEY_HEADER: &str = "pinata_api_key";

/// Header carrying the Pinata API secret.
pub const SECRET_API_KEY_HEADER: &str = "pinata_secret_api_key";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "PINATA_API_KEY";

/// Environment variable holding the API secret.
pub const SECRET_KEY_ENV: &str = "PINATA_SECRET_KEY";

// ═══════════════════════════════════════════════════════════════════════════════
// UPLOADS
// ═══════════════════════════════════════════════════════════════════════════════

/// Multipart field name for the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Content type of the uploaded file part.
pub const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// URI scheme used when referencing pinned content from metadata.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Description written into every metadata document unless overridden.
pub const DEFAULT_DESCRIPTION: &str = "Thank you for your support!";

/// Directory scanned for assets when none is given.
pub const DEFAULT_ASSETS_DIR: &str = "./assets";

/// Default request timeout in seconds.
///
/// File uploads can be large, so this is longer than a typical API call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_join_cleanly() {
        assert!(!PINATA_API_URL.ends_with('/'));
        assert!(PIN_FILE_PATH.starts_with('/'));
        assert!(PIN_JSON_PATH.starts_with('/'));
        assert_eq!(
            format!("{}{}", PINATA_API_URL, PIN_FILE_PATH),
            "https://api.pinata.cloud/pinning/pinFileToIPFS"
        );
        assert_eq!(
            format!("{}{}", PINATA_API_URL, PIN_JSON_PATH),
            "https://api.pinata.cloud/pinning/pinJSONToIPFS"
        );
    }

    #[test]
    fn test_auth_headers_distinct() {
        assert_ne!(API_KEY_HEADER, SECRET_API_KEY_HEADER);
    }
}
