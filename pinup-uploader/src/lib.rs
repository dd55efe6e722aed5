//! # PINUP Uploader
//!
//! Walks a directory of assets and pins each one, followed by a metadata
//! document pointing at it.
//!
//! For every asset, in name order:
//!
//! 1. open the file and pin it,
//! 2. build `{"name", "description", "image": "ipfs://<hash>"}`,
//! 3. pin that document and record both hashes.
//!
//! The two pins are strictly ordered per asset and assets are processed one
//! at a time. Each file handle is released before moving on, whatever the
//! outcome.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pinup_ipfs::{PinataClient, PinataConfig};
//! use pinup_uploader::{AssetUploader, UploaderConfig};
//!
//! let client = PinataClient::new(&PinataConfig::new(key, secret))?;
//! let uploader = AssetUploader::with_config(client, UploaderConfig::new().keep_going());
//!
//! let report = uploader.run("./assets".as_ref()).await?;
//! for record in &report.uploaded {
//!     println!("{} -> {}", record.file, record.metadata_hash);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod assets;
mod report;

pub use assets::{asset_name, scan_assets};
pub use report::{ProgressCallback, UploadFailure, UploadProgress, UploadRecord, UploadReport};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use pinup_core::constants::DEFAULT_DESCRIPTION;
use pinup_core::error::{PinupError, Result};
use pinup_core::traits::Pinner;
use pinup_core::types::AssetMetadata;

/// What to do when an asset fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the batch on the first failure.
    #[default]
    FailFast,
    /// Record the failure and move on to the next asset.
    Continue,
}

/// Uploader configuration.
#[derive(Clone, Debug)]
pub struct UploaderConfig {
    /// Description written into every metadata document
    pub description: String,
    /// Failure handling
    pub policy: FailurePolicy,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.into(),
            policy: FailurePolicy::FailFast,
        }
    }
}

impl UploaderConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metadata description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Keeps going after a failed asset.
    pub fn keep_going(mut self) -> Self {
        self.policy = FailurePolicy::Continue;
        self
    }
}

/// Batch-level failure.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The assets directory could not be listed.
    #[error("failed to list assets in {}: {source}", .dir.display())]
    Scan {
        /// Directory that was scanned
        dir: PathBuf,
        /// Underlying failure
        source: PinupError,
    },

    /// An asset failed and the batch was aborted.
    #[error("failed to upload {}: {source}", .file.display())]
    Asset {
        /// Asset that failed
        file: PathBuf,
        /// Underlying failure
        source: PinupError,
    },
}

/// Sequential asset uploader.
pub struct AssetUploader<P> {
    pinner: P,
    config: UploaderConfig,
    cancel: CancellationToken,
    progress: Option<ProgressCallback>,
}

impl<P: Pinner> AssetUploader<P> {
    /// Creates an uploader with the default configuration.
    pub fn new(pinner: P) -> Self {
        Self::with_config(pinner, UploaderConfig::default())
    }

    /// Creates an uploader with a custom configuration.
    pub fn with_config(pinner: P, config: UploaderConfig) -> Self {
        Self {
            pinner,
            config,
            cancel: CancellationToken::new(),
            progress: None,
        }
    }

    /// Uses `cancel` for every request; cancelling it aborts the batch.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Registers a callback invoked after each asset.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&UploadProgress<'_>) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Returns the underlying pinning backend.
    pub fn pinner(&self) -> &P {
        &self.pinner
    }

    /// Pins one asset and its metadata.
    #[instrument(skip(self, path), fields(file = %path.display()))]
    pub async fn upload_asset(&self, path: &Path) -> Result<UploadRecord> {
        let name = asset_name(path)?;

        let image = {
            let mut file = File::open(path).await?;
            let pinned = self.pinner.pin_file(&self.cancel, &mut file, &name).await;
            drop(file);
            pinned?
        };

        let metadata = AssetMetadata::new(
            name.as_str(),
            self.config.description.as_str(),
            &image.content_hash,
        );
        let document = serde_json::to_value(&metadata)?;
        let pinned = self.pinner.pin_json_value(&self.cancel, &document).await?;

        Ok(UploadRecord {
            file: name,
            image_hash: image.content_hash,
            image_uri: metadata.image,
            metadata_hash: pinned.content_hash,
            duplicate: image.is_duplicate,
        })
    }

    /// Uploads every asset in `dir`.
    ///
    /// Under [`FailurePolicy::FailFast`] the first failure is returned. Under
    /// [`FailurePolicy::Continue`] failures are collected in the report, except
    /// cancellation, which always aborts.
    pub async fn run(&self, dir: &Path) -> std::result::Result<UploadReport, UploadError> {
        let assets = scan_assets(dir).await.map_err(|source| UploadError::Scan {
            dir: dir.to_path_buf(),
            source,
        })?;

        let total = assets.len();
        info!(count = total, dir = %dir.display(), "Uploading files to IPFS");

        let mut report = UploadReport::default();

        for (index, path) in assets.into_iter().enumerate() {
            let name = asset_name(&path).unwrap_or_default();
            let result = self.upload_asset(&path).await;

            if let Some(callback) = &self.progress {
                callback(&UploadProgress {
                    total,
                    processed: index + 1,
                    file: &name,
                    result: result.as_ref(),
                });
            }

            match result {
                Ok(record) => {
                    info!(file = %record.file, cid = %record.metadata_hash, "Uploaded asset");
                    report.uploaded.push(record);
                }
                Err(source) => {
                    let abort = self.config.policy == FailurePolicy::FailFast
                        || matches!(source, PinupError::Cancelled);
                    if abort {
                        error!(file = %name, error = %source, "Upload failed, aborting");
                        return Err(UploadError::Asset { file: path, source });
                    }

                    let status = source.status();
                    warn!(file = %name, ?status, error = %source, "Upload failed, continuing");
                    report.failed.push(UploadFailure {
                        file: name,
                        status,
                        error: source.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
