//! # PINUP Core
//!
//! Core types, errors, and traits shared by the PINUP crates.
//!
//! - **Types**: [`PinResult`] and [`AssetMetadata`]
//! - **Errors**: [`PinupError`], split into transport, service, decode and local failures
//! - **Constants**: Pinata endpoints, headers and defaults
//! - **Traits**: [`Pinner`], the seam between the uploader and the pinning backend
//!
//! ## Example
//!
//! ```rust
//! use pinup_core::AssetMetadata;
//!
//! let metadata = AssetMetadata::with_default_description("cat.png", "Qm123");
//! assert_eq!(metadata.image, "ipfs://Qm123");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PinupError, Result};
pub use traits::*;
pub use types::*;
