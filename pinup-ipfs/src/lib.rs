//! Pinata client for pinning files and JSON documents to IPFS.
//!
//! Uses the legacy `pinning/*` API with key/secret header auth.

mod config;
mod pinata;
mod response;

pub use config::PinataConfig;
pub use pinata::PinataClient;
pub use response::ErrorBody;
