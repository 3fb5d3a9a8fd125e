//! URL verification
//!
//! This module builds the shared HTTP client and checks the live status of
//! pages and assets with a HEAD-first, GET-fallback protocol.

pub mod client;
pub mod verifier;

// Re-export commonly used items
pub use client::build_client;
pub use verifier::{CheckUrls, PageFailure, StatusVerifier, VerifyOptions, describe_error};
