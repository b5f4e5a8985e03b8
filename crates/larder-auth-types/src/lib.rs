//! Auth types shared across Larder crates.
//!
//! Provides JWT issuance/validation and the `Identity` / `Viewer` extractors.

pub mod identity;
pub mod token;
