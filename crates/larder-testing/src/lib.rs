//! Test utilities for Larder services.
//!
//! Import from `[dev-dependencies]` only, never from production code.

pub mod auth;
