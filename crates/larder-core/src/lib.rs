//! Cross-cutting service plumbing: config loading, error envelope, health probes,
//! request ids, tracing setup and sea-orm helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod tracing;
