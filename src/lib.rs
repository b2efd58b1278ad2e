//! Civic portal search service.
//!
//! This crate composes the `civic-search` core into the portal's search
//! entry point:
//! Config → Aggregator + region services → scoped search → response envelope
//!
//! # Architecture
//!
//! - **Config**: one TOML file (`PortalConfig`) with environment overrides
//!   for the live-API credentials
//! - **Portal**: built once at process start; owns the federated aggregator,
//!   the local-corpus service, and the live-API service
//! - **Scopes**: each request names `federated`, `local` or `live`
//! - **Envelope**: responses gain a request id, measured search time and a
//!   timestamp

pub mod config;
pub mod error;
pub mod portal;

pub use config::PortalConfig;
pub use error::{PortalError, Result};
pub use portal::{Portal, PortalResponse, SearchScope};
