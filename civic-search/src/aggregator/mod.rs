//! Federated search aggregator: concurrent provider fan-out, category filter,
//! dedup, stable sort, and pagination.
//!
//! This module queries every registered provider concurrently under a
//! per-provider timeout, merges whatever comes back, collapses duplicates by
//! normalised URL (or title), orders the survivors by the requested key, and
//! cuts the requested page from the capped list.

pub mod dedup;
pub mod paginate;
pub mod ranking;
pub mod search;
pub mod url_normalize;

pub use search::Aggregator;
