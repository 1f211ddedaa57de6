//! Common utilities for the facet drawing core.
//!
//! This crate provides shared infrastructure used by all components:
//! - **Warning System** - deduplicated warnings for recoverable misconfiguration

pub mod warning;
