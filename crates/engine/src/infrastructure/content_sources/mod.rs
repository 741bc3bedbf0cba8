//! Content source implementations.
//!
//! Loads companion pools supplied by the host instead of the built-in cast.

pub mod companion_json;

pub use companion_json::{companion_pool_from_json, CompanionPoolImporter, ImportError};
