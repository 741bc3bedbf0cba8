//! Save-store adapters
//!
//! Both adapters round-trip through JSON, so an in-memory save exercises the
//! same serde path as a file on disk.

mod json_file;
mod memory;

pub use json_file::JsonFileSaveStore;
pub use memory::InMemorySaveStore;
