//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON file for the KvStore port (production)
//! - In-memory map for the KvStore port (tests and fixtures)

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
