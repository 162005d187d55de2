//! Blob store implementations - filesystem and in-memory fallback.

mod fs;
mod memory;

pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
