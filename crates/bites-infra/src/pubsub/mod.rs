//! Pub/sub implementations.

mod memory;

pub use memory::InMemoryPubSub;
