// Adapters layer: concrete implementations of the domain ports.

pub mod memory_store;
pub mod rest_store;

pub use memory_store::MemoryMemberStore;
pub use rest_store::RestMemberStore;
