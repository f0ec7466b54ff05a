//! Adapters - concrete implementations of the ports

mod memory;
mod spawn;

pub use memory::MemoryGateway;
pub use spawn::{InlineScheduler, SpawnScheduler};
