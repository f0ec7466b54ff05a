//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod gateway;
mod scheduler;

pub use gateway::{AccountRow, AccountUpdate, PersistenceGateway};
pub use scheduler::{WriteJob, WriteScheduler};
