//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
mod coin;
pub mod result;

pub use account::{AccountRecord, AccountType, GroupType, Player};
pub use coin::{CoinTransaction, CoinTransactionKind};
