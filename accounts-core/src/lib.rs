//! Accounts Core - account records, coin ledger, and roster access
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (AccountRecord, CoinTransaction, etc.)
//! - **ports**: Trait definitions for external dependencies (PersistenceGateway, WriteScheduler)
//! - **services**: Business logic orchestration (AccountService, CoinLedger)
//! - **adapters**: Concrete implementations (in-memory gateway, tokio scheduler)
//!
//! The library is synchronous and does no internal locking: callers serialize
//! access to a service instance, and the storage and deferred-write
//! collaborators are injected rather than owned.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types at crate root
pub use config::ServiceConfig;
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{
    AccountRecord, AccountType, CoinTransaction, CoinTransactionKind, GroupType, Player,
};
pub use ports::{AccountRow, AccountUpdate, PersistenceGateway, WriteJob, WriteScheduler};
pub use services::{AccountService, CoinLedger};
