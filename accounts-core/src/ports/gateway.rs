//! Persistence gateway port - durable storage abstraction

use serde::{Deserialize, Serialize};

use crate::domain::{AccountType, CoinTransaction, Player};

/// One account's scalar fields as stored
///
/// `account_type` stays raw here; the service converts it on load and
/// rejects out-of-range stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: u32,
    pub email: String,
    pub password: String,
    pub premium_remaining_days: u32,
    pub premium_last_day: i64,
    pub account_type: u8,
}

/// Scalar fields written back by a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub email: String,
    pub password: String,
    pub premium_remaining_days: u32,
    pub premium_last_day: i64,
    pub account_type: AccountType,
}

/// Synchronous storage port
///
/// Implementations own connection management, query execution, and
/// storage-level transactions. Errors are opaque to the core: every failure
/// returned here is mapped to `Error::Database` at the service boundary.
/// The gateway is shared and externally owned; the core never closes or
/// reconfigures it.
pub trait PersistenceGateway: Send + Sync {
    /// Fetch one account row by id, `None` when no row matches
    fn fetch_account_by_id(&self, id: u32) -> anyhow::Result<Option<AccountRow>>;

    /// Fetch one account row by lookup name (resolved against the email
    /// column), `None` when no row matches
    fn fetch_account_by_name(&self, name: &str) -> anyhow::Result<Option<AccountRow>>;

    /// Overwrite the scalar fields of an existing account
    fn write_account(&self, id: u32, update: &AccountUpdate) -> anyhow::Result<()>;

    /// Read the authoritative coin balance
    fn fetch_coin_balance(&self, id: u32) -> anyhow::Result<u32>;

    /// Persist a new balance together with its audit entry.
    ///
    /// Must be atomic: either both the balance and the log entry persist, or
    /// neither does.
    fn write_coin_balance_and_log(
        &self,
        id: u32,
        new_balance: u32,
        tx: &CoinTransaction,
    ) -> anyhow::Result<()>;

    /// Fetch the account's player roster in stored order
    fn fetch_roster(&self, id: u32) -> anyhow::Result<Vec<Player>>;
}
