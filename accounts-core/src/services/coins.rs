//! Coin ledger - atomic, audited mutation of an account's coin balance

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::result::{Error, Result};
use crate::domain::CoinTransaction;
use crate::ports::PersistenceGateway;

/// Audited balance mutation for one account
///
/// The ledger owns no storage of its own; every operation is a single-shot
/// read-check-write through the gateway against the bound account id. The
/// balance write and its audit entry go through the gateway's combined
/// atomic write, so a failure can never leave an unaudited balance change.
pub struct CoinLedger {
    gateway: Arc<dyn PersistenceGateway>,
    account_id: u32,
}

impl CoinLedger {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, account_id: u32) -> Self {
        Self {
            gateway,
            account_id,
        }
    }

    /// Authoritative balance read from storage; never cached
    pub fn balance(&self) -> Result<u32> {
        self.gateway.fetch_coin_balance(self.account_id).map_err(|e| {
            warn!(account_id = self.account_id, error = %e, "coin balance read failed");
            Error::Database
        })
    }

    /// Add coins, returning the new balance.
    ///
    /// Fails `CoinOverflow` when the sum would exceed `u32::MAX`; the balance
    /// is left untouched and no audit entry is written.
    pub fn add(&self, amount: u32) -> Result<u32> {
        let current = self.balance()?;
        let next = current.checked_add(amount).ok_or(Error::CoinOverflow)?;
        self.commit(next, CoinTransaction::add(amount))
    }

    /// Remove coins, returning the new balance.
    ///
    /// Fails `InsufficientCoins` when `amount` exceeds the current balance;
    /// the balance is left untouched and no audit entry is written.
    pub fn remove(&self, amount: u32) -> Result<u32> {
        let current = self.balance()?;
        let next = current.checked_sub(amount).ok_or(Error::InsufficientCoins)?;
        self.commit(next, CoinTransaction::remove(amount))
    }

    fn commit(&self, new_balance: u32, tx: CoinTransaction) -> Result<u32> {
        self.gateway
            .write_coin_balance_and_log(self.account_id, new_balance, &tx)
            .map_err(|e| {
                warn!(account_id = self.account_id, error = %e, "coin write failed");
                Error::Database
            })?;
        debug!(
            account_id = self.account_id,
            kind = ?tx.kind,
            amount = tx.amount,
            new_balance,
            "coin balance updated"
        );
        Ok(new_balance)
    }
}
