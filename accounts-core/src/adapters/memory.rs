//! In-memory persistence gateway
//!
//! Implements the full storage port against a map, with seeding and
//! inspection helpers plus a failure toggle for exercising the
//! database-failure paths. Used by the test suites and available to
//! embedders that want a storage-free setup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::domain::{CoinTransaction, Player};
use crate::ports::{AccountRow, AccountUpdate, PersistenceGateway};

#[derive(Debug, Clone)]
struct StoredAccount {
    row: AccountRow,
    balance: u32,
    roster: Vec<Player>,
    log: Vec<CoinTransaction>,
}

/// In-memory fake of the durable storage boundary
pub struct MemoryGateway {
    accounts: Mutex<HashMap<u32, StoredAccount>>,
    fail_all: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            fail_all: AtomicBool::new(false),
        }
    }

    /// Seed an account row with an empty roster, zero balance, empty log
    pub fn insert_account(&self, row: AccountRow) {
        let mut accounts = self.accounts.lock().expect("lock poisoned");
        accounts.insert(
            row.id,
            StoredAccount {
                row,
                balance: 0,
                roster: Vec::new(),
                log: Vec::new(),
            },
        );
    }

    /// Seed the coin balance directly, bypassing the audit log
    pub fn set_balance(&self, id: u32, balance: u32) {
        let mut accounts = self.accounts.lock().expect("lock poisoned");
        if let Some(stored) = accounts.get_mut(&id) {
            stored.balance = balance;
        }
    }

    /// Seed the player roster
    pub fn set_roster(&self, id: u32, roster: Vec<Player>) {
        let mut accounts = self.accounts.lock().expect("lock poisoned");
        if let Some(stored) = accounts.get_mut(&id) {
            stored.roster = roster;
        }
    }

    /// Inspect the audit log for an account
    pub fn transaction_log(&self, id: u32) -> Vec<CoinTransaction> {
        let accounts = self.accounts.lock().expect("lock poisoned");
        accounts
            .get(&id)
            .map(|stored| stored.log.clone())
            .unwrap_or_default()
    }

    /// Inspect the stored scalar fields for an account
    pub fn stored_row(&self, id: u32) -> Option<AccountRow> {
        let accounts = self.accounts.lock().expect("lock poisoned");
        accounts.get(&id).map(|stored| stored.row.clone())
    }

    /// Make every gateway call fail until cleared
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated storage failure"));
        }
        Ok(())
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn fetch_account_by_id(&self, id: u32) -> Result<Option<AccountRow>> {
        self.check()?;
        let accounts = self.accounts.lock().map_err(|e| anyhow!("lock poisoned: {e}"))?;
        Ok(accounts.get(&id).map(|stored| stored.row.clone()))
    }

    fn fetch_account_by_name(&self, name: &str) -> Result<Option<AccountRow>> {
        self.check()?;
        let accounts = self.accounts.lock().map_err(|e| anyhow!("lock poisoned: {e}"))?;
        Ok(accounts
            .values()
            .find(|stored| stored.row.email == name)
            .map(|stored| stored.row.clone()))
    }

    fn write_account(&self, id: u32, update: &AccountUpdate) -> Result<()> {
        self.check()?;
        let mut accounts = self.accounts.lock().map_err(|e| anyhow!("lock poisoned: {e}"))?;
        let stored = accounts
            .get_mut(&id)
            .ok_or_else(|| anyhow!("no account with id {id}"))?;
        stored.row.email = update.email.clone();
        stored.row.password = update.password.clone();
        stored.row.premium_remaining_days = update.premium_remaining_days;
        stored.row.premium_last_day = update.premium_last_day;
        stored.row.account_type = update.account_type.as_u8();
        Ok(())
    }

    fn fetch_coin_balance(&self, id: u32) -> Result<u32> {
        self.check()?;
        let accounts = self.accounts.lock().map_err(|e| anyhow!("lock poisoned: {e}"))?;
        accounts
            .get(&id)
            .map(|stored| stored.balance)
            .ok_or_else(|| anyhow!("no account with id {id}"))
    }

    fn write_coin_balance_and_log(
        &self,
        id: u32,
        new_balance: u32,
        tx: &CoinTransaction,
    ) -> Result<()> {
        self.check()?;
        // Single locked section: balance and log entry land together or not
        // at all
        let mut accounts = self.accounts.lock().map_err(|e| anyhow!("lock poisoned: {e}"))?;
        let stored = accounts
            .get_mut(&id)
            .ok_or_else(|| anyhow!("no account with id {id}"))?;
        stored.balance = new_balance;
        stored.log.push(tx.clone());
        Ok(())
    }

    fn fetch_roster(&self, id: u32) -> Result<Vec<Player>> {
        self.check()?;
        let accounts = self.accounts.lock().map_err(|e| anyhow!("lock poisoned: {e}"))?;
        accounts
            .get(&id)
            .map(|stored| stored.roster.clone())
            .ok_or_else(|| anyhow!("no account with id {id}"))
    }
}
