//! Account service - load/save lifecycle and field access for one account

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::domain::result::{Error, Result};
use crate::domain::{AccountRecord, AccountType, Player};
use crate::ports::{AccountRow, AccountUpdate, PersistenceGateway, WriteJob, WriteScheduler};
use crate::services::coins::CoinLedger;

/// Single point of access for one account's lifecycle and field mutation
///
/// Construction performs no I/O; `load` populates the record through the
/// bound gateway, setters mutate the in-memory copy, and `save` writes the
/// scalar fields back. Coin mutations go through [`CoinLedger`] and write
/// through immediately - they are never part of `save`.
///
/// An instance is owned by one logical caller at a time. The service does no
/// internal locking, so concurrent calls on the same instance must be
/// serialized by the owner.
pub struct AccountService {
    gateway: Option<Arc<dyn PersistenceGateway>>,
    scheduler: Option<Arc<dyn WriteScheduler>>,
    config: ServiceConfig,
    record: AccountRecord,
    lookup_name: Option<String>,
    players: Option<Vec<Player>>,
}

impl AccountService {
    /// Create an unbound service; `load` fails `InvalidId` until an identity
    /// is supplied
    pub fn new() -> Self {
        Self {
            gateway: None,
            scheduler: None,
            config: ServiceConfig::default(),
            record: AccountRecord::default(),
            lookup_name: None,
            players: None,
        }
    }

    /// Create a service bound to an account id
    pub fn with_id(id: u32) -> Self {
        let mut service = Self::new();
        service.record.id = Some(id);
        service
    }

    /// Create a service bound to a lookup name (resolved against the email
    /// column)
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut service = Self::new();
        service.lookup_name = Some(name.into());
        service
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Wire the storage collaborator. Every data operation fails
    /// `NotInitialized` until both collaborators are bound.
    pub fn bind_gateway(&mut self, gateway: Arc<dyn PersistenceGateway>) {
        self.gateway = Some(gateway);
    }

    /// Wire the deferred-write collaborator
    pub fn bind_scheduler(&mut self, scheduler: Arc<dyn WriteScheduler>) {
        self.scheduler = Some(scheduler);
    }

    fn ensure_bound(&self) -> Result<()> {
        if self.gateway.is_some() && self.scheduler.is_some() {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn gateway(&self) -> Result<Arc<dyn PersistenceGateway>> {
        self.ensure_bound()?;
        self.gateway.clone().ok_or(Error::NotInitialized)
    }

    fn scheduler(&self) -> Result<Arc<dyn WriteScheduler>> {
        self.ensure_bound()?;
        self.scheduler.clone().ok_or(Error::NotInitialized)
    }

    // === Load / Save ===

    /// Load using whichever identity was supplied at construction; id takes
    /// precedence when both are set. Fails `InvalidId` without touching the
    /// gateway when neither is set.
    pub fn load(&mut self) -> Result<()> {
        self.ensure_bound()?;
        if let Some(id) = self.record.id {
            self.load_by_id(id)
        } else if let Some(name) = self.lookup_name.clone() {
            self.load_by_name(&name)
        } else {
            Err(Error::InvalidId)
        }
    }

    /// Load by explicit id. Fails `InvalidId` if the instance already holds a
    /// different id - a loaded instance cannot be silently re-pointed.
    pub fn load_by_id(&mut self, id: u32) -> Result<()> {
        let gateway = self.gateway()?;
        if self.record.id.is_some_and(|bound| bound != id) {
            return Err(Error::InvalidId);
        }
        let row = gateway
            .fetch_account_by_id(id)
            .map_err(|e| {
                warn!(id, error = %e, "account fetch failed");
                Error::Database
            })?
            .ok_or(Error::InvalidId)?;
        self.finish_load(&gateway, row)
    }

    /// Load by explicit lookup name. The fetched row's id must match an
    /// already-bound id, if any.
    pub fn load_by_name(&mut self, name: &str) -> Result<()> {
        let gateway = self.gateway()?;
        let row = gateway
            .fetch_account_by_name(name)
            .map_err(|e| {
                warn!(name, error = %e, "account fetch failed");
                Error::Database
            })?
            .ok_or(Error::InvalidId)?;
        if self.record.id.is_some_and(|bound| bound != row.id) {
            return Err(Error::InvalidId);
        }
        self.finish_load(&gateway, row)
    }

    /// Populate the record from a fetched row. All fallible steps happen
    /// before any field is mutated, so a failed load leaves the prior state
    /// intact.
    fn finish_load(&mut self, gateway: &Arc<dyn PersistenceGateway>, row: AccountRow) -> Result<()> {
        let id = row.id;
        let account_type = AccountType::try_from(row.account_type)?;
        let roster = gateway.fetch_roster(id).map_err(|e| {
            warn!(id, error = %e, "roster fetch failed");
            Error::Database
        })?;
        let players = roster.len();

        self.record.id = Some(id);
        self.record.email = row.email;
        self.record.password = row.password;
        self.record.premium_remaining_days = row.premium_remaining_days;
        self.record.premium_last_day = row.premium_last_day;
        self.record.account_type = account_type;
        self.players = Some(roster);

        debug!(id, players, "account loaded");
        Ok(())
    }

    /// Persist the current scalar fields for the bound id.
    ///
    /// Writes synchronously through the gateway, or enqueues a write job when
    /// the config asks for deferred saves. Coin balance and roster are never
    /// part of a save.
    pub fn save(&self) -> Result<()> {
        let gateway = self.gateway()?;
        let id = self.record.id.ok_or(Error::NotInitialized)?;
        let update = AccountUpdate {
            email: self.record.email.clone(),
            password: self.record.password.clone(),
            premium_remaining_days: self.record.premium_remaining_days,
            premium_last_day: self.record.premium_last_day,
            account_type: self.record.account_type,
        };

        if self.config.deferred_save {
            self.scheduler()?.enqueue(WriteJob::Account { id, update });
            debug!(id, "account save enqueued");
            return Ok(());
        }

        gateway.write_account(id, &update).map_err(|e| {
            warn!(id, error = %e, "account save failed");
            Error::Database
        })?;
        debug!(id, "account saved");
        Ok(())
    }

    // === Coins ===

    /// Ledger handle for the bound account; `NotInitialized` when the
    /// collaborators or the id are missing
    pub fn coins(&self) -> Result<CoinLedger> {
        let gateway = self.gateway()?;
        let id = self.record.id.ok_or(Error::NotInitialized)?;
        Ok(CoinLedger::new(gateway, id))
    }

    // === Getters and setters ===

    pub fn id(&self) -> Option<u32> {
        self.record.id
    }

    pub fn email(&self) -> &str {
        &self.record.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
        let email = email.into();
        AccountRecord::validate_email(&email)?;
        self.record.email = email;
        Ok(())
    }

    pub fn password(&self) -> &str {
        &self.record.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> Result<()> {
        let password = password.into();
        AccountRecord::validate_password(&password)?;
        self.record.password = password;
        Ok(())
    }

    pub fn premium_remaining_days(&self) -> u32 {
        self.record.premium_remaining_days
    }

    pub fn set_premium_remaining_days(&mut self, days: u32) {
        self.record.premium_remaining_days = days;
    }

    pub fn premium_last_day(&self) -> i64 {
        self.record.premium_last_day
    }

    /// Set the subscription's last active day, cross-validated against the
    /// remaining-days window (0 stays the "no premium" sentinel)
    pub fn set_premium_last_day(&mut self, last_day: i64) -> Result<()> {
        AccountRecord::validate_premium_window(
            self.record.premium_remaining_days,
            last_day,
            Utc::now().timestamp(),
        )?;
        self.record.premium_last_day = last_day;
        Ok(())
    }

    pub fn account_type(&self) -> AccountType {
        self.record.account_type
    }

    /// The type system already restricts the value to the five defined
    /// tiers; out-of-range storage values are rejected at load time instead.
    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.record.account_type = account_type;
    }

    // === Roster ===

    /// Snapshot of the roster loaded at `load` time, original order, not
    /// re-fetched. Fails `PlayersLoad` when no roster has materialized.
    pub fn get_players(&self) -> Result<Vec<Player>> {
        self.players.clone().ok_or(Error::PlayersLoad)
    }

    /// Look up one roster entry by exact name
    pub fn get_player(&self, name: &str) -> Result<Player> {
        let players = self.players.as_ref().ok_or(Error::PlayersLoad)?;
        players
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or(Error::PlayerNotFound)
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InlineScheduler, MemoryGateway};

    fn bound_service(id: u32) -> (AccountService, Arc<MemoryGateway>) {
        let gateway = Arc::new(MemoryGateway::new());
        gateway.insert_account(AccountRow {
            id,
            email: "user@example.com".into(),
            password: "hunter2".into(),
            premium_remaining_days: 0,
            premium_last_day: 0,
            account_type: 1,
        });
        let mut service = AccountService::with_id(id);
        service.bind_gateway(gateway.clone());
        service.bind_scheduler(Arc::new(InlineScheduler::new(gateway.clone())));
        (service, gateway)
    }

    #[test]
    fn test_data_ops_require_both_collaborators() {
        let mut service = AccountService::with_id(1);
        assert_eq!(service.load(), Err(Error::NotInitialized));
        assert_eq!(service.save(), Err(Error::NotInitialized));
        assert!(matches!(service.coins(), Err(Error::NotInitialized)));

        // Gateway alone is not enough
        service.bind_gateway(Arc::new(MemoryGateway::new()));
        assert_eq!(service.load(), Err(Error::NotInitialized));
    }

    #[test]
    fn test_setter_validation() {
        let (mut service, _) = bound_service(1);
        assert_eq!(service.set_email("  "), Err(Error::InvalidEmail));
        assert_eq!(service.set_password(""), Err(Error::InvalidPassword));
        assert!(service.set_email("new@example.com").is_ok());
        assert_eq!(service.email(), "new@example.com");
    }

    #[test]
    fn test_premium_last_day_cross_validation() {
        let (mut service, _) = bound_service(1);
        service.set_premium_remaining_days(5);
        let now = Utc::now().timestamp();
        assert!(service.set_premium_last_day(now - 86_400).is_ok());
        assert_eq!(
            service.set_premium_last_day(now - 30 * 86_400),
            Err(Error::InvalidLastDay)
        );
        // Sentinel clears premium
        assert!(service.set_premium_last_day(0).is_ok());
    }

    #[test]
    fn test_failed_load_leaves_prior_state() {
        let (mut service, gateway) = bound_service(1);
        service.load().unwrap();
        service.set_email("kept@example.com").unwrap();

        gateway.fail_all(true);
        assert_eq!(service.load(), Err(Error::Database));
        assert_eq!(service.email(), "kept@example.com");
    }

    #[test]
    fn test_load_rejects_out_of_range_stored_account_type() {
        let gateway = Arc::new(MemoryGateway::new());
        gateway.insert_account(AccountRow {
            id: 9,
            email: "x@example.com".into(),
            password: "pw".into(),
            premium_remaining_days: 0,
            premium_last_day: 0,
            account_type: 99,
        });
        let mut service = AccountService::with_id(9);
        service.bind_gateway(gateway.clone());
        service.bind_scheduler(Arc::new(InlineScheduler::new(gateway)));
        assert_eq!(service.load(), Err(Error::InvalidAccountType));
    }
}
