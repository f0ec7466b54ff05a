//! Coin transaction domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a coin balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CoinTransactionKind {
    Add = 1,
    Remove = 2,
}

/// An immutable audit entry recorded alongside every balance change
///
/// Entries exist only as a derived trail of balance writes: the ledger never
/// records one without the matching balance change in the same atomic unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinTransaction {
    pub id: Uuid,
    pub kind: CoinTransactionKind,
    pub amount: u32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl CoinTransaction {
    pub fn new(kind: CoinTransactionKind, amount: u32, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    /// Audit entry for a balance increase
    pub fn add(amount: u32) -> Self {
        Self::new(CoinTransactionKind::Add, amount, "coins added")
    }

    /// Audit entry for a balance decrease
    pub fn remove(amount: u32) -> Self {
        Self::new(CoinTransactionKind::Remove, amount, "coins removed")
    }
}
