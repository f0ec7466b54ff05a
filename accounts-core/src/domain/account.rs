//! Account domain model

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Account tier
///
/// Stored as a small integer; `TryFrom<u8>` rejects anything outside the
/// five defined tiers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum AccountType {
    #[default]
    Normal = 1,
    Tutor = 2,
    SeniorTutor = 3,
    GameMaster = 4,
    God = 5,
}

impl AccountType {
    /// Storage representation of the tier
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AccountType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Normal),
            2 => Ok(Self::Tutor),
            3 => Ok(Self::SeniorTutor),
            4 => Ok(Self::GameMaster),
            5 => Ok(Self::God),
            _ => Err(Error::InvalidAccountType),
        }
    }
}

/// Group tier used by the permission subsystem
///
/// Related to [`AccountType`] but kept separate: account tier and group tier
/// are independently assignable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum GroupType {
    #[default]
    Normal = 1,
    Tutor = 2,
    SeniorTutor = 3,
    GameMaster = 4,
    CommunityManager = 5,
    God = 6,
}

impl GroupType {
    /// Storage representation of the tier
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for GroupType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Normal),
            2 => Ok(Self::Tutor),
            3 => Ok(Self::SeniorTutor),
            4 => Ok(Self::GameMaster),
            5 => Ok(Self::CommunityManager),
            6 => Ok(Self::God),
            _ => Err(Error::InvalidAccountType),
        }
    }
}

/// A character owned by an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Unix timestamp of the scheduled deletion, 0 when not marked
    pub deletion: i64,
}

impl Player {
    pub fn new(name: impl Into<String>, deletion: i64) -> Self {
        Self {
            name: name.into(),
            deletion,
        }
    }

    pub fn marked_for_deletion(&self) -> bool {
        self.deletion != 0
    }
}

/// In-memory representation of one account's scalar fields
///
/// `id` is set at most once per instance: either supplied at construction or
/// filled by the first successful load. The coin balance is deliberately not
/// held here - it is authoritative in storage and read through the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: Option<u32>,
    pub email: String,
    /// Opaque credential material; this core stores it, never hashes or
    /// verifies it
    pub password: String,
    pub premium_remaining_days: u32,
    /// Unix timestamp of the subscription's last active day, 0 when none
    pub premium_last_day: i64,
    pub account_type: AccountType,
}

impl AccountRecord {
    pub fn validate_email(email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(Error::InvalidEmail);
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(Error::InvalidPassword);
        }
        Ok(())
    }

    /// Cross-validate the premium pair.
    ///
    /// A `last_day` of 0 is the "no premium" sentinel and always accepted.
    /// Otherwise the last day must not precede `now` minus the remaining-days
    /// window, and must not be negative.
    pub fn validate_premium_window(remaining_days: u32, last_day: i64, now: i64) -> Result<()> {
        if last_day == 0 {
            return Ok(());
        }
        if last_day < 0 {
            return Err(Error::InvalidLastDay);
        }
        let window_start = now - i64::from(remaining_days) * 86_400;
        if last_day < window_start {
            return Err(Error::InvalidLastDay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_from_storage() {
        assert_eq!(AccountType::try_from(1), Ok(AccountType::Normal));
        assert_eq!(AccountType::try_from(5), Ok(AccountType::God));
        assert_eq!(AccountType::try_from(0), Err(Error::InvalidAccountType));
        assert_eq!(AccountType::try_from(6), Err(Error::InvalidAccountType));
    }

    #[test]
    fn test_group_type_is_independent_of_account_type() {
        // The two tiers diverge at 5: community manager exists only as a group
        assert_eq!(GroupType::try_from(5), Ok(GroupType::CommunityManager));
        assert_eq!(GroupType::try_from(6), Ok(GroupType::God));
        assert_eq!(GroupType::try_from(7), Err(Error::InvalidAccountType));
        assert_eq!(AccountType::God.as_u8(), 5);
        assert_eq!(GroupType::God.as_u8(), 6);
    }

    #[test]
    fn test_player_deletion_sentinel() {
        assert!(!Player::new("Hero", 0).marked_for_deletion());
        assert!(Player::new("Alt", 1_699_999_999).marked_for_deletion());
    }

    #[test]
    fn test_email_and_password_validation() {
        assert!(AccountRecord::validate_email("user@example.com").is_ok());
        assert_eq!(
            AccountRecord::validate_email("   "),
            Err(Error::InvalidEmail)
        );
        assert!(AccountRecord::validate_password("secret").is_ok());
        assert_eq!(
            AccountRecord::validate_password(""),
            Err(Error::InvalidPassword)
        );
    }

    #[test]
    fn test_premium_window_validation() {
        let now = 1_700_000_000;
        // Sentinel always passes
        assert!(AccountRecord::validate_premium_window(0, 0, now).is_ok());
        // Last day inside the remaining-days window
        assert!(AccountRecord::validate_premium_window(10, now - 5 * 86_400, now).is_ok());
        // Last day before the window start
        assert_eq!(
            AccountRecord::validate_premium_window(3, now - 10 * 86_400, now),
            Err(Error::InvalidLastDay)
        );
        assert_eq!(
            AccountRecord::validate_premium_window(0, -1, now),
            Err(Error::InvalidLastDay)
        );
    }
}
