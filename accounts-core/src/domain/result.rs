//! Result and error types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// A closed set of result codes. Every fallible operation in this crate
/// returns one of these; no other error type crosses the public boundary.
/// Collaborator failures of any kind (connection, query, constraint) are
/// collapsed into `Database` - the distinction is the gateway's concern.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Error {
    #[error("database failure")]
    Database,

    #[error("invalid email")]
    InvalidEmail,

    #[error("invalid password")]
    InvalidPassword,

    #[error("invalid account type")]
    InvalidAccountType,

    #[error("invalid account id")]
    InvalidId,

    #[error("invalid premium last day")]
    InvalidLastDay,

    #[error("account players not loaded")]
    PlayersLoad,

    #[error("service not initialized")]
    NotInitialized,

    #[error("null collaborator reference")]
    NullReference,

    #[error("not enough coins")]
    InsufficientCoins,

    #[error("coin balance overflow")]
    CoinOverflow,

    #[error("player not found")]
    PlayerNotFound,
}

impl Error {
    /// Stable numeric code for callers that speak the uniform error-code
    /// channel (FFI, wire). Zero is reserved for success.
    pub fn code(&self) -> u8 {
        match self {
            Error::Database => 1,
            Error::InvalidEmail => 2,
            Error::InvalidPassword => 3,
            Error::InvalidAccountType => 4,
            Error::InvalidId => 5,
            Error::InvalidLastDay => 6,
            Error::PlayersLoad => 7,
            Error::NotInitialized => 8,
            Error::NullReference => 9,
            Error::InsufficientCoins => 10,
            Error::CoinOverflow => 11,
            Error::PlayerNotFound => 12,
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result carrying the numeric code (for FFI serialization)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    /// 0 on success, otherwise the error's stable code
    pub code: u8,
    pub error: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            code: 0,
            error: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: Error) -> Self {
        Self {
            success: false,
            data: None,
            code: error.code(),
            error: Some(error.to_string()),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable_and_distinct() {
        let all = [
            Error::Database,
            Error::InvalidEmail,
            Error::InvalidPassword,
            Error::InvalidAccountType,
            Error::InvalidId,
            Error::InvalidLastDay,
            Error::PlayersLoad,
            Error::NotInitialized,
            Error::NullReference,
            Error::InsufficientCoins,
            Error::CoinOverflow,
            Error::PlayerNotFound,
        ];
        let codes: Vec<u8> = all.iter().map(|e| e.code()).collect();
        assert_eq!(codes, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<u32> = OperationResult::ok(42);
        assert!(result.success);
        assert_eq!(result.data, Some(42));
        assert_eq!(result.code, 0);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_from_result() {
        let err: Result<u32> = Err(Error::InsufficientCoins);
        let result: OperationResult<u32> = err.into();
        assert!(!result.success);
        assert_eq!(result.code, Error::InsufficientCoins.code());
        assert_eq!(result.error.as_deref(), Some("not enough coins"));
    }
}
