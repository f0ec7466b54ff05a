//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions.

mod account;
mod coins;

pub use account::AccountService;
pub use coins::CoinLedger;
