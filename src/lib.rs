// ATM Simulator - Core Library
// Exposes the account model, the ATM and the console session for the CLI and tests

pub mod account;
pub mod transaction;
pub mod atm;
pub mod config;     // Seed accounts (defaults, JSON, CSV)
pub mod session;    // Line-oriented console front end
pub mod demo;

// Re-export commonly used types
pub use account::Account;
pub use transaction::{Transaction, TransactionKind, TransactionResult};
pub use atm::{AccountHandle, Atm};
pub use config::{AccountSeed, AtmConfig, SeedFormat};
pub use session::{MenuChoice, Session, SessionEnd, TokenReader};
pub use demo::run_demo;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
