// 💸 Transaction - one-shot balance mutation against a borrowed Account
//
// A transaction is built for a single request, executed once (execute takes
// `self`), and dropped. Nothing is recorded afterwards.

use crate::account::Account;
use std::fmt;

// ============================================================================
// TRANSACTION KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Adds money to the account
    Deposit,

    /// Takes money out of the account
    Withdrawal,
}

impl TransactionKind {
    /// Parse the kind names accepted by the ATM ("deposit", "withdraw")
    ///
    /// Matching is exact; anything else is not a transaction kind.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "deposit" => Some(TransactionKind::Deposit),
            "withdraw" => Some(TransactionKind::Withdrawal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdraw",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// A pending deposit or withdrawal
///
/// The account is borrowed for the transaction's lifetime, so nothing else
/// can touch it between construction and `execute`.
#[derive(Debug)]
pub struct Transaction<'a> {
    kind: TransactionKind,
    account: &'a mut Account,
    amount: f64,
}

impl<'a> Transaction<'a> {
    pub fn new(kind: TransactionKind, account: &'a mut Account, amount: f64) -> Self {
        Transaction {
            kind,
            account,
            amount,
        }
    }

    pub fn deposit(account: &'a mut Account, amount: f64) -> Self {
        Self::new(TransactionKind::Deposit, account, amount)
    }

    pub fn withdrawal(account: &'a mut Account, amount: f64) -> Self {
        Self::new(TransactionKind::Withdrawal, account, amount)
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Apply the mutation and report whether the account accepted it
    ///
    /// On `false` the account is unchanged; there is no rollback step.
    pub fn execute(self) -> bool {
        match self.kind {
            TransactionKind::Deposit => self.account.deposit(self.amount),
            TransactionKind::Withdrawal => self.account.withdraw(self.amount),
        }
    }
}

// ============================================================================
// TRANSACTION RESULT
// ============================================================================

/// What the ATM reports back for a transaction request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionResult {
    Successful,
    Failed,
    InvalidType,
}

impl TransactionResult {
    pub fn message(&self) -> &'static str {
        match self {
            TransactionResult::Successful => "Transaction successful",
            TransactionResult::Failed => "Transaction failed",
            TransactionResult::InvalidType => "Invalid transaction type",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransactionResult::Successful)
    }
}

impl From<bool> for TransactionResult {
    fn from(success: bool) -> Self {
        if success {
            TransactionResult::Successful
        } else {
            TransactionResult::Failed
        }
    }
}

impl fmt::Display for TransactionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// TESTS
// ============================================================================
