// 🏧 ATM - account registry, authentication and transaction dispatch
//
// The ATM owns every Account it knows about. Authentication hands back an
// AccountHandle (the account number) instead of a reference, so callers can
// keep a handle across later registry changes without borrowing the ATM.

use crate::account::Account;
use crate::transaction::{Transaction, TransactionKind, TransactionResult};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// ACCOUNT HANDLE
// ============================================================================

/// Proof of a successful `verify_pin`, keyed by account number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountHandle(String);

impl AccountHandle {
    pub fn account_number(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ATM
// ============================================================================

#[derive(Debug, Default)]
pub struct Atm {
    /// Registry: account number → account
    accounts: HashMap<String, Account>,
}

impl Atm {
    /// Create an ATM with an empty registry
    pub fn new() -> Self {
        Atm {
            accounts: HashMap::new(),
        }
    }

    /// Register an account under its account number
    ///
    /// A later registration with the same number replaces the earlier one.
    pub fn add_account(&mut self, account: Account) {
        let account_number = account.account_number().to_string();

        if self.accounts.insert(account_number.clone(), account).is_some() {
            tracing::warn!(account = %account_number, "replaced existing account registration");
        } else {
            tracing::debug!(account = %account_number, "registered account");
        }
    }

    /// Authenticate an account number / PIN pair
    ///
    /// Returns `None` for an unknown account number or a wrong PIN; the two
    /// cases are indistinguishable to the caller.
    pub fn verify_pin(&self, account_number: &str, pin: &str) -> Option<AccountHandle> {
        match self.accounts.get(account_number) {
            Some(account) if account.verify_pin(pin) => {
                tracing::info!(account = %account_number, "authentication succeeded");
                Some(AccountHandle(account_number.to_string()))
            }
            _ => {
                tracing::warn!(account = %account_number, "authentication failed");
                None
            }
        }
    }

    /// Build and run one transaction of the named kind ("deposit"/"withdraw")
    pub fn select_transaction(
        &mut self,
        handle: &AccountHandle,
        kind: &str,
        amount: f64,
    ) -> TransactionResult {
        let kind = match TransactionKind::parse(kind) {
            Some(kind) => kind,
            None => {
                tracing::warn!(account = %handle, kind, "rejected unknown transaction type");
                return TransactionResult::InvalidType;
            }
        };

        self.execute(handle, kind, amount)
    }

    /// Run one transaction of an already-parsed kind
    pub fn execute(
        &mut self,
        handle: &AccountHandle,
        kind: TransactionKind,
        amount: f64,
    ) -> TransactionResult {
        let transaction_id = uuid::Uuid::new_v4();

        let Some(account) = self.accounts.get_mut(handle.account_number()) else {
            tracing::warn!(%transaction_id, account = %handle, %kind, amount, "no such account");
            return TransactionResult::Failed;
        };

        let transaction = Transaction::new(kind, account, amount);
        let (kind, amount) = (transaction.kind(), transaction.amount());
        let result = TransactionResult::from(transaction.execute());

        tracing::info!(
            %transaction_id,
            account = %handle,
            %kind,
            amount,
            success = result.is_success(),
            "executed transaction"
        );

        result
    }

    /// Balance of the account behind `handle`
    ///
    /// `None` only if the handle names an account that is not registered.
    pub fn check_balance(&self, handle: &AccountHandle) -> Option<f64> {
        self.accounts
            .get(handle.account_number())
            .map(Account::check_balance)
    }

    /// Look up a registered account by number
    pub fn find_account(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    /// Number of registered accounts
    pub fn count(&self) -> usize {
        self.accounts.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
