// 💳 Account - identifier, PIN and a mutable balance
//
// The identifier and PIN are fixed at creation. Only the balance changes,
// and only through deposit/withdraw, each of which is a single mutation that
// either happens completely or not at all.

// ============================================================================
// ACCOUNT
// ============================================================================

/// A bank account held by the ATM registry
///
/// `Debug` masks the PIN.
#[derive(Clone)]
pub struct Account {
    /// Account number (registry key, never changes)
    account_number: String,

    /// Plaintext PIN, compared by exact equality
    pin: String,

    /// Current balance
    balance: f64,
}

impl Account {
    /// Create a new account with an opening balance
    pub fn new(account_number: impl Into<String>, pin: impl Into<String>, balance: f64) -> Self {
        Account {
            account_number: account_number.into(),
            pin: pin.into(),
            balance,
        }
    }

    /// Account number this account is registered under
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Current balance (no side effect)
    pub fn check_balance(&self) -> f64 {
        self.balance
    }

    /// Add `amount` to the balance
    ///
    /// Returns `false` and leaves the balance alone unless `amount > 0`.
    pub fn deposit(&mut self, amount: f64) -> bool {
        if amount > 0.0 {
            self.balance += amount;
            return true;
        }
        false
    }

    /// Take `amount` out of the balance
    ///
    /// Returns `false` and leaves the balance alone unless
    /// `0 < amount <= balance`.
    pub fn withdraw(&mut self, amount: f64) -> bool {
        if amount > 0.0 && amount <= self.balance {
            self.balance -= amount;
            return true;
        }
        false
    }

    /// Exact, case-sensitive PIN comparison
    pub fn verify_pin(&self, candidate: &str) -> bool {
        self.pin == candidate
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("account_number", &self.account_number)
            .field("pin", &"****")
            .field("balance", &self.balance)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
