// 🖥️ Console session - the line-oriented ATM front end
//
// Unauthenticated → (account number + PIN) → Authenticated menu loop → Finished.
// A failed login stays Unauthenticated and re-prompts. Choosing Exit ends the
// session for good; it never drops back to the login prompt.

use crate::atm::{AccountHandle, Atm};
use crate::transaction::TransactionKind;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

pub const MSG_INVALID_LOGIN: &str = "Invalid account number or PIN. Please try again.";
pub const MSG_INVALID_OPTION: &str = "Invalid option. Please try again.";
pub const MSG_INVALID_AMOUNT: &str = "Invalid amount. Please enter a number.";
pub const MSG_FAREWELL: &str = "Thank you for using the ATM. Goodbye!";

// ============================================================================
// TOKEN READER
// ============================================================================

/// Whitespace-delimited tokens pulled from a line reader
///
/// Several tokens on one line are handed out one at a time, so
/// "123456 1234" answers both login prompts.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        TokenReader {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let mut line = Vec::new();
            let read = self
                .reader
                .read_until(b'\n', &mut line)
                .context("Failed to read from console")?;
            if read == 0 {
                return Ok(None);
            }

            // Invalid UTF-8 becomes U+FFFD and fails whatever parse it reaches
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }
}

// ============================================================================
// MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CheckBalance,
    Deposit,
    Withdraw,
    Exit,
}

impl MenuChoice {
    /// Map a typed token to a menu entry (1-4)
    pub fn parse(token: &str) -> Option<Self> {
        match token.parse::<i64>().ok()? {
            1 => Some(MenuChoice::CheckBalance),
            2 => Some(MenuChoice::Deposit),
            3 => Some(MenuChoice::Withdraw),
            4 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Parse an amount token; only finite numbers count
pub fn parse_amount(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Unauthenticated,
    Authenticated(AccountHandle),
    Finished(SessionEnd),
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user picked Exit from the menu
    Exited,

    /// Input ran out before the user exited
    EndOfInput,
}

pub struct Session<'a, R, W> {
    atm: &'a mut Atm,
    input: TokenReader<R>,
    output: W,
    session_id: uuid::Uuid,
    started_at: DateTime<Utc>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(atm: &'a mut Atm, input: R, output: W) -> Self {
        Session {
            atm,
            input: TokenReader::new(input),
            output,
            session_id: uuid::Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Drive the session until the user exits or input runs out
    pub fn run(&mut self) -> Result<SessionEnd> {
        let span = tracing::info_span!("session", session_id = %self.session_id);
        let _guard = span.enter();

        tracing::info!(started_at = %self.started_at, "session started");

        let mut state = SessionState::Unauthenticated;
        let end = loop {
            state = match state {
                SessionState::Unauthenticated => self.login()?,
                SessionState::Authenticated(handle) => self.menu(handle)?,
                SessionState::Finished(end) => break end,
            };
        };

        if end == SessionEnd::EndOfInput {
            writeln!(self.output)?;
        }
        writeln!(self.output, "{}", MSG_FAREWELL)?;
        self.output.flush()?;

        let duration = Utc::now() - self.started_at;
        tracing::info!(?end, duration_ms = duration.num_milliseconds(), "session finished");

        Ok(end)
    }

    fn login(&mut self) -> Result<SessionState> {
        let Some(account_number) = self.prompt("Enter account number: ")? else {
            return Ok(SessionState::Finished(SessionEnd::EndOfInput));
        };
        let Some(pin) = self.prompt("Enter PIN: ")? else {
            return Ok(SessionState::Finished(SessionEnd::EndOfInput));
        };

        match self.atm.verify_pin(&account_number, &pin) {
            Some(handle) => Ok(SessionState::Authenticated(handle)),
            None => {
                writeln!(self.output, "{}", MSG_INVALID_LOGIN)?;
                Ok(SessionState::Unauthenticated)
            }
        }
    }

    fn menu(&mut self, handle: AccountHandle) -> Result<SessionState> {
        write!(
            self.output,
            "\nATM Menu:\n1. Check Balance\n2. Deposit\n3. Withdraw\n4. Exit\n"
        )?;

        let Some(token) = self.prompt("Enter your choice: ")? else {
            return Ok(SessionState::Finished(SessionEnd::EndOfInput));
        };

        match MenuChoice::parse(&token) {
            Some(MenuChoice::CheckBalance) => match self.atm.check_balance(&handle) {
                Some(balance) => writeln!(self.output, "Your balance is: {}", balance)?,
                None => writeln!(self.output, "Account {} not found", handle)?,
            },
            Some(MenuChoice::Deposit) => {
                if !self.transact(&handle, TransactionKind::Deposit)? {
                    return Ok(SessionState::Finished(SessionEnd::EndOfInput));
                }
            }
            Some(MenuChoice::Withdraw) => {
                if !self.transact(&handle, TransactionKind::Withdrawal)? {
                    return Ok(SessionState::Finished(SessionEnd::EndOfInput));
                }
            }
            Some(MenuChoice::Exit) => return Ok(SessionState::Finished(SessionEnd::Exited)),
            None => writeln!(self.output, "{}", MSG_INVALID_OPTION)?,
        }

        Ok(SessionState::Authenticated(handle))
    }

    /// Ask for an amount and run the transaction; `false` on end of input
    fn transact(&mut self, handle: &AccountHandle, kind: TransactionKind) -> Result<bool> {
        let prompt = match kind {
            TransactionKind::Deposit => "Enter amount to deposit: ",
            TransactionKind::Withdrawal => "Enter amount to withdraw: ",
        };

        let amount = loop {
            let Some(token) = self.prompt(prompt)? else {
                return Ok(false);
            };
            match parse_amount(&token) {
                Some(amount) => break amount,
                None => {
                    tracing::debug!(input = %token, "rejected malformed amount");
                    writeln!(self.output, "{}", MSG_INVALID_AMOUNT)?;
                }
            }
        };

        let result = self.atm.select_transaction(handle, kind.as_str(), amount);
        writeln!(self.output, "{}", result)?;

        Ok(true)
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush().context("Failed to write to console")?;
        self.input.next_token()
    }

    /// Consume the session and hand back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

// ============================================================================
// TESTS
// ============================================================================
