// ⚙️ Configuration - seed accounts the ATM starts with
//
// Seeds come from the built-in defaults or from a JSON/CSV file. Loading is
// all-or-nothing: one bad record fails the whole file.

use crate::account::Account;
use crate::atm::Atm;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// ACCOUNT SEED
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSeed {
    pub account_number: String,
    pub pin: String,
    pub balance: f64,
}

impl AccountSeed {
    pub fn new(account_number: &str, pin: &str, balance: f64) -> Self {
        AccountSeed {
            account_number: account_number.to_string(),
            pin: pin.to_string(),
            balance,
        }
    }

    /// Reject seeds that could never be used at the console
    pub fn validate(&self) -> Result<()> {
        if self.account_number.trim().is_empty() {
            bail!("Account seed has an empty account number");
        }
        if self.pin.is_empty() {
            bail!("Account {} has an empty PIN", self.account_number);
        }
        if self.account_number.contains(char::is_whitespace) || self.pin.contains(char::is_whitespace) {
            bail!(
                "Account {} contains whitespace in its number or PIN",
                self.account_number
            );
        }
        if !self.balance.is_finite() {
            bail!("Account {} has a non-finite balance", self.account_number);
        }
        Ok(())
    }

    pub fn into_account(self) -> Account {
        Account::new(self.account_number, self.pin, self.balance)
    }
}

// ============================================================================
// SEED FILE FORMATS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Csv,
}

/// Pick the seed format from the file extension
pub fn detect_format(path: &Path) -> Option<SeedFormat> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "json" => Some(SeedFormat::Json),
        "csv" => Some(SeedFormat::Csv),
        _ => None,
    }
}

/// JSON seed files may be a bare array or wrapped in `{ "accounts": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSeeds {
    List(Vec<AccountSeed>),
    Wrapped { accounts: Vec<AccountSeed> },
}

fn parse_json(content: &str) -> Result<Vec<AccountSeed>> {
    let seeds: JsonSeeds = serde_json::from_str(content).context("Failed to parse accounts JSON")?;

    Ok(match seeds {
        JsonSeeds::List(accounts) | JsonSeeds::Wrapped { accounts } => accounts,
    })
}

fn parse_csv(content: &str) -> Result<Vec<AccountSeed>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut seeds = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        // +2: header row, and rows are 1-based
        let seed: AccountSeed =
            result.with_context(|| format!("Failed to deserialize account on line {}", index + 2))?;
        seeds.push(seed);
    }

    Ok(seeds)
}

// ============================================================================
// ATM CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmConfig {
    pub accounts: Vec<AccountSeed>,
}

impl Default for AtmConfig {
    /// The two demo accounts every ATM session starts with
    fn default() -> Self {
        AtmConfig {
            accounts: vec![
                AccountSeed::new("123456", "1234", 1000.0),
                AccountSeed::new("654321", "4321", 500.0),
            ],
        }
    }
}

impl AtmConfig {
    /// Load seed accounts from a `.json` or `.csv` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = detect_format(path)
            .with_context(|| format!("Unsupported accounts file (expected .json or .csv): {:?}", path))?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read accounts file: {:?}", path))?;

        let accounts = match format {
            SeedFormat::Json => parse_json(&content)?,
            SeedFormat::Csv => parse_csv(&content)?,
        };

        let config = AtmConfig { accounts };
        config
            .validate()
            .with_context(|| format!("Invalid accounts file: {:?}", path))?;

        tracing::info!(path = ?path, accounts = config.accounts.len(), "loaded account seeds");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.accounts.is_empty() {
            bail!("No accounts configured");
        }
        for seed in &self.accounts {
            seed.validate()?;
        }
        Ok(())
    }

    /// Build an ATM with every seed registered in order (last duplicate wins)
    pub fn into_atm(self) -> Atm {
        let mut atm = Atm::new();
        for seed in self.accounts {
            atm.add_account(seed.into_account());
        }
        atm
    }
}

// ============================================================================
// TESTS
// ============================================================================
