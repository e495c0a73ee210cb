// 🎬 Scripted walkthrough: log in, deposit 200, withdraw 100

use crate::atm::Atm;
use anyhow::Result;
use std::io::Write;

pub const DEMO_ACCOUNT: &str = "123456";
pub const DEMO_PIN: &str = "1234";

/// Run the fixed demo against `atm`, printing each step to `out`
pub fn run_demo<W: Write>(atm: &mut Atm, out: &mut W) -> Result<()> {
    let Some(handle) = atm.verify_pin(DEMO_ACCOUNT, DEMO_PIN) else {
        writeln!(out, "Invalid PIN")?;
        return Ok(());
    };

    let balance = |atm: &Atm| atm.check_balance(&handle).unwrap_or_default();

    writeln!(out, "Balance: {}", balance(&*atm))?;

    writeln!(out, "{}", atm.select_transaction(&handle, "deposit", 200.0))?;
    writeln!(out, "Balance after deposit: {}", balance(&*atm))?;

    writeln!(out, "{}", atm.select_transaction(&handle, "withdraw", 100.0))?;
    writeln!(out, "Balance after withdrawal: {}", balance(&*atm))?;

    Ok(())
}
