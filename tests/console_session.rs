//! End-to-end console sessions over in-memory input and output.

use atm_sim::session::{MSG_FAREWELL, MSG_INVALID_AMOUNT, MSG_INVALID_LOGIN, MSG_INVALID_OPTION};
use atm_sim::{Account, Atm, AtmConfig, Session, SessionEnd};
use rstest::rstest;
use std::io::Cursor;

fn run(atm: &mut Atm, script: &str) -> (SessionEnd, String) {
    run_bytes(atm, script.as_bytes().to_vec())
}

fn run_bytes(atm: &mut Atm, script: Vec<u8>) -> (SessionEnd, String) {
    let mut session = Session::new(atm, Cursor::new(script), Vec::new());
    let end = session.run().unwrap();
    (end, String::from_utf8(session.into_output()).unwrap())
}

fn balance_of(atm: &Atm, account_number: &str) -> f64 {
    atm.find_account(account_number).unwrap().check_balance()
}

#[test]
fn test_full_session_deposit_then_withdraw() {
    let mut atm = AtmConfig::default().into_atm();

    let (end, output) = run(&mut atm, "123456\n1234\n1\n2\n200\n1\n3\n100\n1\n4\n");

    assert_eq!(end, SessionEnd::Exited);
    assert!(output.contains("Your balance is: 1000\n"));
    assert!(output.contains("Your balance is: 1200\n"));
    assert!(output.contains("Your balance is: 1100\n"));
    assert_eq!(output.matches("Transaction successful").count(), 2);
    assert!(output.ends_with(&format!("{}\n", MSG_FAREWELL)));

    assert_eq!(balance_of(&atm, "123456"), 1100.0);
    assert_eq!(balance_of(&atm, "654321"), 500.0);
}

#[rstest]
#[case("3\n600\n", "Transaction failed", 500.0)]
#[case("3\n500\n", "Transaction successful", 0.0)]
#[case("2\n0\n", "Transaction failed", 500.0)]
#[case("2\n-40\n", "Transaction failed", 500.0)]
#[case("2\n0.5\n", "Transaction successful", 500.5)]
fn test_transaction_outcomes(
    #[case] steps: &str,
    #[case] message: &str,
    #[case] expected_balance: f64,
) {
    let mut atm = AtmConfig::default().into_atm();
    let script = format!("654321 4321\n{}4\n", steps);

    let (_, output) = run(&mut atm, &script);

    assert!(output.contains(message));
    assert_eq!(balance_of(&atm, "654321"), expected_balance);
}

#[rstest]
#[case("9")]
#[case("0")]
#[case("balance")]
#[case("2.0")]
fn test_invalid_menu_option_continues(#[case] choice: &str) {
    let mut atm = AtmConfig::default().into_atm();
    let script = format!("123456 1234\n{}\n1\n4\n", choice);

    let (end, output) = run(&mut atm, &script);

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches(MSG_INVALID_OPTION).count(), 1);
    assert!(output.contains("Your balance is: 1000\n"));
}

#[test]
fn test_login_retries_until_success() {
    let mut atm = AtmConfig::default().into_atm();

    let (end, output) = run(&mut atm, "123456\n4321\n000000\n0000\n123456\n1234\n4\n");

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches(MSG_INVALID_LOGIN).count(), 2);
    assert_eq!(output.matches("ATM Menu:").count(), 1);
}

#[test]
fn test_exit_does_not_return_to_login() {
    let mut atm = AtmConfig::default().into_atm();

    // Trailing credentials after Exit must be ignored
    let (end, output) = run(&mut atm, "123456 1234\n4\n654321 4321\n");

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches("Enter account number: ").count(), 1);
}

#[test]
fn test_malformed_amounts_are_never_treated_as_zero() {
    let mut atm = AtmConfig::default().into_atm();

    let (_, output) = run(&mut atm, "123456 1234\n3\nten\ninf\n\n250\n4\n");

    assert_eq!(output.matches(MSG_INVALID_AMOUNT).count(), 2);
    assert_eq!(output.matches("Enter amount to withdraw: ").count(), 3);
    assert!(output.contains("Transaction successful"));
    assert_eq!(balance_of(&atm, "123456"), 750.0);
}

#[test]
fn test_end_of_input_inside_menu() {
    let mut atm = AtmConfig::default().into_atm();

    let (end, output) = run(&mut atm, "123456 1234\n2\n");

    assert_eq!(end, SessionEnd::EndOfInput);
    assert!(output.ends_with(&format!("Enter amount to deposit: \n{}\n", MSG_FAREWELL)));
    assert_eq!(balance_of(&atm, "123456"), 1000.0);
}

#[test]
fn test_empty_input() {
    let mut atm = AtmConfig::default().into_atm();

    let (end, output) = run(&mut atm, "");

    assert_eq!(end, SessionEnd::EndOfInput);
    assert_eq!(output, format!("Enter account number: \n{}\n", MSG_FAREWELL));
}

#[test]
fn test_session_uses_replaced_registration() {
    let mut atm = AtmConfig::default().into_atm();
    atm.add_account(Account::new("123456", "2468", 10.0));

    let (_, output) = run(&mut atm, "123456 1234\n123456 2468\n1\n4\n");

    assert_eq!(output.matches(MSG_INVALID_LOGIN).count(), 1);
    assert!(output.contains("Your balance is: 10\n"));
}

#[test]
fn test_invalid_utf8_amount_reprompts() {
    let mut atm = AtmConfig::default().into_atm();
    let mut script = b"123456 1234\n2\n".to_vec();
    script.extend_from_slice(&[0xff, 0xfe, b'\n']);
    script.extend_from_slice(b"200\n4\n");

    let (end, output) = run_bytes(&mut atm, script);

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches(MSG_INVALID_AMOUNT).count(), 1);
    assert!(output.contains("Transaction successful"));
    assert_eq!(balance_of(&atm, "123456"), 1200.0);
}

#[test]
fn test_invalid_utf8_menu_choice_reprompts() {
    let mut atm = AtmConfig::default().into_atm();
    let mut script = b"123456 1234\n".to_vec();
    script.extend_from_slice(&[b'1', 0xc3, b'\n']);
    script.extend_from_slice(b"1\n4\n");

    let (end, output) = run_bytes(&mut atm, script);

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches(MSG_INVALID_OPTION).count(), 1);
    assert!(output.contains("Your balance is: 1000\n"));
}

#[test]
fn test_invalid_utf8_credentials_fail_login() {
    let mut atm = AtmConfig::default().into_atm();
    let mut script = b"123456 ".to_vec();
    script.extend_from_slice(&[0x80, 0x81, b'\n']);
    script.extend_from_slice(b"123456 1234\n4\n");

    let (end, output) = run_bytes(&mut atm, script);

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches(MSG_INVALID_LOGIN).count(), 1);
}
