//! End-to-end tests driving the payoff binary against a temp data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn payoff(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("payoff").unwrap();
    cmd.env("PAYOFF_CLI_DATA_DIR", dir.path());
    cmd
}

#[test]
fn init_creates_starter_budgets() {
    let dir = TempDir::new().unwrap();

    payoff(&dir)
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"))
        .stdout(predicate::str::contains("Groceries"));

    payoff(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emergency Fund"));
}

#[test]
fn plan_show_without_plan_is_a_message_not_an_error() {
    let dir = TempDir::new().unwrap();
    payoff(&dir).args(["init"]).assert().success();

    payoff(&dir)
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active plan"));
}

#[test]
fn generate_plan_without_debts_fails_with_validation() {
    let dir = TempDir::new().unwrap();
    payoff(&dir).args(["init"]).assert().success();

    payoff(&dir)
        .args(["plan", "generate", "--strategy", "snowball"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No debts"));
}

#[test]
fn payment_flow_records_transfer_and_tracks_progress() {
    let dir = TempDir::new().unwrap();
    payoff(&dir).args(["init"]).assert().success();

    payoff(&dir)
        .args(["account", "add", "Main Checking", "-t", "checking", "-b", "5000.00"])
        .assert()
        .success();

    payoff(&dir)
        .args([
            "account", "add", "Visa", "-t", "credit", "-b", "1500.00", "-r", "0.199", "-m",
            "35.00",
        ])
        .assert()
        .success();

    payoff(&dir)
        .args(["budget", "add", "Visa Payment", "--card", "Visa"])
        .assert()
        .success();

    // A transaction that classifies as a credit-card payment is routed
    // through the transfer engine
    payoff(&dir)
        .args([
            "txn",
            "add",
            "Main Checking",
            "-250.00",
            "-D",
            "Payment to: Visa",
            "--budget",
            "Groceries",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded credit card payment"));

    payoff(&dir)
        .args(["transfers", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Credit card payment automation"));

    payoff(&dir)
        .args(["plan", "generate", "--strategy", "snowball", "--extra", "100.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snowball Payoff Plan"))
        .stdout(predicate::str::contains("Pay off Visa"));

    // The recorded payment legs show up as detected progress
    payoff(&dir)
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snowball Payoff Plan (Active)"))
        .stdout(predicate::str::contains("Recent payments"));
}

#[test]
fn plan_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    payoff(&dir).args(["init"]).assert().success();

    payoff(&dir)
        .args([
            "account", "add", "Visa", "-t", "credit", "-b", "500.00", "-m", "25.00",
        ])
        .assert()
        .success();

    payoff(&dir)
        .args(["plan", "generate", "--strategy", "avalanche"])
        .assert()
        .success();

    payoff(&dir)
        .args(["plan", "delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));

    payoff(&dir)
        .args(["plan", "delete", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    payoff(&dir)
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active plan"));
}

#[test]
fn pay_without_card_account_is_a_specific_error() {
    let dir = TempDir::new().unwrap();
    payoff(&dir).args(["init"]).assert().success();

    payoff(&dir)
        .args(["account", "add", "Main Checking", "-t", "checking"])
        .assert()
        .success();

    payoff(&dir)
        .args([
            "pay",
            "250.00",
            "--from",
            "Main Checking",
            "--budget",
            "Groceries",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No credit card account"));
}
