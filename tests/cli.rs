use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn add(dir: &TempDir, kind: &str, category: &str, amount: &str, description: &str, date: &str) {
    ledger(dir)
        .args([
            "add",
            "--kind",
            kind,
            "--category",
            category,
            "--amount",
            amount,
            "--description",
            description,
            "--date",
            date,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaction added successfully!"));
}

#[test]
fn add_writes_legacy_line_format() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "Food", "42.5", "Grocery run", "2024-03-15");

    let contents = fs::read_to_string(dir.path().join("transactions.txt")).unwrap();
    assert_eq!(contents.trim_end(), "2024-03-15,Expense,Food,42.50,Grocery run");
}

#[test]
fn summary_totals_one_month() {
    let dir = TempDir::new().unwrap();
    add(&dir, "income", "Salary", "1000", "January pay", "2024-01-10");
    add(&dir, "expense", "Food", "50", "Groceries", "2024-01-15");
    add(&dir, "expense", "Food", "25", "Snacks", "2024-02-01");

    ledger(&dir)
        .args(["summary", "--year", "2024", "--month", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Summary for 1/2024"))
        .stdout(predicate::str::contains("  Salary: $1000.00"))
        .stdout(predicate::str::contains("  Food: $50.00"))
        .stdout(predicate::str::contains("Net Balance: $950.00"));

    ledger(&dir)
        .args(["summary", "--year", "2024", "--month", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Income: $0.00"))
        .stdout(predicate::str::contains("  Food: $25.00"));
}

#[test]
fn summary_without_data_file_is_all_zero() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["summary", "-y", "2025", "-m", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses: $0.00"))
        .stdout(predicate::str::contains("Net Balance: $0.00"));

    assert!(!dir.path().join("transactions.txt").exists());
}

#[test]
fn summary_rejects_month_out_of_range() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["summary", "--year", "2024", "--month", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month must be between 1 and 12"));
}

#[test]
fn summary_exports_csv() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "Rent", "800", "March rent", "2024-03-01");

    ledger(&dir)
        .args(["summary", "-y", "2024", "-m", "3", "--output", "march.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to: march.csv"));

    let csv = fs::read_to_string(dir.path().join("march.csv")).unwrap();
    assert!(csv.contains("2024,3,Expense,Rent,800.00,1"));
}

#[test]
fn corrupt_line_fails_with_line_number() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("transactions.txt"),
        "2024-03-01,Expense,Food,10.00,ok\n2024-03-02,Expense,Food\n",
    )
    .unwrap();

    ledger(&dir)
        .args(["summary", "-y", "2024", "-m", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt data at line 2"))
        .stderr(predicate::str::contains("2024-03-02,Expense,Food"));
}

#[test]
fn skip_and_warn_policy_from_settings() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ledger.json"), r#"{"load_policy": "skip-and-warn"}"#).unwrap();
    fs::write(
        dir.path().join("transactions.txt"),
        "2024-03-01,Expense,Food,10.00,ok\nnot a record\n",
    )
    .unwrap();

    ledger(&dir)
        .args(["summary", "-y", "2024", "-m", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  Food: $10.00"))
        .stderr(predicate::str::contains("skipped 1 unreadable record(s)"));
}

#[test]
fn description_with_comma_round_trips() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "Food", "12", "milk, eggs", "2024-04-02");
    add(&dir, "expense", "Food", "3", "bread", "2024-04-03");

    ledger(&dir)
        .args(["summary", "-y", "2024", "-m", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  Food: $15.00"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["add", "--kind", "income", "--category", "Food", "--amount", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'Food' is not a valid Income category"));

    assert!(!dir.path().join("transactions.txt").exists());
}

#[test]
fn bad_date_falls_back_with_warning() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["add", "-k", "expense", "-c", "Travel", "-a", "9.99", "-d", "tomorrow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid date format 'tomorrow'"));

    let contents = fs::read_to_string(dir.path().join("transactions.txt")).unwrap();
    assert!(contents.contains(",Expense,Travel,9.99,"));
}

#[test]
fn file_flag_overrides_default_location() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args([
            "--file",
            "books/2024.txt",
            "add",
            "-k",
            "income",
            "-c",
            "Business",
            "-a",
            "300",
            "-d",
            "2024-06-01",
        ])
        .assert()
        .success();

    assert!(dir.path().join("books").join("2024.txt").exists());
    assert!(!dir.path().join("transactions.txt").exists());
}

#[test]
fn interactive_menu_adds_and_summarizes() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .write_stdin("1\n1\n2\n250\nSide project\n2024-07-04\n2\n2024\n7\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Tracker Menu:"))
        .stdout(predicate::str::contains("Transaction added successfully!"))
        .stdout(predicate::str::contains("  Business: $250.00"))
        .stdout(predicate::str::contains("Exiting..."));

    let contents = fs::read_to_string(dir.path().join("transactions.txt")).unwrap();
    assert_eq!(contents.trim_end(), "2024-07-04,Income,Business,250.00,Side project");
}

#[test]
fn init_and_custom_categories() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to: ledger.json"));
    assert!(dir.path().join("ledger.json").exists());

    fs::write(
        dir.path().join("ledger.json"),
        r#"{"categories": {"expense": ["Food", "Pets"]}}"#,
    )
    .unwrap();

    ledger(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("  2. Pets"))
        .stdout(predicate::str::contains("  1. Salary"));
}

#[test]
fn open_quote_in_legacy_file_is_reported_not_merged() {
    let dir = TempDir::new().unwrap();
    let original = concat!(
        "2024-03-01,Expense,Food,10.00,\"12 inch sub\n",
        "2024-03-02,Expense,Rent,500.00,March rent\n",
    );
    fs::write(dir.path().join("transactions.txt"), original).unwrap();

    ledger(&dir)
        .args(["add", "-k", "income", "-c", "Salary", "-a", "900", "-d", "2024-03-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt data at line 1"))
        .stderr(predicate::str::contains("unterminated quote"));

    let contents = fs::read_to_string(dir.path().join("transactions.txt")).unwrap();
    assert_eq!(contents, original);
}
