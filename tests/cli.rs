use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pocket(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pocket").unwrap();
    cmd.env("CLOUDPOCKET_DATA_DIR", dir.path());
    cmd.env_remove("POCKET_LOG");
    cmd
}

/// Runs `tx add` and returns the new transaction id
fn add(dir: &TempDir, args: &[&str]) -> String {
    let output = pocket(dir).arg("tx").arg("add").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "tx add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .find_map(|line| line.strip_prefix("Transaction: "))
        .map(|id| id.trim().to_string())
        .expect("no transaction id in output")
}

/// January 2024: 100,000 income and 30,000 expense, all on the 15th
fn seed_january(dir: &TempDir) {
    pocket(dir).arg("init").assert().success();
    add(dir, &["income", "100000", "-c", "Salary", "-p", "Bank Transfer", "-d", "2024-01-15 09:00"]);
    add(dir, &["expense", "21000", "-c", "Food", "-p", "Card", "-d", "2024-01-15 12:30"]);
    add(dir, &["expense", "9,000", "-c", "transport", "-p", "cash", "-d", "2024-01-15 18:00"]);
}

#[test]
fn test_init_seeds_defaults() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());

    pocket(&dir)
        .args(["category", "list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Food").not());

    pocket(&dir)
        .args(["payment", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mobile Pay"));
}

#[test]
fn test_first_command_initializes_automatically() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .args(["report", "totals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total income:  0원"));

    assert!(dir.path().join("data").join("categories.json").exists());
}

#[test]
fn test_monthly_summary() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    pocket(&dir)
        .args(["report", "month", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Income:       100,000원"))
        .stdout(predicate::str::contains("Expense:      30,000원"))
        .stdout(predicate::str::contains("Balance:      +70,000원"))
        .stdout(predicate::str::contains("Transactions: 3"));

    pocket(&dir)
        .args(["report", "month", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions: 0"));
}

#[test]
fn test_category_breakdown_by_type() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    pocket(&dir)
        .args(["report", "categories", "2024-01", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("70%"))
        .stdout(predicate::str::contains("30%"))
        .stdout(predicate::str::contains("Salary").not());
}

#[test]
fn test_breakdown_defaults_to_expense() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    pocket(&dir)
        .args(["report", "categories", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70%"))
        .stdout(predicate::str::contains("Salary").not());

    // 100,000 of 130,000
    pocket(&dir)
        .args(["report", "categories", "2024-01", "--mixed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("77%"));
}

#[test]
fn test_breakdown_csv_export() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);
    let csv_path = dir.path().join("methods.csv");

    pocket(&dir)
        .args(["report", "payments", "--from", "2024-01-01", "--to", "2024-01-31", "--type", "expense", "--csv"])
        .arg(&csv_path)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "ID,Name,Amount,Percentage,Transactions");
    assert!(lines[1].ends_with(",21000,70,1"));
    assert!(lines[2].ends_with(",9000,30,1"));
}

#[test]
fn test_show_edit_delete() {
    let dir = TempDir::new().unwrap();
    pocket(&dir).arg("init").assert().success();
    let id = add(&dir, &["expense", "10000", "-c", "Food", "-p", "Card", "-d", "2024-03-02", "-m", "lunch"]);

    pocket(&dir)
        .args(["tx", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("-10,000원"))
        .stdout(predicate::str::contains("Memo:        lunch"));

    pocket(&dir)
        .args(["tx", "edit", &id, "--amount", "15000", "--clear-memo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-15,000원"))
        .stdout(predicate::str::contains("Memo").not());

    pocket(&dir).args(["tx", "delete", &id]).assert().success();

    pocket(&dir)
        .args(["tx", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn test_invalid_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    pocket(&dir).arg("init").assert().success();

    pocket(&dir)
        .args(["tx", "add", "expense", "0", "-c", "Food", "-p", "Card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero"));

    pocket(&dir)
        .args(["tx", "add", "expense", "9223372036854775807", "-c", "Food", "-p", "Card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must not exceed 1,000,000,000,000원"));

    pocket(&dir)
        .args(["tx", "add", "expense", "500", "-c", "Groceries", "-p", "Card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found: Groceries"));

    pocket(&dir)
        .args(["tx", "add", "refund", "500", "-c", "Food", "-p", "Card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transaction type"));

    pocket(&dir)
        .args(["tx", "delete", "transaction-99-0"])
        .assert()
        .failure();

    pocket(&dir)
        .args(["report", "daily", "2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected a month"));
}

#[test]
fn test_list_filters_and_day_view() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);
    add(&dir, &["expense", "4000", "-c", "Food", "-p", "Card", "-d", "2024-02-01"]);

    pocket(&dir)
        .args(["tx", "list", "--period", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-01"))
        .stdout(predicate::str::contains("2024-01-15").not());

    pocket(&dir)
        .args(["tx", "list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+100,000원"))
        .stdout(predicate::str::contains("-21,000원").not());

    pocket(&dir)
        .args(["tx", "day", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: +70,000원"));
}

#[test]
fn test_calendar_and_daily() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    pocket(&dir)
        .args(["report", "calendar", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sun"))
        .stdout(predicate::str::contains("+70,000"));

    pocket(&dir)
        .args(["report", "daily", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-15"));
}

#[test]
fn test_deleted_category_shows_fallback_label() {
    let dir = TempDir::new().unwrap();
    pocket(&dir).arg("init").assert().success();
    pocket(&dir)
        .args(["category", "add", "Pets", "--type", "expense"])
        .assert()
        .success();
    add(&dir, &["expense", "8000", "-c", "Pets", "-p", "Card", "-d", "2024-05-05"]);

    pocket(&dir)
        .args(["category", "delete", "pets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transaction(s) still reference it"));

    pocket(&dir)
        .args(["tx", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uncategorized"));

    pocket(&dir).args(["payment", "add", "Gift Card"]).assert().success();
    let id = add(&dir, &["expense", "3000", "-c", "Food", "-p", "Gift Card", "-d", "2024-05-06"]);
    pocket(&dir).args(["payment", "delete", "gift card"]).assert().success();

    pocket(&dir)
        .args(["tx", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment:     Unassigned"))
        .stdout(predicate::str::contains("Uncategorized").not());
}

#[test]
fn test_exports_and_audit() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);
    let csv_path = dir.path().join("tx.csv");
    let json_path = dir.path().join("all.json");

    pocket(&dir)
        .args(["export", "transactions"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 transaction(s)"));
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("ID,Date,Type,Amount,Category,Payment Method,Memo\n"));

    pocket(&dir)
        .args(["export", "json"])
        .arg(&json_path)
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["metadata"]["transaction_count"], 3);

    pocket(&dir)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}

#[test]
fn test_config_set_changes_labels() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    pocket(&dir)
        .args(["config", "set", "currency", " KRW"])
        .assert()
        .success();

    pocket(&dir)
        .args(["report", "totals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100,000 KRW"));
}
