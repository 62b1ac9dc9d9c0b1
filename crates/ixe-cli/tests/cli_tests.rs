//! End-to-end tests for the ex-informix binary
//!
//! Each test writes a config.yml into a temp data directory, runs the
//! compiled binary against it and checks the exit code and produced files.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the compiled ex-informix binary
fn bin() -> String {
    env!("CARGO_BIN_EXE_ex-informix").to_string()
}

/// Run the binary and return (stdout, stderr, exit code).
fn run(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(bin())
        .args(args)
        .env_remove("KBC_DATADIR")
        .env("RUST_LOG", "warn")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute ex-informix with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().expect("process terminated by signal"),
    )
}

fn run_in(dir: &Path) -> (String, String, i32) {
    let data = format!("--data={}", dir.display());
    run(&[data.as_str()])
}

fn write_config(dir: &Path, body: &str) {
    std::fs::write(dir.join("config.yml"), body).unwrap();
}

const DUCKDB: &str = r#"
parameters:
  db:
    driver: duckdb
    host: localhost
    database: ":memory:"
    user: extractor
    password: secret
"#;

// ── Invocation ──────────────────────────────────────────────────────────

#[test]
fn test_missing_data_dir_exits_1() {
    let (_, stderr, code) = run(&[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Data folder not set."), "stderr: {stderr}");
}

#[test]
fn test_data_dir_from_env() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &format!(
            "{DUCKDB}  queries:
    - query: \"SELECT 1 AS id\"
      outputTable: from_env
"
        ),
    );

    let status = Command::new(bin())
        .env("KBC_DATADIR", temp.path())
        .env("RUST_LOG", "warn")
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(0));
    assert!(temp.path().join("out/tables/from_env.csv").exists());
}

// ── Exports ─────────────────────────────────────────────────────────────

#[test]
fn test_successful_export_writes_csv_and_manifest() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &format!(
            "{DUCKDB}    retries: 2
  queries:
    - query: \"SELECT 1 AS id, 'a' AS name\"
      outputTable: people
      incremental: true
      primaryKey: [id]
"
        ),
    );

    let (stdout, stderr, code) = run_in(temp.path());

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Success"));

    let tables = temp.path().join("out/tables");
    let csv = std::fs::read_to_string(tables.join("people.csv")).unwrap();
    assert_eq!(csv, "id,name\n1,a\n");

    let manifest = std::fs::read_to_string(tables.join("people.csv.manifest")).unwrap();
    assert!(manifest.contains("destination: people"));
    assert!(manifest.contains("incremental: true"));
    assert!(manifest.contains("- id"));
}

#[test]
fn test_empty_result_is_success_without_manifest() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &format!(
            "{DUCKDB}  queries:
    - query: \"SELECT * FROM range(0) t(n)\"
      outputTable: nothing
"
        ),
    );

    let (stdout, stderr, code) = run_in(temp.path());

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Success"));
    assert!(!temp
        .path()
        .join("out/tables/nothing.csv.manifest")
        .exists());
}

// ── Failures ────────────────────────────────────────────────────────────

#[test]
fn test_failing_query_exits_1_after_single_attempt() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &format!(
            "{DUCKDB}    retries: 0
  queries:
    - query: \"SELECT * FROM missing_table\"
      outputTable: missing
"
        ),
    );

    let (stdout, stderr, code) = run_in(temp.path());

    assert_eq!(code, 1);
    assert!(!stdout.contains("Success"));
    assert!(stderr.contains("SELECT * FROM missing_table"), "stderr: {stderr}");
    assert!(stderr.contains("1 attempt(s)"), "stderr: {stderr}");
    assert!(!temp.path().join("out/tables/missing.csv").exists());
}

#[test]
fn test_missing_password_exits_1() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
parameters:
  db:
    driver: duckdb
    host: localhost
    database: ":memory:"
    user: extractor
  queries:
    - query: "SELECT 1 AS id"
      outputTable: never
"#,
    );

    let (_, stderr, code) = run_in(temp.path());

    assert_eq!(code, 1);
    assert!(stderr.contains("Parameter password is missing."), "stderr: {stderr}");
    assert!(!temp.path().join("out/tables").exists());
}

#[test]
fn test_missing_config_exits_2() {
    let temp = TempDir::new().unwrap();

    let (_, _, code) = run_in(temp.path());

    assert_eq!(code, 2);
}

#[cfg(not(feature = "odbc"))]
#[test]
fn test_informix_without_odbc_support_exits_2() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r##"
parameters:
  db:
    host: ifx.example.com
    port: 9088
    database: stores
    server: ol_informix
    user: informix
    "#password": secret
  queries:
    - query: "SELECT 1 FROM systables"
      outputTable: never
"##,
    );

    let (_, stderr, code) = run_in(temp.path());

    assert_eq!(code, 2);
    assert!(stderr.contains("could not find driver"), "stderr: {stderr}");
}
