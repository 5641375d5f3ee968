use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `tbs` command isolated from the user's home and THREEBLADES_* variables.
fn tbs(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tbs").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("THREEBLADES_NAMESPACE")
        .env_remove("THREEBLADES_PROJECT")
        .env_remove("THREEBLADES_ROOT")
        .env_remove("THREEBLADES_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_command_prints_grouped_help() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workspace Commands:"))
        .stdout(predicate::str::contains("Billing Commands:"));
}

#[test]
fn test_env_prints_exports() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .args(["env", "--namespace", "acme", "--project", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export THREEBLADES_NAMESPACE=acme"))
        .stdout(predicate::str::contains("export THREEBLADES_PROJECT=demo"))
        .stdout(predicate::str::contains(
            "# eval $(tbs env --namespace=acme --project=demo)",
        ));
}

#[test]
fn test_env_reads_environment() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .env("THREEBLADES_NAMESPACE", "from-env")
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("export THREEBLADES_NAMESPACE=from-env"))
        .stdout(predicate::str::contains("THREEBLADES_PROJECT").not());
}

#[test]
fn test_missing_project_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .args(["--namespace", "acme", "--root", "http://127.0.0.1:9", "server", "ls"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No project configured"));
}

#[test]
fn test_missing_namespace_is_reported() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .args(["--root", "http://127.0.0.1:9", "host", "ls"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No namespace configured"));
}

#[test]
fn test_bad_filter_is_rejected() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .args(["--namespace", "acme", "project", "ls", "--filter", "name"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid filter 'name'"));
}

#[test]
fn test_account_create_lists_missing_flags() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .args(["account", "create", "--username", "ann"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "You need to provide flags: password, email",
        ));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".threeblades.yaml"), "namespace: [oops\n").unwrap();
    tbs(&home)
        .args(["host", "ls"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_namespace_from_config_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".threeblades.yaml"), "namespace: acme\n").unwrap();
    // Namespace is known, so the failure is the missing project, not the namespace.
    tbs(&home)
        .args(["--root", "http://127.0.0.1:9", "file", "ls"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No project configured"));
}

#[test]
fn test_unreachable_api_is_transport_error() {
    let home = TempDir::new().unwrap();
    tbs(&home)
        .args(["--namespace", "acme", "--root", "http://127.0.0.1:9", "plan", "ls"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_file_delete_requires_targets() {
    let home = TempDir::new().unwrap();
    tbs(&home).args(["file", "delete"]).assert().code(2);
}

#[test]
fn test_failed_bulk_item_exits_nonzero() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".threeblades.yaml"),
        "root: http://127.0.0.1:9\nnamespace: acme\nproject: demo\nproject_id: p1\n",
    )
    .unwrap();
    tbs(&home)
        .args(["file", "rm", "6f1c2a3b-0d4e-4f5a-8b6c-7d8e9f0a1b2c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Could not delete 6f1c2a3b-0d4e-4f5a-8b6c-7d8e9f0a1b2c",
        ))
        .stderr(predicate::str::contains("1 operation(s) failed"));
}
