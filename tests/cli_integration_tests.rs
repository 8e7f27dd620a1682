//! End-to-end tests of the vrepo binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn vrepo(source: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vrepo").unwrap();
    cmd.current_dir(source).env("NO_COLOR", "1").env_remove("VREPO_LOG");
    cmd
}

#[test]
fn test_add_ssh_remote_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();

    vrepo(source)
        .args(["add-remote", "--ssh", "srv:/var/www/site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adding ssh remote \"srv:/var/www/site\""));

    // Adding the same remote twice keeps a single entry
    vrepo(source)
        .args(["add-remote", "--ssh", "srv:/var/www/site"])
        .assert()
        .success();

    vrepo(source)
        .arg("remotes")
        .assert()
        .success()
        .stdout(predicate::str::contains("    * srv:/var/www/site (ssh)").count(1));

    let config = fs::read_to_string(source.join(".vrepo")).unwrap();
    assert!(config.contains("\"alias\": \"srv\""));
}

#[test]
fn test_add_git_remote_json_listing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();

    vrepo(source)
        .args(["add-remote", "--git", "--destination", "git@host:me/pkg.git", "--branch", "dev"])
        .assert()
        .success();

    let output = vrepo(source)
        .args(["remotes", "--git", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let remote = &listing[0]["git"][0];
    assert_eq!(remote["remote"], "origin");
    assert_eq!(remote["branch"], "dev");
    assert_eq!(remote["destination"], "git@host:me/pkg.git");
    assert_eq!(remote["enabled"], true);
    assert!(listing[0].get("ssh").is_none());
}

#[test]
fn test_add_remote_argument_errors() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();

    vrepo(source)
        .args(["add-remote", "--git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--destination"));

    vrepo(source)
        .args(["add-remote", "--ssh", "no-separator"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid ssh remote"));

    vrepo(source).arg("add-remote").assert().failure();
}

#[test]
fn test_pull_requires_known_remote() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();

    vrepo(source).arg("pull").assert().failure();

    vrepo(source)
        .args(["pull", "--git", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Git remote \"nope\" does not exist."));
}

#[test]
fn test_push_without_remotes() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();

    vrepo(source)
        .arg("push")
        .assert()
        .success()
        .stderr(predicate::str::contains("No remotes to push"));

    vrepo(source)
        .args(["push", "--ssh", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SSH remote \"missing\" does not exist."));

    assert!(source.join(".vrepo").exists());
}

#[test]
fn test_list_large_files_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();
    fs::write(source.join(".gitignore"), "*.dat\n").unwrap();
    fs::write(source.join("big.dat"), vec![0u8; 4096]).unwrap();
    fs::write(source.join("small.txt"), "hello").unwrap();

    vrepo(source)
        .arg("list-large-files")
        .assert()
        .success()
        .stdout(predicate::str::contains("    * big.dat: "))
        .stdout(predicate::str::contains("    * small.txt: 5 B."));

    vrepo(source)
        .args(["list-large-files", "-g"])
        .assert()
        .success()
        .stdout(predicate::str::contains("big.dat").not());
}

#[test]
fn test_list_large_files_json() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();
    fs::create_dir(source.join("assets")).unwrap();
    fs::write(source.join("assets/logo.png"), vec![0u8; 4000]).unwrap();
    fs::write(source.join("index.html"), vec![0u8; 100]).unwrap();

    let output = vrepo(source)
        .args(["list-large-files", "--json", "--directories", "--limit", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = listing[0]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["relative"], "assets");
    assert_eq!(files[0]["size"], 4000);
    assert_eq!(files[0]["is_dir"], true);
    assert_eq!(files[1]["relative"], "assets/logo.png");
}

#[test]
fn test_check_ignore() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();
    fs::write(source.join(".gitignore"), "build/\n!build/keep.txt\n").unwrap();

    vrepo(source)
        .args(["check-ignore", "build/keep.txt", "src/main.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("build/keep.txt: ignored."))
        .stdout(predicate::str::contains("src/main.rs: not ignored."));

    vrepo(source)
        .args(["check-ignore", "../outside.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside of the repository root"));
}

#[test]
fn test_completion() {
    let temp_dir = TempDir::new().unwrap();

    vrepo(temp_dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vrepo"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path();
    fs::write(source.join(".vrepo"), "{ not json").unwrap();

    vrepo(source)
        .arg("remotes")
        .assert()
        .failure()
        .stderr(predicate::str::contains(".vrepo"));
}
