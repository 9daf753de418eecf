//! End-to-end tests for the executor against stub node/npm scripts.
//!
//! Each test materializes a project root in a tempdir with a fake `node`
//! shell script that plays back canned npm behavior, then drives the public
//! operations through a real subprocess. Unix only: the stubs are `sh`
//! scripts resolved relative to the project root.

#![cfg(unix)]

use npmbox_core::{Error, NpmClient, NpmConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::tempdir;

const DEBUG_ENV: &str = "NPMBOX_DEBUG";

/// Write an executable fake `node` under `<root>/bin` and return a client
/// whose every invocation runs it.
fn client_with_fake_node(root: &Path, script_body: &str) -> NpmClient {
    let bin = root.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let node = bin.join("node");
    fs::write(&node, format!("#!/bin/sh\n{script_body}\n")).unwrap();
    fs::set_permissions(&node, fs::Permissions::from_mode(0o755)).unwrap();

    // Captured output must not be diverted by a debug flag leaking in from
    // the ambient environment.
    std::env::remove_var(DEBUG_ENV);

    NpmClient::new(NpmConfig::new(
        root,
        node,
        root.join("lib").join("npm-cli.js"),
        "https://registry.example.com/",
    ))
}

#[test]
fn test_packages_decodes_listing() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(
        dir.path(),
        r#"echo '{"dependencies":{"left-pad":{"version":"1.3.0"}}}'"#,
    );

    let packages = client.packages().unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].name, "left-pad");
    assert_eq!(packages[0].version, "1.3.0");
}

#[test]
fn test_packages_failure_surfaces_stderr() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(dir.path(), "echo 'npm ERR! broken' >&2\nexit 2");

    let err = client.packages().unwrap_err();
    assert!(err.to_string().contains("npm ERR! broken"));
}

#[test]
fn test_install_failure_includes_hint() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(dir.path(), "echo 'npm ERR! E404' >&2\nexit 1");

    let err = client.install_packages(["left-pad"]).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("Error installing package."));
    assert!(text.contains("npm ERR! E404"));
    assert!(text.contains("NPMBOX_DEBUG=info"));
}

#[test]
fn test_remove_failure_is_bare_stderr() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(dir.path(), "echo 'npm ERR! not installed' >&2\nexit 1");

    let err = client.remove_packages(["left-pad"]).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("npm ERR! not installed"));
    assert!(!text.contains("NPMBOX_DEBUG"));
}

#[test]
fn test_outdated_exit_one_is_not_an_error() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(
        dir.path(),
        r#"echo '{"left-pad":{"current":"1.3.0","latest":"1.4.0"}}'
exit 1"#,
    );

    let outdated = client.outdated_packages(["left-pad"]).unwrap();
    assert_eq!(outdated.len(), 1);
    assert_eq!(outdated["left-pad"], "1.4.0");
}

#[test]
fn test_subprocess_contract() {
    let dir = tempdir().unwrap();
    // Record what the child actually sees, then answer with an empty listing.
    let client = client_with_fake_node(
        dir.path(),
        r#"pwd > seen_cwd.txt
printf '%s\n' "$@" > seen_args.txt
printenv npm_config_registry > seen_registry.txt
printenv npm_config_audit > seen_audit.txt
printenv PATH > seen_path.txt
echo '{}'"#,
    );

    let packages = client.packages().unwrap();
    assert!(packages.is_empty());

    let root = dir.path();
    let cwd = fs::read_to_string(root.join("seen_cwd.txt")).unwrap();
    assert_eq!(
        Path::new(cwd.trim()).canonicalize().unwrap(),
        root.canonicalize().unwrap()
    );

    let args = fs::read_to_string(root.join("seen_args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(
        args,
        [
            "lib/npm-cli.js",
            "--scripts-prepend-node-path=true",
            "list",
            "--json",
            "--depth=0"
        ]
    );

    let registry = fs::read_to_string(root.join("seen_registry.txt")).unwrap();
    assert_eq!(registry.trim(), "https://registry.example.com/");

    let audit = fs::read_to_string(root.join("seen_audit.txt")).unwrap();
    assert_eq!(audit.trim(), "false");

    let path = fs::read_to_string(root.join("seen_path.txt")).unwrap();
    assert!(path.starts_with(&*root.join("bin").to_string_lossy()));
}

#[test]
fn test_operations_create_node_modules() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(dir.path(), "echo '{}'");

    client.packages().unwrap();
    assert!(dir.path().join("node_modules").is_dir());

    // Create-if-missing must hold on repeat calls.
    client.packages().unwrap();
}

#[test]
fn test_clear_cache_reports_exit_code() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(dir.path(), "exit 0");
    client.clear_cache().unwrap();

    let failing = client_with_fake_node(dir.path(), "exit 3");
    let err = failing.clear_cache().unwrap_err();
    assert!(matches!(err, Error::Exit { code: 3 }));
}

#[test]
fn test_remove_package_lock() {
    let dir = tempdir().unwrap();
    let client = client_with_fake_node(dir.path(), "echo '{}'");

    fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
    client.remove_package_lock().unwrap();
    assert!(!dir.path().join("package-lock.json").exists());

    // Matches os-remove semantics: deleting a missing file is an error.
    assert!(client.remove_package_lock().is_err());
}
