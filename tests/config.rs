#![cfg(unix)]

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;

fn command() -> Command {
    Command::cargo_bin("linkwarp").expect("binary exists")
}

fn executable(temp: &assert_fs::TempDir, rel: &str) {
    let file = temp.child(rel);
    fs::create_dir_all(file.path().parent().unwrap()).unwrap();
    file.write_str("#!/bin/sh\n").unwrap();
    fs::set_permissions(file.path(), fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn config_init_writes_defaults_and_path_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_root = temp.child("xdg-config");

    command()
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", config_root.path())
        .env_remove("LINKWARP_CONFIG")
        .arg("config")
        .arg("--init")
        .assert()
        .success();

    let contents = fs::read_to_string(config_root.child("linkwarp/config.toml").path()).unwrap();
    assert!(contents.contains("max_depth = 2"));
    assert!(contents.contains("ledger = true"));

    command()
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", config_root.path())
        .env_remove("LINKWARP_CONFIG")
        .arg("config")
        .arg("--path")
        .assert()
        .success()
        .stdout(predicate::str::contains("linkwarp/config.toml"));
}

#[test]
fn exclude_and_ledger_settings_apply_to_sync() {
    let temp = assert_fs::TempDir::new().unwrap();
    executable(&temp, "warp/apps/tool-1/bin/tool");
    executable(&temp, "warp/apps/tool-2-broken/bin/tool");
    temp.child("warp/bin").create_dir_all().unwrap();
    let config = temp.child("custom.toml");
    config.write_str("exclude = [\"**/*-broken\"]\nledger = false\n").unwrap();

    command()
        .env("HOME", temp.path())
        .env("LINKWARP_CONFIG", config.path())
        .arg(temp.child("warp").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 application(s)"));

    assert_eq!(
        fs::read_link(temp.child("warp/bin/tool").path()).unwrap(),
        std::path::PathBuf::from("../apps/tool-1/bin/tool")
    );
    temp.child("warp/bin/.linkwarp-ledger.json").assert(predicates::path::missing());
}

#[test]
fn invalid_config_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("bad.toml");
    config.write_str("inner_depth = 0\n").unwrap();

    command()
        .env("HOME", temp.path())
        .env("LINKWARP_CONFIG", config.path())
        .arg("scan")
        .arg(temp.path())
        .assert()
        .code(25)
        .stderr(predicate::str::contains("inner_depth"));
}
