//! CLI integration tests driving the actual binary with `assert_cmd`.
//! Since the textual IDL parser is out of scope, these only cover the
//! paths that don't require one: argument validation, the missing-IDL
//! exit code, and `--dump_preprocessor_output_and_die`.

use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_idl_exits_with_argument_error_code() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("zonegen")
        .unwrap()
        .args([
            "-i",
            dir.path().join("missing.idl").to_str().unwrap(),
            "-p",
            dir.path().to_str().unwrap(),
            "-h",
            "a.h",
            "-x",
            "a_proxy.cpp",
            "-s",
            "a_stub.cpp",
        ])
        .assert()
        .code(-1);
}

#[test]
fn dump_flag_prints_idl_text_and_exits_zero() {
    let dir = tempdir().unwrap();
    let idl = dir.path().join("a.idl");
    fs::write(&idl, "interface Foo {};").unwrap();

    Command::cargo_bin("zonegen")
        .unwrap()
        .args([
            "-i",
            idl.to_str().unwrap(),
            "-p",
            dir.path().to_str().unwrap(),
            "-h",
            "a.h",
            "-x",
            "a_proxy.cpp",
            "-s",
            "a_stub.cpp",
            "-d",
        ])
        .assert()
        .success()
        .stdout("interface Foo {};");
}

#[test]
fn missing_required_flag_is_rejected_by_clap() {
    Command::cargo_bin("zonegen")
        .unwrap()
        .args(["-i", "a.idl"])
        .assert()
        .failure();
}
