//! Option loading through the harness builder.

use crate::common::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use xaharness::{Error, Harness, ParticipantOptions};

#[test]
fn config_file_sets_halt_marker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("participant.toml");
    std::fs::write(&path, "halt_marker = \"CRASH\"\nhalt_exit_code = 9\n").unwrap();

    let harness = Harness::builder()
        .config_file(&path)
        .host_resolver(FixedHost)
        .halt(PanicHalt)
        .build()
        .unwrap();
    assert_eq!(harness.participant().options().halt_marker, "CRASH");

    let client = harness.client();
    assert!(client.inject_fault(None, "HALT").is_ok());

    let panic = catch_unwind(AssertUnwindSafe(|| client.inject_fault(None, "CRASH"))).unwrap_err();
    assert_eq!(
        panic.downcast_ref::<String>().map(String::as_str),
        Some("halted with exit code 9")
    );
}

#[test]
fn explicit_options_win_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("participant.toml");
    std::fs::write(&path, "halt_marker = \"FROM_FILE\"\n").unwrap();

    let harness = Harness::builder()
        .config_file(&path)
        .options(ParticipantOptions::default().with_halt_marker("EXPLICIT"))
        .build()
        .unwrap();
    assert_eq!(harness.participant().options().halt_marker, "EXPLICIT");
}

#[test]
fn explicit_options_are_not_merged_with_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("participant.toml");
    std::fs::write(&path, "halt_exit_code = 9\nnot valid toml [[[\n").unwrap();

    let harness = Harness::builder()
        .config_file(&path)
        .options(ParticipantOptions::default().with_halt_marker("EXPLICIT"))
        .build()
        .unwrap();
    let options = harness.participant().options();
    assert_eq!(options.halt_marker, "EXPLICIT");
    assert_eq!(options.halt_exit_code, 1);
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("participant.toml");
    std::fs::write(&path, "halt_marker = 42\n").unwrap();

    let err = Harness::builder().config_file(&path).build().err().unwrap();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = Harness::builder()
        .config_file(dir.path().join("absent.toml"))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::Config(_)));
}
