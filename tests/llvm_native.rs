//! Integration tests for native executable compilation
//!
//! These link with the system `cc` and run the result, so they need a C
//! toolchain on the host in addition to LLVM.

#![cfg(feature = "llvm")]

use std::fs;
use std::process::Command;

use hellolang::{check, LLVMCompiler};
use tempfile::tempdir;

/// Helper to build the hello program and run the resulting executable
fn build_and_run(opt_level: u8) -> Result<(i32, String), String> {
    check(b"hello\n").map_err(|e| format!("Check error: {:?}", e))?;

    let dir = tempdir().map_err(|e| format!("Failed to create temp dir: {}", e))?;
    let exe_path = dir.path().join("hello_exe");

    LLVMCompiler::new()
        .with_optimization(opt_level)
        .compile_to_native(&exe_path)
        .map_err(|e| format!("Compile error: {:?}", e))?;

    let output = Command::new(&exe_path)
        .output()
        .map_err(|e| format!("Failed to run executable: {}", e))?;

    Ok((
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
    ))
}

#[test]
fn test_native_prints_greeting_and_exits_zero() {
    let (code, stdout) = build_and_run(2).unwrap();
    assert_eq!(code, 0);
    assert_eq!(stdout, "Hello, World!\n");
}

#[test]
fn test_native_output_is_the_same_at_every_opt_level() {
    for level in 0..=3 {
        let (code, stdout) = build_and_run(level).unwrap();
        assert_eq!(code, 0, "opt level {}", level);
        assert_eq!(stdout, "Hello, World!\n", "opt level {}", level);
    }
}

#[test]
fn test_native_build_leaves_neighbouring_object_alone() {
    let dir = tempdir().unwrap();
    let exe_path = dir.path().join("app.exe");
    let sibling = dir.path().join("app.o");
    fs::write(&sibling, b"user data").unwrap();

    LLVMCompiler::new().compile_to_native(&exe_path).unwrap();

    assert!(exe_path.exists());
    assert_eq!(fs::read(&sibling).unwrap(), b"user data".to_vec());
}

#[test]
fn test_native_build_can_be_named_like_an_object() {
    let dir = tempdir().unwrap();
    let exe_path = dir.path().join("prog.o");

    LLVMCompiler::new().compile_to_native(&exe_path).unwrap();

    let output = Command::new(&exe_path).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello, World!\n");
}

#[test]
fn test_native_build_writes_nothing_else_beside_output() {
    let dir = tempdir().unwrap();
    let exe_path = dir.path().join("hello_exe");

    LLVMCompiler::new().compile_to_native(&exe_path).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("hello_exe")]);
}
