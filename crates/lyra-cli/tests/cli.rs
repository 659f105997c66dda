use std::io::Write as _;
use std::process::Command;

use tempfile::NamedTempFile;

fn lyra_source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{contents}").expect("write temp file");
    file
}

#[test]
fn run_executes_a_well_typed_program() {
    let file = lyra_source_file("println(1 + 2 * 3);");
    let output = Command::new(env!("CARGO_BIN_EXE_lyra"))
        .arg("run")
        .arg(file.path())
        .output()
        .expect("spawn lyra run");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "7\n");
}

#[test]
fn check_reports_type_errors_and_exits_non_zero() {
    let file = lyra_source_file("let x: Int = true;");
    let output = Command::new(env!("CARGO_BIN_EXE_lyra"))
        .arg("check")
        .arg(file.path())
        .output()
        .expect("spawn lyra check");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn check_on_a_clean_program_exits_successfully_without_running_it() {
    let file = lyra_source_file("println(1);");
    let output = Command::new(env!("CARGO_BIN_EXE_lyra"))
        .arg("check")
        .arg(file.path())
        .output()
        .expect("spawn lyra check");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
