#![cfg(not(target_arch = "wasm32"))]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use dxil_air_dxbc::test_utils::build_dxil_container;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn text_report_names_the_program_and_the_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shader.dxil");
    fs::write(&path, build_dxil_container(0x0005_0066, b"BC\xC0\xDE")).unwrap();

    cargo_bin_cmd!("dxil-air-inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[00] DXIL"))
        .stdout(predicate::str::contains("program: DXIL Compute sm6.6 dxil1.6"))
        .stdout(predicate::str::contains(
            "load: failed: lowering Compute shader model 6.6 DXIL to AIR is not implemented",
        ));
}

#[test]
fn json_report_is_machine_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shader.dxil");
    fs::write(&path, build_dxil_container(0x0000_0060, b"BC\xC0\xDE")).unwrap();

    let output = cargo_bin_cmd!("dxil-air-inspect")
        .arg(&path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["loaded"], false);
    assert_eq!(report["program"]["stage"], "Pixel");
    assert_eq!(report["program"]["shaderModel"], "6.0");
    assert_eq!(report["container"]["chunks"][0]["fourcc"], "DXIL");
    assert_eq!(report["container"]["chunks"][1]["fourcc"], "HASH");
    assert!(report["container"].get("summary").is_none());
}

#[test]
fn non_container_input_still_reports() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"hello").unwrap();

    cargo_bin_cmd!("dxil-air-inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("container: none"))
        .stdout(predicate::str::contains("load: failed: dxbc error: malformed DXBC header"));
}

#[test]
fn size_cap_flag_is_applied() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shader.dxil");
    fs::write(&path, build_dxil_container(0x0000_0060, b"BC\xC0\xDE")).unwrap();

    cargo_bin_cmd!("dxil-air-inspect")
        .arg(&path)
        .args(["--max-blob-bytes", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeds maximum 16 bytes"));
}

#[cfg(feature = "md5")]
#[test]
fn structural_md5_flag_checks_the_zeroed_field_digest() {
    use dxil_air_dxbc::test_utils::{build_container_with_md5, build_dxil_part};
    use dxil_air_dxbc::FourCC;

    let dir = tempdir().unwrap();
    let unsigned = dir.path().join("unsigned.dxil");
    fs::write(&unsigned, build_dxil_container(0x0000_0060, b"BC\xC0\xDE")).unwrap();
    let part = build_dxil_part(0x0000_0060, b"BC\xC0\xDE");
    let signed = dir.path().join("signed.dxil");
    fs::write(&signed, build_container_with_md5(&[(FourCC::DXIL, &part)])).unwrap();

    cargo_bin_cmd!("dxil-air-inspect")
        .arg(&unsigned)
        .arg("--structural-md5")
        .assert()
        .success()
        .stdout(predicate::str::contains("not the structural MD5"));

    cargo_bin_cmd!("dxil-air-inspect")
        .arg(&signed)
        .arg("--structural-md5")
        .assert()
        .success()
        .stdout(predicate::str::contains("DXIL to AIR is not implemented"));

    // Without the flag the checksum field is never looked at.
    cargo_bin_cmd!("dxil-air-inspect")
        .arg(&unsigned)
        .assert()
        .success()
        .stdout(predicate::str::contains("DXIL to AIR is not implemented"));
}

#[test]
fn unknown_flag_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shader.dxil");
    fs::write(&path, build_dxil_container(0x0000_0060, b"BC\xC0\xDE")).unwrap();

    cargo_bin_cmd!("dxil-air-inspect")
        .arg(&path)
        .arg("--verify-checksum")
        .assert()
        .failure();
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("dxil-air-inspect")
        .arg(dir.path().join("absent.dxil"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("read input"));
}
