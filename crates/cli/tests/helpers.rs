use std::fs;

use mapmeter::{group_digits, human_size, sha256_file, truncate_descriptor};
use tempfile::tempdir;

#[test]
fn group_digits_inserts_thousands_separators() {
    assert_eq!(group_digits(0), "0");
    assert_eq!(group_digits(999), "999");
    assert_eq!(group_digits(1_000), "1,000");
    assert_eq!(group_digits(1_234_567), "1,234,567");
    assert_eq!(group_digits(1_000_000_000), "1,000,000,000");
}

#[test]
fn human_size_picks_a_readable_unit() {
    assert_eq!(human_size(0), "0 B");
    assert_eq!(human_size(512), "512 B");
    assert_eq!(human_size(2_048), "2.00 KB");
    assert_eq!(human_size(1_572_864), "1.50 MB");
}

#[test]
fn truncate_descriptor_preserves_short_strings() {
    assert_eq!(truncate_descriptor("libmain.a(main.cpp.obj)", 60), "libmain.a(main.cpp.obj)");
}

#[test]
fn truncate_descriptor_cuts_long_strings_at_char_boundaries() {
    let long = "x".repeat(100);
    assert_eq!(truncate_descriptor(&long, 60).chars().count(), 60);

    // Multi-byte characters must not be split.
    let unicode = "ü".repeat(100);
    assert_eq!(truncate_descriptor(&unicode, 10), "ü".repeat(10));
}

#[test]
fn sha256_file_matches_known_digest() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("fingerprint.txt");
    fs::write(&path, "abc").expect("write file");

    let digest = sha256_file(&path).expect("hash file");
    assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn sha256_file_errors_for_missing_file() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.bin");

    let err = sha256_file(&missing).expect_err("missing file must fail");
    assert!(err.to_string().contains("Failed to open map file for hashing"));
}
