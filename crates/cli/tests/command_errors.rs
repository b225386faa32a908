use std::fs;

use mapmeter::commands::{analyze_command, load_analyzer_config, regions_command};
use tempfile::tempdir;

#[test]
fn analyze_errors_when_config_file_is_missing() {
    let temp = tempdir().unwrap();
    let map = temp.path().join("firmware.map");
    fs::write(&map, "Linker script and memory map\n").unwrap();

    let err = analyze_command(
        map.to_str().unwrap(),
        Some(temp.path().join("absent.yaml").to_str().unwrap()),
        10,
        "PSRAM",
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to read analyzer config"), "unexpected error: {err}");
}

#[test]
fn load_analyzer_config_rejects_bad_yaml() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("broken.yaml");
    fs::write(&config, "regions: [unterminated\n").unwrap();

    let err = load_analyzer_config(Some(config.to_str().unwrap())).unwrap_err();
    assert!(
        err.to_string().contains("Failed to parse analyzer config YAML"),
        "unexpected error: {err}"
    );
}

#[test]
fn load_analyzer_config_rejects_bad_json() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("broken.json");
    fs::write(&config, "{ not json").unwrap();

    let err = load_analyzer_config(Some(config.to_str().unwrap())).unwrap_err();
    assert!(
        err.to_string().contains("Failed to parse analyzer config JSON"),
        "unexpected error: {err}"
    );
}

/// A config that parses but cannot build (malformed address) fails with the
/// configuration context, not a parse error.
#[test]
fn analyze_errors_on_semantically_invalid_config() {
    let temp = tempdir().unwrap();
    let map = temp.path().join("firmware.map");
    fs::write(&map, "Linker script and memory map\n").unwrap();

    let config = temp.path().join("bad-address.yaml");
    fs::write(&config, "regions:\n  - name: SRAM\n    start: \"0xNOPE\"\n    end: \"0x2000\"\n")
        .unwrap();

    let err = analyze_command(
        map.to_str().unwrap(),
        Some(config.to_str().unwrap()),
        10,
        "PSRAM",
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid analyzer configuration"), "unexpected error: {err}");
}

#[test]
fn regions_errors_when_map_is_missing() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("no-such.map");

    let err = regions_command(missing.to_str().unwrap(), false).unwrap_err();
    assert!(err.to_string().contains("Failed to load map file"), "unexpected error: {err}");
}

/// Omitting the config path uses the built-in default tables.
#[test]
fn missing_config_argument_falls_back_to_defaults() {
    let config = load_analyzer_config(None).unwrap();
    assert_eq!(config, mapmeter_core::classify::AnalyzerConfig::default());
}
