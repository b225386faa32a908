use mapmeter_core::classify::{AnalyzerConfig, ComponentRule};

#[test]
fn default_config_builds_and_matches_reference_chip() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.regions.len(), 3);
    assert_eq!(config.regions[0].name, "PSRAM");
    assert_eq!(config.regions[0].start, "0x3C000000");
    assert_eq!(config.regions[0].end, "0x3E000000");

    // Ten ordered component rules: nine keyword rules plus the archive rule.
    assert_eq!(config.components.len(), 10);
    assert!(matches!(config.components.last(), Some(ComponentRule::ArchiveMember)));

    config.build().expect("default config builds");
}

#[test]
fn yaml_config_parses_and_builds() {
    let yaml = r#"
regions:
  - name: SRAM
    start: "0x20000000"
    end: "0x20040000"
components:
  - keywords:
      label: Audio
      keywords: [audio, dsp]
  - archive_member
"#;
    let config: AnalyzerConfig = serde_yaml::from_str(yaml).expect("parse yaml config");
    let classifiers = config.build().expect("build yaml config");

    assert_eq!(classifiers.regions.classify(0x2000_1000), "SRAM");
    assert_eq!(classifiers.regions.classify(0x4000_0000), "Unknown");
    assert_eq!(classifiers.components.classify("dsp_codec.c.obj"), "Audio");
    assert_eq!(classifiers.components.classify("libfoo.a(bar.o)"), "Library: foo");
}

#[test]
fn json_config_parses_and_builds() {
    let json = r#"
{
  "regions": [
    { "name": "TCM", "start": "0x10000000", "end": "0x10010000" }
  ],
  "components": [
    { "keywords": { "label": "Codec", "keywords": ["opus"] } },
    "archive_member"
  ]
}
"#;
    let config: AnalyzerConfig = serde_json::from_str(json).expect("parse json config");
    let classifiers = config.build().expect("build json config");

    assert_eq!(classifiers.regions.classify(0x1000_8000), "TCM");
    assert_eq!(classifiers.components.classify("opus_encoder.o"), "Codec");
}

/// A config file may override just one table; the other falls back to the
/// built-in default.
#[test]
fn partial_config_keeps_default_for_missing_table() {
    let yaml = r#"
regions:
  - name: SRAM
    start: "0x20000000"
    end: "0x20040000"
"#;
    let config: AnalyzerConfig = serde_yaml::from_str(yaml).expect("parse partial config");
    assert_eq!(config.regions.len(), 1);
    assert_eq!(config.components, AnalyzerConfig::default().components);
}

#[test]
fn config_round_trips_through_yaml() {
    let config = AnalyzerConfig::default();
    let yaml = serde_yaml::to_string(&config).expect("serialize default config");
    let reparsed: AnalyzerConfig = serde_yaml::from_str(&yaml).expect("reparse default config");
    assert_eq!(config, reparsed);
}

#[test]
fn keyword_matching_from_config_is_case_insensitive() {
    let yaml = r#"
components:
  - keywords:
      label: Audio
      keywords: [AUDIO]
"#;
    let config: AnalyzerConfig = serde_yaml::from_str(yaml).expect("parse config");
    let classifiers = config.build().expect("build config");
    assert_eq!(classifiers.components.classify("Audio_Mixer.cpp.obj"), "Audio");
}
