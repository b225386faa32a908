use mapmeter_core::aggregate::{analyze, ReportOptions};
use mapmeter_core::classify::AnalyzerConfig;
use mapmeter_core::parse::parse_map;
use mapmeter_core::version;

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

/// End-to-end smoke test: one symbol line flows through parsing,
/// classification, and aggregation.
#[test]
fn pipeline_classifies_a_single_symbol_line() {
    let tables = parse_map("   0x3C010000 0x00001000 libmbedtls.a(ssl_tls.o)\n");
    assert_eq!(tables.symbols.len(), 1);

    let classifiers = AnalyzerConfig::default().build().expect("default config builds");
    let report = analyze(&tables, &classifiers, &ReportOptions::default());

    assert_eq!(report.by_region.get("PSRAM").expect("psram bucket").total_size, 0x1000);
    assert_eq!(report.by_component.get("SSL/TLS").expect("ssl bucket").total_size, 0x1000);
    assert_eq!(report.top_symbols.len(), 1);
}
