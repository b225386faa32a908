use std::path::Path;

use anyhow::{Context, Result};
use mapmeter_core::aggregate::{analyze, ReportOptions};
use mapmeter_core::parse::load_map;

use crate::commands::{load_analyzer_config, render};
use crate::sha256_file;

/// Run the full analysis pipeline and render the report.
///
/// A map that parses to nothing still renders (as an empty report); only a
/// missing or unreadable map file is a failure.
pub fn analyze_command(
    map: &str,
    config: Option<&str>,
    top: usize,
    region: &str,
    json: bool,
) -> Result<()> {
    let map_path = Path::new(map);

    let config = load_analyzer_config(config)?;
    let classifiers = config.build().context("Invalid analyzer configuration")?;

    let tables = load_map(map_path)
        .with_context(|| format!("Failed to load map file {}", map_path.display()))?;

    let options = ReportOptions { top_limit: top, focus_region: region.to_string() };
    let report = analyze(&tables, &classifiers, &options);

    if json {
        let serialized = serde_json::to_string_pretty(&report)
            .context("Failed to serialize report to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    let fingerprint = sha256_file(map_path)?;
    render::render_header(map_path, &fingerprint);
    render::render_full_report(&report);

    Ok(())
}
