use std::path::Path;

use anyhow::{Context, Result};
use mapmeter_core::aggregate::{top_symbols, SectionTotals};
use mapmeter_core::parse::load_map;

use crate::commands::render;

/// Print the memory-configuration table (and the linker's region-usage
/// summary when the map carries one).
pub fn regions_command(map: &str, json: bool) -> Result<()> {
    let map_path = Path::new(map);
    let tables = load_map(map_path)
        .with_context(|| format!("Failed to load map file {}", map_path.display()))?;

    if json {
        let serialized = serde_json::to_string_pretty(&tables.regions)
            .context("Failed to serialize regions to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    render::render_regions(&tables.regions);
    if !tables.region_usage.is_empty() {
        println!();
        render::render_region_usage(&tables.region_usage);
    }
    Ok(())
}

/// Print the per-section-name size summary.
pub fn sections_command(map: &str, json: bool) -> Result<()> {
    let map_path = Path::new(map);
    let tables = load_map(map_path)
        .with_context(|| format!("Failed to load map file {}", map_path.display()))?;

    let totals = SectionTotals::from_sections(&tables.sections);

    if json {
        let serialized = serde_json::to_string_pretty(&totals)
            .context("Failed to serialize section summary to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    render::render_sections(&totals);
    Ok(())
}

/// Print the largest symbols.
pub fn top_command(map: &str, limit: usize, json: bool) -> Result<()> {
    let map_path = Path::new(map);
    let tables = load_map(map_path)
        .with_context(|| format!("Failed to load map file {}", map_path.display()))?;

    let top = top_symbols(&tables.symbols, limit);

    if json {
        let serialized =
            serde_json::to_string_pretty(&top).context("Failed to serialize symbols to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    render::render_top_symbols(&top);
    Ok(())
}
