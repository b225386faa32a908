//! Text rendering of analysis results.
//!
//! Everything here formats values the core already computed. No aggregate
//! math happens in this module; display-unit conversion (bytes to KB/MB)
//! is the only arithmetic.

use std::path::Path;

use chrono::Utc;
use mapmeter_core::aggregate::{Breakdown, MemoryReport, SectionTotals};
use mapmeter_core::model::{MemoryRegion, RegionUsage, Symbol};

use crate::{group_digits, human_size, truncate_descriptor};

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Maximum descriptor width in the largest-symbols table.
const DESCRIPTOR_WIDTH: usize = 60;

pub fn render_header(map_path: &Path, fingerprint: &str) {
    println!("Firmware Map Analysis");
    println!("=====================");
    println!("Map file:  {}", map_path.display());
    println!("SHA-256:   {}", fingerprint);
    println!("Generated: {}", Utc::now().to_rfc3339());
}

/// Render the whole report in the order the reference tool used: regions,
/// sections, components, focus region, largest symbols, quick totals.
pub fn render_full_report(report: &MemoryReport) {
    println!();
    render_regions(&report.regions);
    if !report.region_usage.is_empty() {
        println!();
        render_region_usage(&report.region_usage);
    }
    println!();
    render_sections(&report.sections);
    println!();
    render_breakdown("Component Memory Usage (All Regions)", &report.by_component);
    println!();
    render_breakdown(
        &format!("{} Usage by Component", report.focus_region),
        &report.focus_by_component,
    );
    println!();
    render_top_symbols(&report.top_symbols);
    println!();
    render_breakdown("Memory Usage by Region", &report.by_region);
    println!();
    render_component_totals(report);
    println!(
        "Analysis complete. Symbols analyzed: {} ({} bytes).",
        group_digits(report.symbol_count),
        group_digits(report.symbol_total)
    );
}

pub fn render_regions(regions: &[MemoryRegion]) {
    println!("Memory Configuration:");
    println!("{RULE}");
    if regions.is_empty() {
        println!("  (none)");
        return;
    }
    for region in regions {
        println!(
            "  {:<20} Origin: 0x{:08X}  Length: {:>12} bytes ({})",
            region.name,
            region.origin,
            group_digits(region.length),
            human_size(region.length)
        );
    }
}

pub fn render_region_usage(rows: &[RegionUsage]) {
    println!("Memory Region Usage (from linker):");
    println!("{RULE}");
    println!("{:<20} {:>15} {:>15} {:>8}", "Region", "Used", "Total", "Use");
    for row in rows {
        println!(
            "{:<20} {:>9} bytes {:>9} bytes {:>7}%",
            row.name,
            group_digits(row.used),
            group_digits(row.total),
            row.percent
        );
    }
}

pub fn render_sections(totals: &SectionTotals) {
    println!("Section Summary:");
    println!("{RULE}");
    if totals.is_empty() {
        println!("  (none)");
        return;
    }
    println!("{:<30} {:>15} {:>9}", "Section", "Size", "Share");
    for row in totals.ranked() {
        println!(
            "{:<30} {:>9} bytes {:>8.2}%",
            row.name,
            group_digits(row.size),
            row.percent
        );
    }
    println!("{RULE}");
    println!("{:<30} {:>9} bytes", "TOTAL", group_digits(totals.total()));
}

pub fn render_breakdown(title: &str, breakdown: &Breakdown) {
    println!("{title}:");
    println!("{RULE}");
    if breakdown.is_empty() {
        println!("  (none)");
        return;
    }
    println!("{:<36} {:>15} {:>7} {:>10} {:>8}", "Category", "Size", "Count", "Avg", "Share");
    for row in breakdown.ranked() {
        println!(
            "{:<36} {:>9} bytes {:>7} {:>8} B {:>7.2}%",
            row.label,
            group_digits(row.total_size),
            row.symbol_count,
            group_digits(row.average_size),
            row.percent
        );
    }
    println!("{RULE}");
    println!("{:<36} {:>9} bytes", "TOTAL", group_digits(breakdown.total_size()));
}

pub fn render_top_symbols(symbols: &[Symbol]) {
    println!("Largest Symbols:");
    println!("{RULE}");
    if symbols.is_empty() {
        println!("  (none)");
        return;
    }
    println!("{:>12}  {:>10}  Symbol", "Size", "Address");
    for symbol in symbols {
        println!(
            "{:>10} B  0x{:08X}  {}",
            group_digits(symbol.size),
            symbol.address,
            truncate_descriptor(&symbol.descriptor, DESCRIPTOR_WIDTH)
        );
    }
}

/// One-line quick totals for the components the reference tool called out.
pub fn render_component_totals(report: &MemoryReport) {
    for (label, display) in [
        ("Matter", "Matter Protocol total"),
        ("OpenThings Framework", "OpenThings Framework total"),
        ("Sensors", "Sensors total"),
    ] {
        if let Some(aggregate) = report.by_component.get(label) {
            println!(
                "{}: {} bytes ({} symbols)",
                display,
                group_digits(aggregate.total_size),
                group_digits(aggregate.symbol_count)
            );
        }
    }
}
