//! Aggregation of classified symbols and section fragments into reports.
//!
//! `analyze` consumes the parsed tables plus the classifiers and produces a
//! `MemoryReport`: per-component, per-region, and focus-region-filtered
//! breakdowns, per-section totals, and the top-N largest symbols. Every
//! number a renderer needs (including percentages) is computed here, so a
//! frontend can format the report without doing arithmetic of its own.
//!
//! Breakdowns are `BTreeMap`-backed and top-N ties break by ascending
//! address, so identical input always yields identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::Classifiers;
use crate::model::{MapTables, MemoryRegion, RegionUsage, Section, Symbol};

/// Default number of entries in the top-symbols list.
pub const DEFAULT_TOP_LIMIT: usize = 20;

/// Size and count rollup for one aggregation key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub total_size: u64,
    pub symbol_count: u64,
}

impl Aggregate {
    /// Fold one symbol into the rollup.
    pub fn record(&mut self, size: u64) {
        self.total_size += size;
        self.symbol_count += 1;
    }

    /// Mean symbol size, or 0 when the rollup is empty.
    pub fn average_size(&self) -> u64 {
        if self.symbol_count == 0 {
            0
        } else {
            self.total_size / self.symbol_count
        }
    }
}

/// A ranked row of a breakdown, with its percentage of the breakdown total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub total_size: u64,
    pub symbol_count: u64,
    pub average_size: u64,
    pub percent: f64,
}

/// A keyed size/count rollup (by component, by region, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    entries: BTreeMap<String, Aggregate>,
}

impl Breakdown {
    fn record(&mut self, key: &str, size: u64) {
        self.entries.entry(key.to_string()).or_default().record(size);
    }

    pub fn get(&self, key: &str) -> Option<&Aggregate> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all per-key totals.
    ///
    /// For the by-region and by-component breakdowns this equals the sum of
    /// all symbol sizes, since each classifier assigns every symbol exactly
    /// one key.
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|a| a.total_size).sum()
    }

    /// Rows sorted by descending size (ties by label), each carrying its
    /// percentage of the breakdown total (0 when the total is 0).
    pub fn ranked(&self) -> Vec<BreakdownRow> {
        let total = self.total_size();
        let mut rows: Vec<BreakdownRow> = self
            .entries
            .iter()
            .map(|(label, aggregate)| BreakdownRow {
                label: label.clone(),
                total_size: aggregate.total_size,
                symbol_count: aggregate.symbol_count,
                average_size: aggregate.average_size(),
                percent: percent_of(aggregate.total_size, total),
            })
            .collect();
        rows.sort_by(|a, b| b.total_size.cmp(&a.total_size).then_with(|| a.label.cmp(&b.label)));
        rows
    }
}

/// A ranked row of the section summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRow {
    pub name: String,
    pub size: u64,
    pub percent: f64,
}

/// Per-section-name summed sizes.
///
/// Sections and symbols are independently parsed, non-overlapping data
/// sources, so this carries sizes only, without symbol counts. The grand total
/// is the percentage denominator for the section report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTotals {
    totals: BTreeMap<String, u64>,
    total: u64,
}

impl SectionTotals {
    /// Accumulate fragments by section name.
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut totals = Self::default();
        for section in sections {
            totals.record(&section.name, section.size);
        }
        totals
    }

    fn record(&mut self, name: &str, size: u64) {
        *self.totals.entry(name.to_string()).or_default() += size;
        self.total += size;
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.totals.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Total size across all discovered sections.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Rows sorted by descending size (ties by name), with percentages of
    /// the global section total.
    pub fn ranked(&self) -> Vec<SectionRow> {
        let mut rows: Vec<SectionRow> = self
            .totals
            .iter()
            .map(|(name, &size)| SectionRow {
                name: name.clone(),
                size,
                percent: percent_of(size, self.total),
            })
            .collect();
        rows.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
        rows
    }
}

/// Knobs for report generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Number of entries in the top-symbols list.
    pub top_limit: usize,
    /// Region label for the focused per-component breakdown.
    pub focus_region: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { top_limit: DEFAULT_TOP_LIMIT, focus_region: "PSRAM".to_string() }
    }
}

/// The complete analysis product for one map file.
///
/// Read-only from the renderer's point of view; all numeric work is done by
/// the time this value exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryReport {
    /// Memory regions as declared in the map file.
    pub regions: Vec<MemoryRegion>,
    /// The linker's own region-usage summary rows, when present.
    pub region_usage: Vec<RegionUsage>,
    /// Per-section-name summed sizes.
    pub sections: SectionTotals,
    /// Component breakdown over all regions.
    pub by_component: Breakdown,
    /// Region breakdown over all components.
    pub by_region: Breakdown,
    /// The region label the focused breakdown was filtered on.
    pub focus_region: String,
    /// Component breakdown restricted to `focus_region`.
    pub focus_by_component: Breakdown,
    /// Largest symbols, size descending, ties by ascending address.
    pub top_symbols: Vec<Symbol>,
    /// Sum of all symbol sizes.
    pub symbol_total: u64,
    /// Number of symbols analyzed.
    pub symbol_count: u64,
}

/// Build the full report from parsed tables.
///
/// Works on empty tables too: an empty map yields empty breakdowns and an
/// empty top list, never an error.
pub fn analyze(tables: &MapTables, classifiers: &Classifiers, options: &ReportOptions) -> MemoryReport {
    let mut by_component = Breakdown::default();
    let mut by_region = Breakdown::default();
    let mut focus_by_component = Breakdown::default();
    let mut symbol_total = 0u64;

    for symbol in &tables.symbols {
        let region = classifiers.regions.classify(symbol.address);
        let component = classifiers.components.classify(&symbol.descriptor);
        by_region.record(region, symbol.size);
        by_component.record(&component, symbol.size);
        // The region filter applies before accumulation: a symbol outside
        // the focus region contributes nothing to the focused view.
        if region == options.focus_region {
            focus_by_component.record(&component, symbol.size);
        }
        symbol_total += symbol.size;
    }

    MemoryReport {
        regions: tables.regions.clone(),
        region_usage: tables.region_usage.clone(),
        sections: SectionTotals::from_sections(&tables.sections),
        by_component,
        by_region,
        focus_region: options.focus_region.clone(),
        focus_by_component,
        top_symbols: top_symbols(&tables.symbols, options.top_limit),
        symbol_total,
        symbol_count: tables.symbols.len() as u64,
    }
}

/// The `limit` largest symbols, size descending, ties broken by ascending
/// address so the ordering is reproducible regardless of input order.
pub fn top_symbols(symbols: &[Symbol], limit: usize) -> Vec<Symbol> {
    let mut sorted: Vec<Symbol> = symbols.iter().filter(|s| s.size > 0).cloned().collect();
    sorted.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.address.cmp(&b.address)));
    sorted.truncate(limit);
    sorted
}

fn percent_of(size: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        size as f64 / total as f64 * 100.0
    }
}
