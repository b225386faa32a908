//! Parsers for the linker map file's sub-grammars.
//!
//! A map file interleaves several independently-formatted tables with
//! toolchain annotations, comments, and wrapped lines. Each table gets its
//! own pure parse function over the full text, so the absence of one block
//! never affects the others:
//! - `parse_memory_regions`: the memory-configuration block.
//! - `parse_sections`: top-level section-allocation lines.
//! - `parse_symbols`: indented symbol-table lines.
//! - `parse_region_usage`: the linker's region-usage summary table.
//!
//! Lines that do not match the expected grammar for their block are skipped
//! and parsing continues; a hex field too large for `u64` counts as a parse
//! failure for that line only. Skips are diagnostics, never report content.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::{MapTables, MemoryRegion, RegionUsage, Section, Symbol};

/// Start marker of the memory-configuration block.
const MEMORY_CONFIG_START: &str = "Memory Configuration";

/// End marker of the memory-configuration block (start of the map proper).
const MEMORY_CONFIG_END: &str = "Linker script and memory map";

static REGION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)\s+0x([0-9A-Fa-f]+)\s+0x([0-9A-Fa-f]+)").unwrap());

static SECTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\.\w+(?:\.\w+)*)\s+0x([0-9A-Fa-f]+)\s+0x([0-9A-Fa-f]+)").unwrap()
});

static SYMBOL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+0x([0-9A-Fa-f]+)\s+0x([0-9A-Fa-f]+)\s+(\S.*?)\s*$").unwrap());

static REGION_USAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+):\s+(\d+)\s+B\s+(\d+)\s+B\s+([0-9.]+)%").unwrap());

/// Error type for map-file loading.
///
/// Only file-level failures are errors. Malformed lines inside the file are
/// recovered by skipping them, and a file that yields no rows at all is a
/// valid (empty) result, not a failure.
#[derive(Debug, Error)]
pub enum MapError {
    /// The given path does not resolve to a readable file.
    #[error("Map file not found: {0}")]
    InputNotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("Failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for map loading.
pub type MapResult<T> = Result<T, MapError>;

/// Read a map file from disk and parse it.
///
/// This is the only I/O in the core. The file is read in one shot (map files
/// are at most a few megabytes) and decoded lossily, since linker maps
/// occasionally carry stray non-UTF-8 bytes in descriptor text.
pub fn load_map(path: &Path) -> MapResult<MapTables> {
    if !path.is_file() {
        return Err(MapError::InputNotFound(path.to_path_buf()));
    }
    let bytes =
        fs::read(path).map_err(|source| MapError::Io { path: path.to_path_buf(), source })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_map(&text))
}

/// Parse the full text of a map file into its tables.
///
/// Never fails: missing blocks yield empty tables and unrecognized lines are
/// skipped.
pub fn parse_map(text: &str) -> MapTables {
    let tables = MapTables {
        regions: parse_memory_regions(text),
        sections: parse_sections(text),
        symbols: parse_symbols(text),
        region_usage: parse_region_usage(text),
    };
    log::debug!(
        "parsed {} regions, {} section fragments, {} symbols, {} usage rows",
        tables.regions.len(),
        tables.sections.len(),
        tables.symbols.len(),
        tables.region_usage.len()
    );
    tables
}

/// Extract the memory-configuration block.
///
/// The block is bounded by the `Memory Configuration` and
/// `Linker script and memory map` markers; each matching
/// `<name> <origin> <length>` line inside it yields one region. Header lines
/// and attribute-only rows (such as `*default*`) do not match and are
/// skipped.
pub fn parse_memory_regions(text: &str) -> Vec<MemoryRegion> {
    let mut regions = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        if line.starts_with(MEMORY_CONFIG_START) {
            in_block = true;
            continue;
        }
        if line.starts_with(MEMORY_CONFIG_END) {
            in_block = false;
            continue;
        }
        if !in_block {
            continue;
        }
        if let Some(caps) = REGION_LINE.captures(line) {
            let (Some(origin), Some(length)) = (parse_hex(&caps[2]), parse_hex(&caps[3])) else {
                continue;
            };
            regions.push(MemoryRegion::new(&caps[1], origin, length));
        }
    }

    if regions.is_empty() {
        log::debug!("no memory-configuration block found");
    }
    regions
}

/// Extract section-allocation fragments.
///
/// Matches lines beginning at column 0 with a dotted section name followed
/// by a hex address and a hex size. Only nonzero-size fragments are kept;
/// fragments sharing a name are summed later by the aggregator.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    for line in text.lines() {
        if let Some(caps) = SECTION_LINE.captures(line) {
            let (Some(address), Some(size)) = (parse_hex(&caps[2]), parse_hex(&caps[3])) else {
                continue;
            };
            if size > 0 {
                sections.push(Section::new(&caps[1], address, size));
            }
        }
    }
    sections
}

/// Extract symbol-table entries.
///
/// Matches indented `<address> <size> <descriptor>` lines. Only nonzero-size
/// entries are kept; the descriptor is carried verbatim for component
/// classification.
pub fn parse_symbols(text: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    for line in text.lines() {
        if let Some(caps) = SYMBOL_LINE.captures(line) {
            let (Some(address), Some(size)) = (parse_hex(&caps[1]), parse_hex(&caps[2])) else {
                continue;
            };
            if size > 0 {
                symbols.push(Symbol::new(address, size, &caps[3]));
            }
        }
    }
    symbols
}

/// Extract the linker's region-usage summary rows
/// (`<region>: <used> B <total> B <pct>%`).
///
/// Used and total sizes are decimal byte counts; the percentage is the
/// linker's own figure and is kept as printed.
pub fn parse_region_usage(text: &str) -> Vec<RegionUsage> {
    let mut rows = Vec::new();
    for line in text.lines() {
        if let Some(caps) = REGION_USAGE_LINE.captures(line) {
            let (Ok(used), Ok(total)) = (caps[2].parse::<u64>(), caps[3].parse::<u64>()) else {
                continue;
            };
            rows.push(RegionUsage::new(&caps[1], used, total, &caps[4]));
        }
    }
    rows
}

/// Parse a hex digit string (without the `0x` prefix) as `u64`.
///
/// Returns `None` when the value does not fit, which callers treat as a
/// parse failure for the whole line.
fn parse_hex(digits: &str) -> Option<u64> {
    u64::from_str_radix(digits, 16).ok()
}
