//! Shared helpers for the mapmeter CLI.
//!
//! Substantive analysis logic lives in `mapmeter-core`; this crate only
//! resolves inputs, formats values for display, and wires subcommands.

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub mod commands;

/// Default map location for the reference firmware build, used when the
/// caller gives no path.
pub const DEFAULT_MAP_PATH: &str = ".pio/build/esp32-c5/firmware.map";

/// Compute the SHA-256 hash of a file and return it as a hex string.
///
/// The report header carries this fingerprint so a report is attributable
/// to one exact build artifact.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open map file for hashing: {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read map file for hashing: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let digest = hasher.finalize();
    Ok(format!("{:x}", digest))
}

/// Render an integer with thousands separators, e.g. `1234567` as `1,234,567`.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a byte count with a binary-unit suffix, e.g. `2048` as `2.00 KB`.
pub fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let value = bytes as f64;
    if value >= MIB {
        format!("{:.2} MB", value / MIB)
    } else if value >= KIB {
        format!("{:.2} KB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}

/// Truncate a descriptor for single-line display, keeping char boundaries.
pub fn truncate_descriptor(descriptor: &str, max_chars: usize) -> String {
    if descriptor.chars().count() <= max_chars {
        descriptor.to_string()
    } else {
        descriptor.chars().take(max_chars).collect()
    }
}
