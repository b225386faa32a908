//! Symbol classification: address to memory region, descriptor to component.
//!
//! Both classifiers are total functions over explicit, ordered rule tables.
//! First match wins, and the fallback labels (`Unknown` / `Other`) mean a
//! symbol always receives exactly one region and exactly one component, so
//! any aggregation over either axis is a full partition of the symbol set.
//!
//! The tables live in `AnalyzerConfig`, a serde-friendly config model, so a
//! different chip layout or component vocabulary can be supplied from a YAML
//! or JSON file without recompiling. `AnalyzerConfig::build` converts the
//! config model into the runtime classifiers, which is where malformed
//! addresses are rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Region label for addresses outside every configured range.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Component label for descriptors matching no rule.
pub const OTHER_COMPONENT: &str = "Other";

static ARCHIVE_MEMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)lib(\w+)\.a\(").unwrap());

/// Error type for building classifiers from a config model.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A region address was neither `0x`-prefixed hex nor decimal.
    #[error("Invalid address '{value}' for region '{region}'")]
    InvalidAddress { region: String, value: String },

    /// A region range ends before it starts.
    #[error("Region '{region}' has a reversed range ({start:#x}..{end:#x})")]
    ReversedRange { region: String, start: u64, end: u64 },

    /// A keyword rule carries no keywords, so it could never match.
    #[error("Component rule '{label}' has no keywords")]
    NoKeywords { label: String },
}

/// One half-open address range `[start, end)` in the region table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRange {
    pub name: String,
    pub start: u64,
    pub end: u64,
}

impl RegionRange {
    pub fn new(name: impl Into<String>, start: u64, end: u64) -> Self {
        Self { name: name.into(), start, end }
    }

    fn contains(&self, address: u64) -> bool {
        self.start <= address && address < self.end
    }
}

/// Maps an address to a region label using an ordered range table.
///
/// Ranges are checked in declaration order and the first match wins, which
/// resolves any overlap deterministically (the default table happens to be
/// disjoint, but the classifier does not rely on that). No match yields
/// [`UNKNOWN_REGION`].
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    ranges: Vec<RegionRange>,
}

impl RegionClassifier {
    pub fn new(ranges: Vec<RegionRange>) -> Self {
        Self { ranges }
    }

    /// Classify one address. Pure and total.
    pub fn classify(&self, address: u64) -> &str {
        self.ranges
            .iter()
            .find(|range| range.contains(address))
            .map(|range| range.name.as_str())
            .unwrap_or(UNKNOWN_REGION)
    }

    /// The configured ranges, in match order.
    pub fn ranges(&self) -> &[RegionRange] {
        &self.ranges
    }
}

/// One rule in the ordered component rule list.
///
/// Rule order is part of the contract, not an implementation detail:
/// descriptors commonly satisfy several keyword predicates at once, and the
/// first match decides (`mqtt_sensor.cpp` is `Sensors`, not `MQTT`, because
/// the sensor rule comes first in the default list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentRule {
    /// Case-insensitive substring match against the descriptor.
    Keywords { label: String, keywords: Vec<String> },
    /// Archive-member pattern `lib<name>.a(...)` yields `Library: <name>`.
    ArchiveMember,
}

/// Maps a symbol descriptor to a component label using the ordered rule
/// list. No match yields [`OTHER_COMPONENT`].
#[derive(Debug, Clone)]
pub struct ComponentClassifier {
    rules: Vec<CompiledRule>,
}

#[derive(Debug, Clone)]
enum CompiledRule {
    Keywords { label: String, keywords: Vec<String> },
    ArchiveMember,
}

impl ComponentClassifier {
    /// Classify one descriptor. Pure and total.
    pub fn classify(&self, descriptor: &str) -> String {
        let lowered = descriptor.to_lowercase();
        for rule in &self.rules {
            match rule {
                CompiledRule::Keywords { label, keywords } => {
                    if keywords.iter().any(|keyword| lowered.contains(keyword.as_str())) {
                        return label.clone();
                    }
                }
                CompiledRule::ArchiveMember => {
                    if let Some(caps) = ARCHIVE_MEMBER.captures(descriptor) {
                        return format!("Library: {}", &caps[1]);
                    }
                }
            }
        }
        OTHER_COMPONENT.to_string()
    }
}

/// The two runtime classifiers built from one `AnalyzerConfig`.
#[derive(Debug, Clone)]
pub struct Classifiers {
    pub regions: RegionClassifier,
    pub components: ComponentClassifier,
}

/// A region range as it appears in a config file.
///
/// Addresses are strings (`"0x3C000000"` or decimal) because JSON has no hex
/// integer literals and the hex spelling is what linker scripts use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRangeConfig {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl RegionRangeConfig {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { name: name.into(), start: start.into(), end: end.into() }
    }
}

/// Serializable classifier configuration.
///
/// The default value reproduces the reference chip layout and component
/// vocabulary of the original firmware; a config file may override either
/// table independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_regions")]
    pub regions: Vec<RegionRangeConfig>,
    #[serde(default = "default_components")]
    pub components: Vec<ComponentRule>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { regions: default_regions(), components: default_components() }
    }
}

impl AnalyzerConfig {
    /// Convert the config model into runtime classifiers.
    ///
    /// Keywords are lowercased once here so per-symbol classification only
    /// lowercases the descriptor.
    pub fn build(&self) -> Result<Classifiers, ConfigError> {
        let mut ranges = Vec::with_capacity(self.regions.len());
        for region in &self.regions {
            let start = parse_address(&region.start).ok_or_else(|| {
                ConfigError::InvalidAddress { region: region.name.clone(), value: region.start.clone() }
            })?;
            let end = parse_address(&region.end).ok_or_else(|| {
                ConfigError::InvalidAddress { region: region.name.clone(), value: region.end.clone() }
            })?;
            if end < start {
                return Err(ConfigError::ReversedRange { region: region.name.clone(), start, end });
            }
            ranges.push(RegionRange::new(&region.name, start, end));
        }

        let mut rules = Vec::with_capacity(self.components.len());
        for rule in &self.components {
            match rule {
                ComponentRule::Keywords { label, keywords } => {
                    if keywords.is_empty() {
                        return Err(ConfigError::NoKeywords { label: label.clone() });
                    }
                    rules.push(CompiledRule::Keywords {
                        label: label.clone(),
                        keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
                    });
                }
                ComponentRule::ArchiveMember => rules.push(CompiledRule::ArchiveMember),
            }
        }

        Ok(Classifiers {
            regions: RegionClassifier::new(ranges),
            components: ComponentClassifier { rules },
        })
    }
}

/// Default region table (reference chip: external PSRAM, flash cache, DRAM).
fn default_regions() -> Vec<RegionRangeConfig> {
    vec![
        RegionRangeConfig::new("PSRAM", "0x3C000000", "0x3E000000"),
        RegionRangeConfig::new("Flash", "0x40000000", "0x44000000"),
        RegionRangeConfig::new("DRAM", "0x4FF00000", "0x50000000"),
    ]
}

/// Default component rule list, in match order.
fn default_components() -> Vec<ComponentRule> {
    fn keywords(label: &str, words: &[&str]) -> ComponentRule {
        ComponentRule::Keywords {
            label: label.to_string(),
            keywords: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    vec![
        keywords("Matter", &["matter", "chip"]),
        keywords("OpenSprinkler Core", &["opensprinkler", "main.cpp"]),
        keywords("Sensors", &["sensor"]),
        keywords("OpenThings Framework", &["openthings", "otf"]),
        keywords("WiFi/Network", &["wifi", "network"]),
        keywords("SSL/TLS", &["ssl", "tls", "mbedtls"]),
        keywords("BLE", &["ble", "bluetooth"]),
        keywords("MQTT", &["mqtt"]),
        keywords("WebSocket", &["websocket"]),
        ComponentRule::ArchiveMember,
    ]
}

/// Parse an address string: `0x`-prefixed hex or plain decimal, with `_`
/// separators tolerated.
fn parse_address(value: &str) -> Option<u64> {
    let trimmed = value.trim().replace('_', "");
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        trimmed.parse().ok()
    }
}
