use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mapmeter_core::classify::AnalyzerConfig;

/// Load an analyzer config file (YAML or JSON based on extension), or the
/// built-in default tables when no path is given.
pub fn load_analyzer_config(path: Option<&str>) -> Result<AnalyzerConfig> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };

    let path = Path::new(path);
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read analyzer config at {}", path.display()))?;

    let config: AnalyzerConfig = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&body).context("Failed to parse analyzer config JSON")?
    } else {
        serde_yaml::from_str(&body).context("Failed to parse analyzer config YAML")?
    };
    Ok(config)
}
