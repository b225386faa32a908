use anyhow::Result;
use clap::{Parser, Subcommand};
use mapmeter::commands::{analyze_command, regions_command, sections_command, top_command};
use mapmeter::DEFAULT_MAP_PATH;
use mapmeter_core::aggregate::DEFAULT_TOP_LIMIT;

/// Linker-map memory analyzer CLI.
///
/// This CLI is a thin wrapper around `mapmeter-core` (exposed in code as
/// `mapmeter_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "mapmeter",
    version,
    about = "Linker-map memory analyzer for embedded firmware builds",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a map file and print the full memory report.
    ///
    /// The report covers the memory-configuration table, per-section sizes,
    /// component usage across all regions, a focus-region breakdown, and the
    /// largest symbols.
    Analyze {
        /// Path to the linker map file.
        #[arg(long, default_value = DEFAULT_MAP_PATH)]
        map: String,

        /// Optional analyzer config file (YAML or JSON) overriding the
        /// region ranges and component rules.
        #[arg(long)]
        config: Option<String>,

        /// Number of entries in the largest-symbols list.
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        top: usize,

        /// Region label for the focused per-component breakdown.
        #[arg(long, default_value = "PSRAM")]
        region: String,

        /// Emit the report as JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the memory-configuration table from a map file.
    Regions {
        /// Path to the linker map file.
        #[arg(long, default_value = DEFAULT_MAP_PATH)]
        map: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the per-section size summary from a map file.
    Sections {
        /// Path to the linker map file.
        #[arg(long, default_value = DEFAULT_MAP_PATH)]
        map: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the largest symbols from a map file.
    Top {
        /// Path to the linker map file.
        #[arg(long, default_value = DEFAULT_MAP_PATH)]
        map: String,

        /// Number of symbols to print.
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Default to a full analysis of the reference build's map if no
    // subcommand is provided.
    match cli.command.unwrap_or(Command::Analyze {
        map: DEFAULT_MAP_PATH.to_string(),
        config: None,
        top: DEFAULT_TOP_LIMIT,
        region: "PSRAM".to_string(),
        json: false,
    }) {
        Command::Analyze { map, config, top, region, json } => {
            analyze_command(&map, config.as_deref(), top, &region, json)?
        }
        Command::Regions { map, json } => regions_command(&map, json)?,
        Command::Sections { map, json } => sections_command(&map, json)?,
        Command::Top { map, limit, json } => top_command(&map, limit, json)?,
    }

    Ok(())
}
