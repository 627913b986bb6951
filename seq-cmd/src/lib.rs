//! Command implementations for the sequestration calculator CLI.
//!
//! Provides subcommands for dumping the static catalogs, running the form
//! validator from the command line and generating the technical report
//! offline from a saved page snapshot.

use clap::Subcommand;

pub mod catalog;
pub mod console;
pub mod report;
pub mod snapshot;
pub mod validate;

#[derive(Subcommand)]
pub enum Command {
    /// Print the built-in scenario presets as JSON
    Presets {
        /// Only print the preset with this key (e.g. "balanced")
        #[arg(short = 'k', long)]
        key: Option<String>,
    },

    /// Print the academic references as JSON
    References,

    /// Print the default calculator parameters as JSON
    Defaults,

    /// Check start/target years and emissions the way the form does
    Validate {
        #[arg(long)]
        start_year: String,

        #[arg(long)]
        target_year: String,

        /// Baseline emissions (MtCO2e)
        #[arg(long)]
        emissions_2030: String,

        /// Target emissions (MtCO2e)
        #[arg(long)]
        target_2050: String,

        /// Accept the "target above baseline" confirmation without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Generate the PDF technical report from a saved page snapshot
    Report {
        /// JSON snapshot of the form values and rendered results
        #[arg(short = 's', long)]
        snapshot: String,

        /// Directory holding `<canvas id>.png` chart images
        #[arg(short = 'c', long)]
        charts_dir: String,

        /// Directory the PDF is written to
        #[arg(short = 'o', long, default_value = ".")]
        out_dir: String,

        /// Optional JSON file overriding report settings
        #[arg(long)]
        config: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Presets { key } => catalog::run_presets(key.as_deref()),
        Command::References => catalog::run_references(),
        Command::Defaults => catalog::run_defaults(),
        Command::Validate {
            start_year,
            target_year,
            emissions_2030,
            target_2050,
            yes,
        } => validate::run_validate(&start_year, &target_year, &emissions_2030, &target_2050, yes),
        Command::Report {
            snapshot,
            charts_dir,
            out_dir,
            config,
        } => report::run_report(&snapshot, &charts_dir, &out_dir, config.as_deref()).await,
    }
}
