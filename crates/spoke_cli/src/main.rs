//! Spoke CLI — the command-line interface for the placement-timing simulator.
//!
//! Provides `spoke init` for project scaffolding, `spoke simulate` for scoring
//! one assignment against the configured device and graph, and
//! `spoke topology` for inspecting the device's coordinate space.

#![warn(missing_docs)]

mod init;
mod pipeline;
mod simulate;
mod topology;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Spoke — placement-timing simulation for spoke-based devices.
#[derive(Parser, Debug)]
#[command(name = "spoke", version, about = "Spoke placement-timing simulator")]
pub struct Cli {
    /// Suppress all output except errors and results.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `spoke.toml` configuration file or its directory.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Spoke project.
    Init {
        /// Project name (creates a subdirectory). If omitted, initializes in
        /// the current directory.
        name: Option<String>,
    },
    /// Simulate one assignment and report readiness and rewards.
    Simulate(SimulateArgs),
    /// Print the device's coordinate enumeration.
    Topology(TopologyArgs),
}

/// Arguments for the `spoke simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// One flat coordinate index per node, comma separated; `-1` leaves a
    /// node unplaced.
    #[arg(
        short,
        long,
        required = true,
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub assignment: Vec<i64>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `spoke topology` subcommand.
#[derive(Parser, Debug)]
pub struct TopologyArgs {
    /// Also print the latency from this flat coordinate index to every other.
    #[arg(long)]
    pub latency_from: Option<usize>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-essential output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => color_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Init { name } => init::run(name, &global),
        Command::Simulate(ref args) => simulate::run(args, &global),
        Command::Topology(ref args) => topology::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Terminal heuristic: `TERM` is set and is not `dumb`, and `NO_COLOR` is unset.
fn color_terminal() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").is_ok_and(|term| term != "dumb")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_init_default() {
        let cli = Cli::parse_from(["spoke", "init"]);
        match cli.command {
            Command::Init { name } => assert!(name.is_none()),
            _ => panic!("expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_name() {
        let cli = Cli::parse_from(["spoke", "init", "my_device"]);
        match cli.command {
            Command::Init { name } => assert_eq!(name.as_deref(), Some("my_device")),
            _ => panic!("expected Init command"),
        }
    }

    #[test]
    fn parse_simulate_list() {
        let cli = Cli::parse_from(["spoke", "simulate", "--assignment", "0,5,-1,47"]);
        match cli.command {
            Command::Simulate(ref args) => {
                assert_eq!(args.assignment, vec![0, 5, -1, 47]);
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Simulate command"),
        }
    }

    #[test]
    fn parse_simulate_leading_unplaced() {
        let cli = Cli::parse_from(["spoke", "simulate", "-a", "-1,-1", "--format", "json"]);
        match cli.command {
            Command::Simulate(ref args) => {
                assert_eq!(args.assignment, vec![-1, -1]);
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Simulate command"),
        }
    }

    #[test]
    fn simulate_requires_assignment() {
        assert!(Cli::try_parse_from(["spoke", "simulate"]).is_err());
    }

    #[test]
    fn parse_topology_latency_from() {
        let cli = Cli::parse_from(["spoke", "topology", "--latency-from", "7"]);
        match cli.command {
            Command::Topology(ref args) => assert_eq!(args.latency_from, Some(7)),
            _ => panic!("expected Topology command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["spoke", "--quiet", "--color", "never", "topology"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["spoke", "topology", "--verbose", "--color", "always"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["spoke", "--config", "/path/to/spoke.toml", "topology"]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/spoke.toml"));
    }
}
