//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod fill;
mod line;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::canvas::Cell;
use crate::fill::{Algorithm, Connectivity};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// gridfill - Fill enclosed regions on a cell grid
#[derive(Parser)]
#[command(name = "gridfill")]
#[command(about = "gridfill - Fill enclosed regions on a cell grid with flood, boundary or scanline fill")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and cell list
    #[default]
    Text,
    /// A single JSON report
    Json,
    /// One JSON object per canvas change or session event
    Jsonl,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw a polygon boundary and fill a region of it
    Fill {
        /// Polygon vertex as x,y (repeat in drawing order)
        #[arg(long = "vertex", value_name = "X,Y", allow_hyphen_values = true)]
        vertices: Vec<Cell>,

        /// Seed cell for flood and boundary fill, as x,y
        #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
        seed: Option<Cell>,

        /// Fill algorithm (default from gridfill.toml, else flood)
        #[arg(short, long, value_enum)]
        algorithm: Option<Algorithm>,

        /// Neighbor connectivity for seeded fills (4 or 8)
        #[arg(short, long, value_enum)]
        connectivity: Option<Connectivity>,

        /// Do not draw the closing edge from the last vertex to the first
        #[arg(long)]
        open: bool,

        /// Path to gridfill.toml (default: discovered from the working directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Reveal the fill in real time, sleeping between ticks
        #[arg(long)]
        animate: bool,

        /// Milliseconds between reveal ticks
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: Option<u64>,

        /// Cells revealed per tick
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        batch: Option<usize>,

        /// Cells added around the vertex extent to bound seeded fills
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
        padding: Option<i32>,

        /// Paint the seed cell with the seed color until the fill starts
        #[arg(long)]
        mark_seed: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the cells of a Bresenham line
    Line {
        /// Start cell as x,y
        #[arg(allow_hyphen_values = true)]
        from: Cell,

        /// End cell as x,y
        #[arg(allow_hyphen_values = true)]
        to: Cell,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Fill {
            vertices,
            seed,
            algorithm,
            connectivity,
            open,
            config,
            animate,
            interval_ms,
            batch,
            padding,
            mark_seed,
            format,
        } => fill::run_fill(fill::FillArgs {
            vertices,
            seed,
            algorithm,
            connectivity,
            open,
            config,
            animate,
            interval_ms,
            batch,
            padding,
            mark_seed,
            format,
        }),
        Commands::Line { from, to, format } => line::run_line(from, to, format),
    }
}

/// Route `log` output to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fill_args() {
        let cli = Cli::try_parse_from([
            "gridfill",
            "fill",
            "--vertex",
            "-3,0",
            "--vertex",
            "4,0",
            "--vertex",
            "4,4",
            "--seed",
            "1,1",
            "-a",
            "boundary",
            "-c",
            "8",
            "--format",
            "jsonl",
        ])
        .expect("valid arguments");

        match cli.command {
            Commands::Fill { vertices, seed, algorithm, connectivity, format, .. } => {
                assert_eq!(vertices, vec![Cell::new(-3, 0), Cell::new(4, 0), Cell::new(4, 4)]);
                assert_eq!(seed, Some(Cell::new(1, 1)));
                assert_eq!(algorithm, Some(Algorithm::Boundary));
                assert_eq!(connectivity, Some(Connectivity::Eight));
                assert_eq!(format, OutputFormat::Jsonl);
            }
            Commands::Line { .. } => panic!("expected fill command"),
        }
    }

    #[test]
    fn test_parse_padding_and_mark_seed() {
        let cli = Cli::try_parse_from(["gridfill", "fill", "--padding", "0", "--mark-seed"])
            .expect("valid arguments");
        match cli.command {
            Commands::Fill { padding, mark_seed, .. } => {
                assert_eq!(padding, Some(0));
                assert!(mark_seed);
            }
            Commands::Line { .. } => panic!("expected fill command"),
        }

        let result = Cli::try_parse_from(["gridfill", "fill", "--padding=-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_batch_rejected() {
        let result = Cli::try_parse_from(["gridfill", "fill", "--batch", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_cell_rejected() {
        let result = Cli::try_parse_from(["gridfill", "line", "0,0", "1;1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["gridfill", "-vv", "line", "0,0", "1,1"]).expect("valid");
        assert_eq!(cli.verbose, 2);
    }
}
