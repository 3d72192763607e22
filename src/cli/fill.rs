//! CLI dispatch for the `gridfill fill` command.
//!
//! Loads configuration, replays the vertex and seed clicks through a
//! [`FillSession`], drives the reveal and prints the result.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use serde::Serialize;

use crate::canvas::{Bounds, Cell, ColorTag};
use crate::color::to_hex;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, GridfillConfig};
use crate::fill::{Algorithm, Connectivity};
use crate::session::{FillSession, SessionEvent};

use super::{OutputFormat, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Parsed arguments of `gridfill fill`.
pub struct FillArgs {
    pub vertices: Vec<Cell>,
    pub seed: Option<Cell>,
    pub algorithm: Option<Algorithm>,
    pub connectivity: Option<Connectivity>,
    pub open: bool,
    pub config: Option<PathBuf>,
    pub animate: bool,
    pub interval_ms: Option<u64>,
    pub batch: Option<usize>,
    pub padding: Option<i32>,
    pub mark_seed: bool,
    pub format: OutputFormat,
}

/// Display colors of the roles that appear in a fill report.
#[derive(Serialize)]
struct PaletteReport {
    boundary: String,
    fill: String,
    seed: String,
}

/// Single JSON document printed for `--format json`.
#[derive(Serialize)]
struct FillReport<'a> {
    algorithm: Algorithm,
    connectivity: Connectivity,
    vertices: &'a [Cell],
    seed: Option<Cell>,
    bounds: Bounds,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    boundary_cells: usize,
    filled: usize,
    cells: &'a [Cell],
    palette: PaletteReport,
}

/// Execute the fill command.
pub fn run_fill(args: FillArgs) -> ExitCode {
    if args.vertices.is_empty() {
        eprintln!("Error: at least one --vertex is required");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let overrides = CliOverrides {
        algorithm: args.algorithm,
        connectivity: args.connectivity,
        interval_ms: args.interval_ms,
        batch: args.batch,
        padding: args.padding,
        mark_seed: args.mark_seed.then_some(true),
        close_polygon: args.open.then_some(false),
    };
    merge_cli_overrides(&mut config, &overrides);

    match execute(&config, &args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn execute(config: &GridfillConfig, args: &FillArgs) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = FillSession::new(config);
    for &vertex in &args.vertices {
        session.vertex_clicked(vertex);
    }
    session.draw_edges();
    if let Some(seed) = args.seed {
        session.seed_clicked(seed);
    }
    let boundary_cells = session.canvas().count(ColorTag::Boundary);

    let algorithm = config.fill.algorithm;
    let connectivity = config.fill.connectivity;
    session.start_fill(algorithm, connectivity, ColorTag::Boundary, ColorTag::Fill);
    let cells: Vec<Cell> =
        session.scheduler().current().map(|run| run.cells().to_vec()).unwrap_or_default();

    if args.format == OutputFormat::Jsonl {
        stream_pending(&mut session, &mut out)?;
    }
    while session.is_filling() {
        if args.animate {
            thread::sleep(session.scheduler().interval());
        }
        session.tick();
        if args.format == OutputFormat::Jsonl {
            stream_pending(&mut session, &mut out)?;
        }
    }

    let rejection = session.take_events().into_iter().find_map(|event| match event {
        SessionEvent::FillRejected { reason, .. } => Some(reason),
        _ => None,
    });

    match args.format {
        OutputFormat::Jsonl => Ok(()),
        OutputFormat::Json => {
            let palette = config.palette();
            let report = FillReport {
                algorithm,
                connectivity,
                vertices: session.vertices(),
                seed: session.seed(),
                bounds: session.bounds(),
                status: if rejection.is_some() { "rejected" } else { "filled" },
                reason: rejection,
                boundary_cells,
                filled: session.canvas().count(ColorTag::Fill),
                cells: &cells,
                palette: PaletteReport {
                    boundary: to_hex(palette.boundary),
                    fill: to_hex(palette.fill),
                    seed: to_hex(palette.seed),
                },
            };
            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        }
        OutputFormat::Text => {
            if let Some(reason) = rejection {
                writeln!(out, "No cells filled: {}", reason)?;
                return Ok(());
            }
            writeln!(
                out,
                "Filled {} cells ({}, {}), boundary {} cells",
                cells.len(),
                algorithm,
                connectivity,
                boundary_cells
            )?;
            for cell in &cells {
                writeln!(out, "  {}", cell)?;
            }
            Ok(())
        }
    }
}

/// Write every queued canvas change and session event as one JSON line each.
fn stream_pending(session: &mut FillSession, out: &mut impl Write) -> io::Result<()> {
    for change in session.take_changes() {
        let line = serde_json::to_string(&change).map_err(io::Error::other)?;
        writeln!(out, "{}", line)?;
    }
    for event in session.take_events() {
        let line = serde_json::to_string(&event).map_err(io::Error::other)?;
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
