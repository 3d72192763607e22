//! CLI dispatch for the `gridfill line` command.

use std::process::ExitCode;

use crate::canvas::Cell;
use crate::shapes::rasterize_line;

use super::{OutputFormat, EXIT_ERROR, EXIT_SUCCESS};

/// Print the Bresenham cells from `from` to `to`.
pub fn run_line(from: Cell, to: Cell, format: OutputFormat) -> ExitCode {
    let cells = rasterize_line(from, to);
    log::debug!("line {} -> {}: {} cells", from, to, cells.len());

    match format {
        OutputFormat::Text => {
            for cell in &cells {
                println!("{}", cell);
            }
        }
        OutputFormat::Json => match serde_json::to_string(&cells) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        OutputFormat::Jsonl => {
            for cell in &cells {
                match serde_json::to_string(cell) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::from(EXIT_ERROR);
                    }
                }
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
