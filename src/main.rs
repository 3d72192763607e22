//! gridfill - Command-line driver for the region fill engines

use std::process::ExitCode;

use gridfill::cli;

fn main() -> ExitCode {
    cli::run()
}
