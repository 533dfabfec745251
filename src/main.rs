//! rescomp - Command-line tool for compiling resource files into C headers

use std::process::ExitCode;

use rescomp::cli;

fn main() -> ExitCode {
    cli::run()
}
