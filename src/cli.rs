//! Command-line interface implementation

use clap::{Parser, Subcommand};
use glob::glob;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::compile::{compile_file, write_header};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// rescomp - Compile resource files into embeddable C headers
#[derive(Parser)]
#[command(name = "rescomp")]
#[command(about = "Compile image and tracker-module resources into embeddable C headers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile every resource file in a directory to a C header
    Build {
        /// Directory containing resource files; headers are written next
        /// to their sources
        #[arg(default_value = "resources")]
        dir: PathBuf,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { dir } => ExitCode::from(run_build(&dir)),
    }
}

/// Execute the build command: compile every resource in `dir`.
///
/// Non-resource files are skipped silently. A failing resource is reported
/// and does not stop the batch; the exit code reflects whether any failed.
fn run_build(dir: &Path) -> u8 {
    if !dir.is_dir() {
        eprintln!("Error: '{}' is not a directory", dir.display());
        return EXIT_INVALID_ARGS;
    }

    let files = match discover_resources(dir) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: cannot scan '{}': {}", dir.display(), e);
            return EXIT_INVALID_ARGS;
        }
    };

    let mut failures = 0usize;
    for path in &files {
        match compile_file(path) {
            Ok(Some(header)) => match write_header(dir, &header) {
                Ok(dest) => println!("Saved: {}", dest.display()),
                Err(e) => {
                    eprintln!("Error: failed to write '{}': {}", header.file_name, e);
                    failures += 1;
                }
            },
            Ok(None) => {
                // Not a resource
            }
            Err(e) => {
                eprintln!("Error: failed to compile '{}': {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        EXIT_ERROR
    } else {
        EXIT_SUCCESS
    }
}

/// List candidate resource files in `dir`, sorted for a deterministic
/// batch order. Only names with at least one interior dot can carry a
/// descriptor, hence the `*.*` pattern.
fn discover_resources(dir: &Path) -> Result<Vec<PathBuf>, glob::PatternError> {
    let pattern = dir.join("*.*");
    let paths = glob(&pattern.to_string_lossy())?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                // Log but continue on unreadable paths
                eprintln!("Warning: error reading path: {}", e);
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_resources_sorted_files_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.bmp"), "x").unwrap();
        fs::write(dir.path().join("a.png"), "x").unwrap();
        fs::write(dir.path().join("no_dot"), "x").unwrap();
        fs::create_dir(dir.path().join("sub.dir")).unwrap();

        let files = discover_resources(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.bmp"]);
    }

    #[test]
    fn test_run_build_rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(run_build(&missing), EXIT_INVALID_ARGS);
    }

    #[test]
    fn test_run_build_continues_past_failures() {
        let dir = tempdir().unwrap();
        // Undecodable image: compile fails, batch keeps going
        fs::write(dir.path().join("broken.bmp"), "not a bitmap").unwrap();
        fs::write(dir.path().join("tune.xm"), [1u8, 2, 3]).unwrap();

        assert_eq!(run_build(dir.path()), EXIT_ERROR);
        // The valid resource was still compiled
        assert!(dir.path().join("tune.h").exists());
        assert!(!dir.path().join("broken.h").exists());
    }

    #[test]
    fn test_run_build_success_and_skips() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        fs::write(dir.path().join("tune.mod"), [0u8; 10]).unwrap();

        assert_eq!(run_build(dir.path()), EXIT_SUCCESS);
        assert!(dir.path().join("tune.h").exists());
        assert!(!dir.path().join("notes.h").exists());
    }
}
