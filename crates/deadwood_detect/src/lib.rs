//! Unused file and unused export detection for bundled JavaScript projects.
//!
//! This crate reads the compilation snapshot a bundler writes after a build,
//! compares it with the files matched by the configured globs, and reports:
//! - source files the bundle never pulled in
//! - exports that no other module imports
//!
//! It can then ask whether to delete the unused files and whether to write
//! their list to a JSON file. Exit status is left to the caller.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use clap::Parser;
//! use deadwood_detect::{Config, PresetAnswer, run_dead_code_check};
//! use std::io::BufWriter;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config::parse_from(["detect", "--compilation", "dist/compilation.json"]);
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! let report = run_dead_code_check(&mut cfg, &mut PresetAnswer(false), &mut stdout)?;
//! std::process::exit(report.exit_code());
//! # }
//! ```

mod actions;
mod checker;
mod config;
mod prompt;
mod reporter;
mod runner;
mod types;

// Re-export public API
pub use actions::{
    DeletionOutcome, InteractiveOutcome, delete_files, handle_unused_files,
    write_unused_files_report,
};
pub use checker::detect_dead_code;
pub use config::Config;
pub use prompt::{PresetAnswer, Prompter, TerminalPrompter};
pub use reporter::{print_finished, print_unused_exports, print_unused_files};
pub use runner::{FAIL_ON_HINT_EXIT_CODE, RunOutcome, RunReport, execute, run_dead_code_check};
pub use types::DetectionResult;
