//! Core model and reconciliation logic for deadwood.
//!
//! This crate turns the metadata of one finished bundling pass into two result
//! sets, without touching the terminal:
//! - Loading a compilation snapshot (file dependencies, emitted assets, module
//!   export usage) written by the host bundler
//! - Expanding include/exclude globs against the project context
//! - Computing files that were never pulled into the bundle
//! - Computing exported symbols that nothing imports

mod collector;
mod compilation;
mod constants;
mod paths;
mod reconcile;
mod types;

// Re-export public API
pub use collector::{CollectorConfig, collect_included_files};
pub use compilation::{Asset, BuildMeta, Chunk, Compilation, Module, RawExports};
pub use constants::DEPENDENCY_DIRS;
pub use paths::{absolutize, is_dependency_path, to_unix_path};
pub use reconcile::{compute_unused_export_map, compute_unused_files};
pub use types::{FileSet, ModuleExportUsage, ProvidedExports, UnusedExportMap, UsedExports};
